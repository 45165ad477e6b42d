use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::database::{customers, Database};
use crate::helpers::sample_data;

/// Returns the path to the CRM database based on the operating system
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/spark-crm/db.sqlite`
/// - **Linux**: `~/.local/share/spark-crm/db.sqlite`
/// - **Windows**: `%LOCALAPPDATA%\spark-crm\db.sqlite`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("spark-crm").join("db.sqlite"))
}

/// Open (or create) the database and seed the sample directory into an empty store
pub async fn initialize_database(config: &DatabaseConfig) -> anyhow::Result<(Arc<Database>, PathBuf)> {
    let db_path = match &config.path {
        Some(path) => path.clone(),
        None => get_db_path()?,
    };

    let db = Arc::new(Database::new(&db_path)?);

    if config.seed_sample_data && customers::count_customers(db.async_connection.clone()).await? == 0 {
        let seeded = sample_data::seed_sample_data(db.async_connection.clone()).await?;
        tracing::info!("Seeded {} sample customers", seeded);
    }

    Ok((db, db_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: Some(dir.path().join("crm.sqlite")),
            seed_sample_data: true,
        };

        let (db, path) = initialize_database(&config).await.unwrap();
        assert_eq!(path, dir.path().join("crm.sqlite"));
        let seeded = customers::count_customers(db.async_connection.clone()).await.unwrap();
        assert_eq!(seeded, 8);
        drop(db);

        let (db, _) = initialize_database(&config).await.unwrap();
        assert_eq!(customers::count_customers(db.async_connection.clone()).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_initialize_without_seed() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: Some(dir.path().join("crm.sqlite")),
            seed_sample_data: false,
        };

        let (db, _) = initialize_database(&config).await.unwrap();
        assert_eq!(customers::count_customers(db.async_connection.clone()).await.unwrap(), 0);
    }
}
