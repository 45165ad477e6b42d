use crate::database::{new_id, now_millis, AsyncDbConnection};
use anyhow::Result;
use rusqlite::params;
use shared_types::CustomerNote;

pub async fn insert_note(conn: AsyncDbConnection, customer_id: &str, content: &str) -> Result<CustomerNote> {
    let note = CustomerNote {
        id: new_id(),
        customer_id: customer_id.to_string(),
        content: content.to_string(),
        created_at: now_millis(),
    };

    insert_note_row(conn, &note).await?;
    Ok(note)
}

pub async fn insert_note_row(conn: AsyncDbConnection, note: &CustomerNote) -> Result<()> {
    let conn = conn.lock().await?;

    conn.execute(
        "INSERT INTO customer_notes (id, customer_id, content, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![&note.id, &note.customer_id, &note.content, note.created_at],
    )?;

    Ok(())
}

/// Notes for one customer, newest first
pub async fn list_notes(conn: AsyncDbConnection, customer_id: &str) -> Result<Vec<CustomerNote>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT id, customer_id, content, created_at
         FROM customer_notes
         WHERE customer_id = ?
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let notes = stmt
        .query_map([customer_id], |row| {
            Ok(CustomerNote {
                id: row.get(0)?,
                customer_id: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(notes)
}
