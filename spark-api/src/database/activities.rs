use crate::database::{customers, new_id, now_millis, AsyncDbConnection};
use anyhow::Result;
use rusqlite::params;
use shared_types::{ActivityAction, CustomerActivity};

/// Record an activity and move the customer's last contact to it.
pub async fn insert_activity(
    conn: AsyncDbConnection,
    customer_id: &str,
    action: ActivityAction,
    description: &str,
) -> Result<CustomerActivity> {
    let activity = CustomerActivity {
        id: new_id(),
        customer_id: customer_id.to_string(),
        action,
        description: description.to_string(),
        created_at: now_millis(),
    };

    insert_activity_row(conn.clone(), &activity).await?;
    customers::touch_last_contact(conn, customer_id, activity.created_at).await?;

    Ok(activity)
}

pub async fn insert_activity_row(conn: AsyncDbConnection, activity: &CustomerActivity) -> Result<()> {
    let conn = conn.lock().await?;

    conn.execute(
        "INSERT INTO customer_activities (id, customer_id, action, description, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            &activity.id,
            &activity.customer_id,
            activity.action.as_str(),
            &activity.description,
            activity.created_at,
        ],
    )?;

    Ok(())
}

/// Activities for one customer, newest first
pub async fn list_activities(conn: AsyncDbConnection, customer_id: &str) -> Result<Vec<CustomerActivity>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT id, customer_id, action, description, created_at
         FROM customer_activities
         WHERE customer_id = ?
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let activities = stmt
        .query_map([customer_id], |row| {
            let action: String = row.get(2)?;
            Ok(CustomerActivity {
                id: row.get(0)?,
                customer_id: row.get(1)?,
                action: ActivityAction::parse(&action).unwrap_or(ActivityAction::Email),
                description: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(activities)
}
