use crate::database::{new_id, now_millis, AsyncDbConnection};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use shared_types::{EmailDirection, EmailRecord, EmailStatus};

const EMAIL_COLUMNS: &str = "id, customer_id, subject, message, direction, status, reply_to, created_at";

/// Fields of a history row before it gets an id and timestamp
#[derive(Debug, Clone)]
pub struct NewEmailRecord<'a> {
    pub customer_id: Option<&'a str>,
    pub subject: &'a str,
    pub message: &'a str,
    pub direction: EmailDirection,
    pub status: EmailStatus,
    pub reply_to: Option<&'a str>,
}

fn email_from_row(row: &Row<'_>) -> rusqlite::Result<EmailRecord> {
    let direction: String = row.get(4)?;
    let status: String = row.get(5)?;
    Ok(EmailRecord {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        subject: row.get(2)?,
        message: row.get(3)?,
        direction: EmailDirection::parse(&direction).unwrap_or(EmailDirection::Received),
        status: EmailStatus::parse(&status).unwrap_or(EmailStatus::Delivered),
        reply_to: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// Append one row to the email history
pub async fn insert_email_record(conn: AsyncDbConnection, record: NewEmailRecord<'_>) -> Result<EmailRecord> {
    let email = EmailRecord {
        id: new_id(),
        customer_id: record.customer_id.map(str::to_string),
        subject: record.subject.to_string(),
        message: record.message.to_string(),
        direction: record.direction,
        status: record.status,
        reply_to: record.reply_to.map(str::to_string),
        created_at: now_millis(),
    };

    let conn = conn.lock().await?;
    conn.execute(
        "INSERT INTO email_history
         (id, customer_id, subject, message, direction, status, reply_to, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            &email.id,
            email.customer_id.as_deref(),
            &email.subject,
            &email.message,
            email.direction.as_str(),
            email.status.as_str(),
            email.reply_to.as_deref(),
            email.created_at,
        ],
    )?;

    Ok(email)
}

pub async fn get_email_record(conn: AsyncDbConnection, id: &str) -> Result<Option<EmailRecord>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!("SELECT {EMAIL_COLUMNS} FROM email_history WHERE id = ?"))?;
    let email = stmt.query_row([id], email_from_row).optional()?;

    Ok(email)
}

/// History for one customer, newest first
pub async fn list_customer_emails(conn: AsyncDbConnection, customer_id: &str) -> Result<Vec<EmailRecord>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {EMAIL_COLUMNS} FROM email_history
         WHERE customer_id = ?
         ORDER BY created_at DESC, rowid DESC"
    ))?;

    let emails = stmt
        .query_map([customer_id], email_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(emails)
}

/// Inbound mail that could not be tied to a customer
pub async fn list_unassigned_emails(conn: AsyncDbConnection) -> Result<Vec<EmailRecord>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {EMAIL_COLUMNS} FROM email_history
         WHERE customer_id IS NULL
         ORDER BY created_at DESC, rowid DESC"
    ))?;

    let emails = stmt
        .query_map([], email_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(emails)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::customers::insert_customer;
    use crate::database::test_support::temp_database;
    use shared_types::CreateCustomerRequest;

    #[tokio::test]
    async fn test_insert_and_list_history() {
        let (db, _dir) = temp_database();
        let conn = db.async_connection.clone();

        let jane = insert_customer(
            conn.clone(),
            &CreateCustomerRequest {
                name: "Jane Cooper".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let sent = insert_email_record(
            conn.clone(),
            NewEmailRecord {
                customer_id: Some(&jane.id),
                subject: "Proposal",
                message: "Please find the proposal attached",
                direction: EmailDirection::Sent,
                status: EmailStatus::Sent,
                reply_to: None,
            },
        )
        .await
        .unwrap();

        let orphan = insert_email_record(
            conn.clone(),
            NewEmailRecord {
                customer_id: None,
                subject: "Hello",
                message: "Who is this?",
                direction: EmailDirection::Received,
                status: EmailStatus::Delivered,
                reply_to: Some("stranger@example.com"),
            },
        )
        .await
        .unwrap();

        let history = list_customer_emails(conn.clone(), &jane.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, sent.id);
        assert_eq!(history[0].direction, EmailDirection::Sent);

        let unassigned = list_unassigned_emails(conn.clone()).await.unwrap();
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].reply_to.as_deref(), Some("stranger@example.com"));

        let fetched = get_email_record(conn.clone(), &orphan.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, EmailStatus::Delivered);
        assert!(get_email_record(conn, "nope").await.unwrap().is_none());
    }
}
