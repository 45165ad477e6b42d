use crate::database::{new_id, now_millis, AsyncDbConnection};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use shared_types::{initials_from_name, CreateCustomerRequest, Customer, CustomerStatus};

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, company, status, last_contact_at, initials, avatar_url, created_at";

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    let status: String = row.get(5)?;
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        company: row.get(4)?,
        status: CustomerStatus::parse(&status).unwrap_or_default(),
        last_contact_at: row.get(6)?,
        initials: row.get(7)?,
        avatar_url: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Insert a customer from the add-customer form. Initials are derived from the name.
pub async fn insert_customer(conn: AsyncDbConnection, request: &CreateCustomerRequest) -> Result<Customer> {
    let customer = Customer {
        id: new_id(),
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        phone: blank_to_none(request.phone.as_deref()),
        company: blank_to_none(request.company.as_deref()),
        status: request.status.unwrap_or_default(),
        last_contact_at: None,
        initials: initials_from_name(&request.name),
        avatar_url: None,
        created_at: now_millis(),
    };

    insert_customer_row(conn, &customer).await?;
    Ok(customer)
}

/// Insert a fully formed row, keeping its id and timestamps
pub async fn insert_customer_row(conn: AsyncDbConnection, customer: &Customer) -> Result<()> {
    let conn = conn.lock().await?;

    conn.execute(
        "INSERT INTO customers
         (id, name, email, phone, company, status, last_contact_at, initials, avatar_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            &customer.id,
            &customer.name,
            &customer.email,
            customer.phone.as_deref(),
            customer.company.as_deref(),
            customer.status.as_str(),
            customer.last_contact_at,
            &customer.initials,
            customer.avatar_url.as_deref(),
            customer.created_at,
        ],
    )?;

    Ok(())
}

pub async fn get_customer(conn: AsyncDbConnection, id: &str) -> Result<Option<Customer>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?"
    ))?;

    let customer = stmt.query_row([id], customer_from_row).optional()?;
    Ok(customer)
}

/// All customers, newest first
pub async fn list_customers(conn: AsyncDbConnection) -> Result<Vec<Customer>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC, rowid DESC"
    ))?;

    let customers = stmt
        .query_map([], customer_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(customers)
}

/// Ids of customers whose email is exactly `email`. No case folding.
pub async fn find_customer_ids_by_email(conn: AsyncDbConnection, email: &str) -> Result<Vec<String>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare("SELECT id FROM customers WHERE email = ? ORDER BY created_at")?;
    let ids = stmt
        .query_map([email], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ids)
}

pub async fn touch_last_contact(conn: AsyncDbConnection, id: &str, at: i64) -> Result<()> {
    let conn = conn.lock().await?;

    conn.execute(
        "UPDATE customers SET last_contact_at = ?1 WHERE id = ?2",
        params![at, id],
    )?;

    Ok(())
}

pub async fn count_customers(conn: AsyncDbConnection) -> Result<i64> {
    let conn = conn.lock().await?;
    let count = conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
    Ok(count)
}
