use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    // Create customers table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS customers (
            id VARCHAR PRIMARY KEY,
            name VARCHAR NOT NULL,
            email VARCHAR NOT NULL,
            phone VARCHAR,
            company VARCHAR,
            status VARCHAR NOT NULL DEFAULT 'lead' CHECK (status IN ('active', 'inactive', 'lead')),
            last_contact_at BIGINT,
            initials VARCHAR NOT NULL,
            avatar_url VARCHAR,
            created_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_customers_email ON customers(email)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_customers_created ON customers(created_at DESC)",
        [],
    )?;

    // Create customer_notes table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS customer_notes (
            id VARCHAR PRIMARY KEY,
            customer_id VARCHAR NOT NULL,
            content VARCHAR NOT NULL,
            created_at BIGINT NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES customers (id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_customer_notes_customer_created
            ON customer_notes(customer_id, created_at DESC)",
        [],
    )?;

    // Create customer_activities table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS customer_activities (
            id VARCHAR PRIMARY KEY,
            customer_id VARCHAR NOT NULL,
            action VARCHAR NOT NULL CHECK (action IN ('Email', 'Call', 'Meeting')),
            description VARCHAR NOT NULL,
            created_at BIGINT NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES customers (id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_customer_activities_customer_created
            ON customer_activities(customer_id, created_at DESC)",
        [],
    )?;

    // Create email_history table; inbound mail from unknown senders has no customer
    conn.execute(
        "CREATE TABLE IF NOT EXISTS email_history (
            id VARCHAR PRIMARY KEY,
            customer_id VARCHAR,
            subject VARCHAR NOT NULL,
            message VARCHAR NOT NULL,
            direction VARCHAR NOT NULL CHECK (direction IN ('sent', 'received')),
            status VARCHAR NOT NULL CHECK (status IN ('sent', 'failed', 'delivered')),
            reply_to VARCHAR,
            created_at BIGINT NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES customers (id) ON DELETE SET NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_email_history_customer_created
            ON email_history(customer_id, created_at DESC)",
        [],
    )?;

    Ok(())
}
