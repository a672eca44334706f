// Database migrations
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    // Create orders table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS orders (
            order_id TEXT PRIMARY KEY NOT NULL,
            customer_name TEXT NOT NULL,
            food_item TEXT NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity >= 0),
            price REAL NOT NULL CHECK (price >= 0),
            order_date TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
