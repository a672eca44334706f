use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::models::{NewOrder, Order, OrderUpdate};

/// Prefix for generated order IDs
pub const ORDER_ID_PREFIX: &str = "A";

/// An UPDATE statement together with its bound values.
pub struct UpdateStatement {
    pub sql: String,
    pub values: Vec<Box<dyn ToSql>>,
}

/// Database operations for order management
pub struct DbOperations;

impl DbOperations {
    /// Format the candidate ID for a counter value, e.g. `A01`, `A42`, `A100`
    pub fn format_order_id(counter: u64) -> String {
        format!("{}{:02}", ORDER_ID_PREFIX, counter)
    }

    /// Find the first unused order ID by probing `A01`, `A02`, ... in turn
    pub fn generate_order_id(conn: &Connection) -> rusqlite::Result<String> {
        let mut stmt = conn.prepare("SELECT COUNT(*) FROM orders WHERE order_id = ?1")?;
        let mut counter: u64 = 1;

        loop {
            let candidate = Self::format_order_id(counter);
            let exists: i64 = stmt.query_row(params![candidate], |row| row.get(0))?;

            if exists == 0 {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    /// Check whether an order with this ID is stored
    pub fn order_exists(conn: &Connection, order_id: &str) -> rusqlite::Result<bool> {
        let found = conn
            .query_row(
                "SELECT 1 FROM orders WHERE order_id = ?1",
                params![order_id],
                |_| Ok(()),
            )
            .optional()?;

        Ok(found.is_some())
    }

    /// Insert a new order under a freshly generated ID
    pub fn insert_order(conn: &Connection, new_order: NewOrder) -> rusqlite::Result<Order> {
        let order_id = Self::generate_order_id(conn)?;
        let order = new_order.with_id(order_id);

        conn.execute(
            "INSERT INTO orders (
                order_id, customer_name, food_item, quantity, price, order_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                order.order_id,
                order.customer_name,
                order.food_item,
                order.quantity,
                order.price,
                order.order_date,
            ],
        )?;

        Ok(order)
    }

    /// Get all orders in insertion order
    pub fn get_all_orders(conn: &Connection) -> rusqlite::Result<Vec<Order>> {
        let mut stmt = conn.prepare(
            "SELECT order_id, customer_name, food_item, quantity, price, order_date
             FROM orders
             ORDER BY rowid",
        )?;

        let orders = stmt
            .query_map([], |row| {
                Ok(Order {
                    order_id: row.get(0)?,
                    customer_name: row.get(1)?,
                    food_item: row.get(2)?,
                    quantity: row.get(3)?,
                    price: row.get(4)?,
                    order_date: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(orders)
    }

    /// Get the IDs of all stored orders
    pub fn get_order_ids(conn: &Connection) -> rusqlite::Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT order_id FROM orders ORDER BY rowid")?;

        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(ids)
    }

    /// Build the UPDATE statement for the supplied fields.
    ///
    /// Returns `None` when the update carries no fields. Column names come from
    /// a fixed list; every value, including the OrderID, is a bound parameter.
    pub fn build_update_statement(update: &OrderUpdate, order_id: &str) -> Option<UpdateStatement> {
        let mut columns: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = &update.customer_name {
            columns.push("customer_name");
            values.push(Box::new(name.clone()));
        }
        if let Some(item) = &update.food_item {
            columns.push("food_item");
            values.push(Box::new(item.clone()));
        }
        if let Some(quantity) = update.quantity {
            columns.push("quantity");
            values.push(Box::new(quantity));
        }
        if let Some(price) = update.price {
            columns.push("price");
            values.push(Box::new(price));
        }
        if let Some(date) = update.order_date {
            columns.push("order_date");
            values.push(Box::new(date));
        }

        if columns.is_empty() {
            return None;
        }

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        values.push(Box::new(order_id.to_string()));
        let sql = format!(
            "UPDATE orders SET {} WHERE order_id = ?{}",
            assignments,
            values.len()
        );

        Some(UpdateStatement { sql, values })
    }

    /// Apply a partial update. Returns the number of rows changed; an empty
    /// update runs no statement and changes nothing.
    pub fn update_order(
        conn: &Connection,
        order_id: &str,
        update: &OrderUpdate,
    ) -> rusqlite::Result<usize> {
        let Some(statement) = Self::build_update_statement(update, order_id) else {
            return Ok(0);
        };

        let params_refs: Vec<&dyn ToSql> = statement.values.iter().map(|p| p.as_ref()).collect();
        conn.execute(&statement.sql, params_refs.as_slice())
    }

    /// Delete the order with this ID. Returns the number of rows removed.
    pub fn delete_order(conn: &Connection, order_id: &str) -> rusqlite::Result<usize> {
        conn.execute("DELETE FROM orders WHERE order_id = ?1", params![order_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn jane_pizza() -> NewOrder {
        NewOrder {
            customer_name: "Jane".to_string(),
            food_item: "Pizza".to_string(),
            quantity: 2,
            price: 9.99,
            order_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn insert_with_id(conn: &Connection, order_id: &str) {
        conn.execute(
            "INSERT INTO orders (order_id, customer_name, food_item, quantity, price, order_date)
             VALUES (?1, 'X', 'Y', 1, 1.0, '2024-01-01')",
            params![order_id],
        )
        .unwrap();
    }

    #[test]
    fn test_format_order_id() {
        assert_eq!(DbOperations::format_order_id(1), "A01");
        assert_eq!(DbOperations::format_order_id(42), "A42");
        assert_eq!(DbOperations::format_order_id(100), "A100");
    }

    #[test]
    fn test_first_order_on_empty_table() {
        let conn = setup();
        let order = DbOperations::insert_order(&conn, jane_pizza()).unwrap();

        assert_eq!(order.order_id, "A01");
        let stored = DbOperations::get_all_orders(&conn).unwrap();
        assert_eq!(stored, vec![order]);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let conn = setup();
        let mut seen = HashSet::new();
        for _ in 0..25 {
            let order = DbOperations::insert_order(&conn, jane_pizza()).unwrap();
            assert!(seen.insert(order.order_id));
        }
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn test_generator_fills_gaps() {
        let conn = setup();
        insert_with_id(&conn, "A01");
        insert_with_id(&conn, "A03");

        assert_eq!(DbOperations::generate_order_id(&conn).unwrap(), "A02");
    }

    #[test]
    fn test_generator_grows_past_two_digits() {
        let conn = setup();
        for counter in 1..=99 {
            insert_with_id(&conn, &DbOperations::format_order_id(counter));
        }

        assert_eq!(DbOperations::generate_order_id(&conn).unwrap(), "A100");
    }

    #[test]
    fn test_order_exists() {
        let conn = setup();
        DbOperations::insert_order(&conn, jane_pizza()).unwrap();

        assert!(DbOperations::order_exists(&conn, "A01").unwrap());
        assert!(!DbOperations::order_exists(&conn, "A02").unwrap());
    }

    #[test]
    fn test_build_update_only_names_supplied_columns() {
        let update = OrderUpdate {
            food_item: Some("Pasta".to_string()),
            price: Some(12.5),
            ..Default::default()
        };
        let statement = DbOperations::build_update_statement(&update, "A01").unwrap();

        assert_eq!(
            statement.sql,
            "UPDATE orders SET food_item = ?1, price = ?2 WHERE order_id = ?3"
        );
        assert_eq!(statement.values.len(), 3);
    }

    #[test]
    fn test_build_update_keeps_values_out_of_sql() {
        let update = OrderUpdate {
            customer_name: Some("Robert'); DROP TABLE orders;--".to_string()),
            ..Default::default()
        };
        let statement = DbOperations::build_update_statement(&update, "A01").unwrap();

        assert!(!statement.sql.contains("DROP"));
        assert!(!statement.sql.contains("A01"));
    }

    #[test]
    fn test_build_update_empty_is_none() {
        assert!(DbOperations::build_update_statement(&OrderUpdate::default(), "A01").is_none());
    }

    #[test]
    fn test_update_order_changes_supplied_fields() {
        let conn = setup();
        DbOperations::insert_order(&conn, jane_pizza()).unwrap();

        let update = OrderUpdate {
            quantity: Some(4),
            order_date: NaiveDate::from_ymd_opt(2024, 6, 2),
            ..Default::default()
        };
        let changed = DbOperations::update_order(&conn, "A01", &update).unwrap();
        assert_eq!(changed, 1);

        let order = DbOperations::get_all_orders(&conn).unwrap().remove(0);
        assert_eq!(order.quantity, 4);
        assert_eq!(order.order_date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(order.customer_name, "Jane");
        assert_eq!(order.price, 9.99);
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let conn = setup();
        let before = DbOperations::insert_order(&conn, jane_pizza()).unwrap();

        let changed = DbOperations::update_order(&conn, "A01", &OrderUpdate::default()).unwrap();
        assert_eq!(changed, 0);
        assert_eq!(DbOperations::get_all_orders(&conn).unwrap(), vec![before]);
    }

    #[test]
    fn test_quantity_beyond_u32_round_trips() {
        let conn = setup();
        let mut new_order = jane_pizza();
        new_order.quantity = 5_000_000_000;

        let order = DbOperations::insert_order(&conn, new_order).unwrap();

        assert_eq!(DbOperations::get_all_orders(&conn).unwrap(), vec![order]);
    }

    #[test]
    fn test_update_and_delete_missing_id_change_nothing() {
        let conn = setup();
        let before = DbOperations::insert_order(&conn, jane_pizza()).unwrap();

        let update = OrderUpdate {
            quantity: Some(9),
            ..Default::default()
        };
        assert_eq!(DbOperations::update_order(&conn, "A99", &update).unwrap(), 0);
        assert_eq!(DbOperations::delete_order(&conn, "A99").unwrap(), 0);
        assert_eq!(DbOperations::get_all_orders(&conn).unwrap(), vec![before]);
    }

    #[test]
    fn test_delete_removes_one_row() {
        let conn = setup();
        DbOperations::insert_order(&conn, jane_pizza()).unwrap();
        DbOperations::insert_order(&conn, jane_pizza()).unwrap();

        assert_eq!(DbOperations::delete_order(&conn, "A01").unwrap(), 1);
        assert_eq!(DbOperations::get_order_ids(&conn).unwrap(), vec!["A02".to_string()]);
    }
}
