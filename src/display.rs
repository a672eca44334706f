// Table formatting for the order list
use crate::db::models::Order;
use crate::validation::DATE_FORMAT;

/// Width of the separator under the header
const SEPARATOR_WIDTH: usize = 80;

pub fn header_line() -> String {
    format!(
        "{:<10} {:<20} {:<15} {:<10} {:<10} {:<15}",
        "OrderID", "Customer Name", "Food Item", "Quantity", "Price", "Order Date"
    )
}

pub fn separator_line() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub fn order_line(order: &Order) -> String {
    format!(
        "{:<10} {:<20} {:<15} {:<10} {:<10.2} {:<15}",
        order.order_id,
        order.customer_name,
        order.food_item,
        order.quantity,
        order.price,
        order.order_date.format(DATE_FORMAT).to_string()
    )
}

/// Render the full table, or `None` when there is nothing to show
pub fn format_orders(orders: &[Order]) -> Option<Vec<String>> {
    if orders.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(orders.len() + 2);
    lines.push(header_line());
    lines.push(separator_line());
    lines.extend(orders.iter().map(order_line));
    Some(lines)
}
