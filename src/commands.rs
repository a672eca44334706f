// Order command handlers
//
// Each handler opens its own connection and drops it before returning,
// whichever path it returns through.
use crate::console::Console;
use crate::db::connection::Database;
use crate::db::models::{NewOrder, OrderUpdate};
use crate::db::operations::DbOperations;
use crate::display::format_orders;
use crate::error::{OrderError, OrderResult};
use crate::validation::{
    is_confirmed, is_exit_keyword, is_valid_order_id, normalize_order_id, parse_order_date,
    parse_price, parse_quantity, FieldError,
};

const INVALID_DATE: &str = "Invalid date format. Please enter the date as YYYY-MM-DD.";

/// Print a message, mapping I/O failures into the order error type
fn say(console: &mut dyn Console, message: &str) -> OrderResult<()> {
    console.print(message)?;
    Ok(())
}

/// Prompt for one line of input; closed input aborts the operation
fn ask(console: &mut dyn Console, message: &str) -> OrderResult<String> {
    console.prompt(message)?.ok_or(OrderError::InputClosed)
}

/// Prompt until a non-empty (trimmed) value is entered
fn ask_required(console: &mut dyn Console, message: &str, field: &str) -> OrderResult<String> {
    loop {
        let value = ask(console, message)?.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }
        say(console, &format!("{} cannot be empty. Please try again.", field))?;
    }
}

/// Trimmed input, or `None` when left blank
fn optional(input: String) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ===== Place Order =====

pub fn place_order(db: &Database, console: &mut dyn Console) -> OrderResult<()> {
    let conn = db.connect()?;

    let customer_name = ask_required(console, "Enter Customer Name: ", "Customer Name")?;
    let food_item = ask_required(console, "Enter Food Item: ", "Food Item")?;

    let quantity = loop {
        match parse_quantity(&ask(console, "Enter Quantity: ")?) {
            Ok(quantity) => break quantity,
            Err(FieldError::Negative) => {
                say(console, "Quantity cannot be negative. Please try again.")?
            }
            Err(FieldError::Invalid) => say(
                console,
                "Invalid input. Please enter a valid integer for the quantity.",
            )?,
        }
    };

    let price = loop {
        match parse_price(&ask(console, "Enter the Price: ")?) {
            Ok(price) => break price,
            Err(FieldError::Negative) => say(console, "Price cannot be negative. Please try again.")?,
            Err(FieldError::Invalid) => say(
                console,
                "Invalid input. Please enter a valid number for the price.",
            )?,
        }
    };

    // A bad date abandons the whole order rather than reprompting
    let order_date = parse_order_date(&ask(console, "Enter the Order Date (YYYY-MM-DD): ")?)
        .map_err(|_| OrderError::Validation(INVALID_DATE.to_string()))?;

    let order = DbOperations::insert_order(
        &conn,
        NewOrder {
            customer_name,
            food_item,
            quantity,
            price,
            order_date,
        },
    )?;

    tracing::info!(order_id = %order.order_id, "order placed");
    say(
        console,
        &format!("Order Placed Successfully with OrderID: {}", order.order_id),
    )
}

// ===== Update Order =====

/// Read the optional replacement fields. Any supplied value that fails to
/// parse aborts the update.
fn read_order_update(console: &mut dyn Console) -> OrderResult<OrderUpdate> {
    let customer_name = optional(ask(
        console,
        "Enter new Customer Name (leave blank if you want to retain): ",
    )?);
    let food_item = optional(ask(
        console,
        "Enter new Food Item (leave blank if you want to retain): ",
    )?);
    let quantity = optional(ask(
        console,
        "Enter new Quantity (leave blank if you want to retain): ",
    )?);
    let price = optional(ask(
        console,
        "Enter new Price (leave blank if you want to retain): ",
    )?);
    let order_date = optional(ask(
        console,
        "Enter new Order Date (YYYY-MM-DD), leave blank if you want to retain: ",
    )?);

    let quantity = quantity
        .map(|input| {
            parse_quantity(&input).map_err(|e| {
                OrderError::Validation(match e {
                    FieldError::Negative => "Quantity cannot be negative.".to_string(),
                    FieldError::Invalid => {
                        "Invalid quantity. Please enter a valid integer.".to_string()
                    }
                })
            })
        })
        .transpose()?;

    let price = price
        .map(|input| {
            parse_price(&input).map_err(|e| {
                OrderError::Validation(match e {
                    FieldError::Negative => "Price cannot be negative.".to_string(),
                    FieldError::Invalid => "Invalid price. Please enter a valid number.".to_string(),
                })
            })
        })
        .transpose()?;

    let order_date = order_date
        .map(|input| {
            parse_order_date(&input).map_err(|_| OrderError::Validation(INVALID_DATE.to_string()))
        })
        .transpose()?;

    Ok(OrderUpdate {
        customer_name,
        food_item,
        quantity,
        price,
        order_date,
    })
}

pub fn update_order(db: &Database, console: &mut dyn Console) -> OrderResult<()> {
    let conn = db.connect()?;

    let order_ids = DbOperations::get_order_ids(&conn)?;
    if order_ids.is_empty() {
        return say(console, "No orders available to update.");
    }
    let available = order_ids.join(", ");

    let order_id = loop {
        let order_id = normalize_order_id(&ask(console, "Enter OrderID to Update: ")?);

        if !is_valid_order_id(&order_id) {
            say(
                console,
                &format!(
                    "\nInvalid OrderID '{}'. Please enter a valid Order ID from the following available Order IDs: {}",
                    order_id, available
                ),
            )?;
            continue;
        }

        if order_ids.contains(&order_id) {
            say(
                console,
                &format!("OrderID: {} found. Proceeding with update...", order_id),
            )?;
            break order_id;
        }

        say(
            console,
            &format!(
                "Food Order with the OrderID: {} does not exist. Please choose from: {}",
                order_id, available
            ),
        )?;
    };

    let update = read_order_update(console)?;
    if update.is_empty() {
        return say(console, "No Order Updates were made.");
    }

    let answer = ask(
        console,
        &format!(
            "\nAre you sure you want to Update the order with OrderID: {}? (yes/no): ",
            order_id
        ),
    )?;
    if !is_confirmed(&answer) {
        return say(console, "\nOrder Update Cancelled.");
    }

    if DbOperations::update_order(&conn, &order_id, &update)? == 0 {
        return Err(OrderError::NotFound(order_id));
    }

    tracing::info!(order_id = %order_id, "order updated");
    say(console, "Order Updated successfully!")
}

// ===== Delete Order =====

pub fn delete_order(db: &Database, console: &mut dyn Console) -> OrderResult<()> {
    let conn = db.connect()?;

    let order_ids = DbOperations::get_order_ids(&conn)?;
    if order_ids.is_empty() {
        return say(console, "No orders available to delete.");
    }
    let available = order_ids.join(", ");

    loop {
        let input = ask(console, "\nEnter OrderID to Delete / type 'exit' to cancel: ")?;
        if is_exit_keyword(&input) {
            return say(console, "\nOrder deletion cancelled.");
        }

        let order_id = normalize_order_id(&input);
        if !is_valid_order_id(&order_id) {
            say(
                console,
                &format!(
                    "\nInvalid OrderID '{}'. Please enter a valid Order ID from the following available Order IDs: {}",
                    order_id, available
                ),
            )?;
            continue;
        }

        if !DbOperations::order_exists(&conn, &order_id)? {
            say(
                console,
                &format!("\n{}", OrderError::NotFound(order_id.clone())),
            )?;
            say(
                console,
                &format!(
                    "Please choose from the following available Order IDs: {}",
                    available
                ),
            )?;
            continue;
        }

        say(
            console,
            &format!("\nOrderID: {} found. Deleting the Order...", order_id),
        )?;

        let answer = ask(
            console,
            &format!(
                "\nAre you sure you want to delete the order with OrderID: {}? (yes/no): ",
                order_id
            ),
        )?;
        if !is_confirmed(&answer) {
            return say(console, "\nOrder deletion cancelled.");
        }

        DbOperations::delete_order(&conn, &order_id)?;
        tracing::info!(order_id = %order_id, "order deleted");
        return say(
            console,
            &format!(
                "\nOrder with OrderID: {} has been deleted successfully.",
                order_id
            ),
        );
    }
}

// ===== View Orders =====

pub fn view_orders(db: &Database, console: &mut dyn Console) -> OrderResult<()> {
    let conn = db.connect()?;
    let orders = DbOperations::get_all_orders(&conn)?;

    match format_orders(&orders) {
        Some(lines) => {
            for line in lines {
                say(console, &line)?;
            }
            Ok(())
        }
        None => say(console, "No orders were found."),
    }
}

/// Print a failed operation's message and log it. Nothing propagates past
/// this point; the caller returns to the menu.
pub fn report_error(console: &mut dyn Console, error: &OrderError) {
    let message = match error {
        OrderError::Connection(_) => "Failed to connect to the database.".to_string(),
        OrderError::Validation(msg) => msg.clone(),
        OrderError::NotFound(_) => error.to_string(),
        OrderError::Database(e) => format!("Error: {}", e),
        OrderError::Io(e) => format!("Error: {}", e),
        OrderError::InputClosed => "Input closed, operation abandoned.".to_string(),
    };

    match error {
        OrderError::Validation(_) | OrderError::NotFound(_) => {
            tracing::debug!(error = %error, "operation aborted")
        }
        _ => tracing::error!(error = %error, "operation failed"),
    }

    if let Err(e) = console.print(&message) {
        tracing::error!(error = %e, "failed to write error message");
    }
}
