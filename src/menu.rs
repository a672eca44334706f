// Main menu loop
use std::io;

use crate::commands;
use crate::console::Console;
use crate::state::AppState;

const MENU: [&str; 6] = [
    "\nFood Order Management System",
    "1. Place Food Order",
    "2. Update Food Order",
    "3. Delete Food Order",
    "4. View Food Orders",
    "5. Exit",
];

const GOODBYE: &str = "Exiting program. Thank you for using the Food Order Management System.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Place,
    Update,
    Delete,
    View,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Place),
            "2" => Some(Self::Update),
            "3" => Some(Self::Delete),
            "4" => Some(Self::View),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }

    fn announcement(self) -> &'static str {
        match self {
            Self::Place => "You have chosen to place a food order.",
            Self::Update => "You have chosen to update a food order.",
            Self::Delete => "You have chosen to delete a food order.",
            Self::View => "You have chosen to view all food orders.",
            Self::Exit => GOODBYE,
        }
    }
}

/// Show the menu and dispatch choices until Exit is chosen or input ends.
///
/// Operation failures are reported and the loop carries on; only a failure
/// to write to the console itself ends the loop with an error.
pub fn run_menu(state: &AppState, console: &mut dyn Console) -> io::Result<()> {
    loop {
        for line in MENU {
            console.print(line)?;
        }

        let Some(input) = console.prompt("Select an option to execute: 1-5: ")? else {
            console.print(GOODBYE)?;
            return Ok(());
        };

        let Some(choice) = MenuChoice::parse(&input) else {
            console.print(&format!(
                "Invalid choice: ({}). Please select a valid option: 1-5.",
                input.trim()
            ))?;
            continue;
        };

        console.print(choice.announcement())?;
        tracing::debug!(?choice, "menu selection");

        let result = match choice {
            MenuChoice::Place => commands::place_order(&state.db, console),
            MenuChoice::Update => commands::update_order(&state.db, console),
            MenuChoice::Delete => commands::delete_order(&state.db, console),
            MenuChoice::View => commands::view_orders(&state.db, console),
            MenuChoice::Exit => return Ok(()),
        };

        if let Err(error) = result {
            commands::report_error(console, &error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::{output, scripted, scripted_bytes};
    use crate::settings::AppSettings;

    fn state(dir: &tempfile::TempDir) -> AppState {
        AppState::new(AppSettings {
            version: 1,
            database_path: dir.path().join("orders.db"),
        })
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Place));
        assert_eq!(MenuChoice::parse(" 4 "), Some(MenuChoice::View));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_exit_option() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = scripted(&["5", "4"]);

        run_menu(&state(&dir), &mut console).unwrap();

        let out = output(console);
        assert!(out.ends_with(&format!("{}\n", GOODBYE)));
        assert!(!out.contains("No orders were found."));
    }

    #[test]
    fn test_invalid_choice_redisplays_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = scripted(&["9", "5"]);

        run_menu(&state(&dir), &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("Invalid choice: (9). Please select a valid option: 1-5."));
        assert_eq!(out.matches("Food Order Management System\n").count(), 2);
    }

    #[test]
    fn test_undecodable_choice_keeps_menu_running() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = scripted_bytes(b"\xff\xfe\n4\n5\n");

        run_menu(&state(&dir), &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("Invalid choice: (\u{FFFD}\u{FFFD}). Please select a valid option: 1-5."));
        assert!(out.contains("No orders were found."));
        assert!(out.ends_with(&format!("{}\n", GOODBYE)));
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = scripted(&["4"]);

        run_menu(&state(&dir), &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("No orders were found."));
        assert!(out.contains(GOODBYE));
    }

    #[test]
    fn test_full_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = scripted(&[
            "1", "Jane", "Pizza", "2", "9.99", "2024-05-01",
            "1", "Tom", "Soup", "1", "4", "not-a-date",
            "4",
            "3", "A01", "yes",
            "4",
            "5",
        ]);

        run_menu(&state(&dir), &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("Order Placed Successfully with OrderID: A01"));
        assert!(out.contains("Invalid date format. Please enter the date as YYYY-MM-DD."));
        assert_eq!(out.matches("Order Placed Successfully").count(), 1);
        assert!(out.contains("Order with OrderID: A01 has been deleted successfully."));
        assert!(out.contains("No orders were found."));
        assert!(out.ends_with(&format!("{}\n", GOODBYE)));
    }
}
