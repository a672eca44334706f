// Food Orders - console order manager
// Module declarations
pub mod commands;
pub mod console;
pub mod db;
pub mod display;
pub mod error;
pub mod logging;
pub mod menu;
pub mod settings;
pub mod state;
pub mod validation;

use anyhow::{Context, Result};

use state::AppState;

/// Run the interactive order manager on stdin/stdout
pub fn run() -> Result<()> {
    logging::setup_tracing();

    let working_dir = std::env::current_dir().context("Failed to get working directory")?;
    let app_state = AppState::from_dir(&working_dir);

    let mut console = console::stdio_console().context("Failed to open console")?;
    menu::run_menu(&app_state, console.as_mut()).context("Console I/O failed")?;

    Ok(())
}
