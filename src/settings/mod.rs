// Settings module
// Optional JSON settings read at startup

#[allow(clippy::module_inception)]
pub mod settings;

pub use settings::AppSettings;
