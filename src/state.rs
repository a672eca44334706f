// Application state management
use std::path::Path;

use crate::db::connection::Database;
use crate::settings::AppSettings;

pub struct AppState {
    pub settings: AppSettings,
    pub db: Database,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        let db = Database::new(settings.database_path.clone());
        Self { settings, db }
    }

    /// Build state from the settings file in `dir`, if any
    pub fn from_dir(dir: &Path) -> Self {
        let settings = AppSettings::load_or_default(dir);
        tracing::info!(database = %settings.database_path.display(), "using database");
        Self::new(settings)
    }
}
