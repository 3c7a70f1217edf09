// ABOUTME: Application-wide constants and directory resolution
// ABOUTME: Resolves the Groundwork data directory and database location

use std::path::PathBuf;

/// Name of the application data directory under the user's home
pub const GROUNDWORK_DIR_NAME: &str = ".groundwork";

/// Default SQLite database filename
pub const DB_FILENAME: &str = "groundwork.db";

/// Environment variable that overrides the database location
pub const DB_PATH_ENV: &str = "GROUNDWORK_DB_PATH";

/// Returns the Groundwork application data directory (~/.groundwork)
pub fn groundwork_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(GROUNDWORK_DIR_NAME)
}

/// Returns the database path, honoring the GROUNDWORK_DB_PATH override
pub fn database_path() -> PathBuf {
    match std::env::var(DB_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => groundwork_dir().join(DB_FILENAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database_path_lives_under_groundwork_dir() {
        std::env::remove_var(DB_PATH_ENV);
        let path = database_path();
        assert!(path.ends_with(PathBuf::from(GROUNDWORK_DIR_NAME).join(DB_FILENAME)));
    }
}
