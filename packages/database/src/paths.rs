//! Location of the Global API `DuckDB` file.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the database location.
pub const DB_PATH_ENV: &str = "GLOBAL_API_DB_PATH";

/// Database location used when [`DB_PATH_ENV`] is unset:
/// `data/global_api.duckdb` under the workspace root, which is resolved at
/// compile time from `CARGO_MANIFEST_DIR`. Falls back to a path relative to
/// the working directory if the manifest sits unexpectedly shallow.
#[must_use]
pub fn default_db_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(PathBuf::new, Path::to_path_buf)
        .join("data")
        .join("global_api.duckdb")
}

/// Returns the database path from `GLOBAL_API_DB_PATH`, falling back to
/// [`default_db_path`].
#[must_use]
pub fn db_path_from_env() -> PathBuf {
    std::env::var_os(DB_PATH_ENV).map_or_else(default_db_path, PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_db_sits_in_workspace_data_dir() {
        let path = default_db_path();

        assert_eq!(path.file_name().unwrap(), "global_api.duckdb");
        let workspace = path.parent().unwrap().parent().unwrap();
        assert!(workspace.join("Cargo.toml").exists());
        assert!(workspace.join("packages").is_dir());
    }
}
