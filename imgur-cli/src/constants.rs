// ABOUTME: Centralized constants for the Imgur CLI application
// ABOUTME: Contains environment variable names, config file locations and display limits

/// Environment variables that override the config file
pub mod env {
    pub const CLIENT_ID: &str = "IMGUR_CLIENT_ID";
    pub const RAPIDAPI_KEY: &str = "IMGUR_RAPIDAPI_KEY";
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Config file names searched by `Config::load`
pub mod files {
    /// Project-local config in the working directory
    pub const PROJECT_CONFIG: &str = "imgur-cli.toml";
    pub const APP_DIR: &str = "imgur-cli";
    pub const USER_CONFIG: &str = "config.toml";
}

/// Output formats accepted for `preferred_format`
pub mod formats {
    pub const TABLE: &str = "table";
    pub const JSON: &str = "json";
    pub const ALL: &[&str] = &[TABLE, JSON];
}

pub mod ui {
    /// Titles and descriptions longer than this are truncated in tables
    pub const MAX_TEXT_WIDTH: usize = 60;

    /// Placeholder for absent values
    pub const MISSING: &str = "-";

    /// Remaining quota below this share of the limit is highlighted
    pub const LOW_QUOTA_RATIO: f64 = 0.1;
}
