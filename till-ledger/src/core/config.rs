use std::path::PathBuf;

/// Catalog file name under the work dir
pub const CATALOG_FILE: &str = "menu.json";
/// Sales log database file name under the work dir
pub const SALES_DB_FILE: &str = "sales.redb";
/// Secrets/config file name under the work dir
pub const SECRETS_FILE: &str = "config.json";

/// Till configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_to_file: bool,
    /// Items at or below this quantity are reported as low stock
    pub low_stock_threshold: i32,
}

impl Config {
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(is_production),
            log_to_file: std::env::var("LOG_TO_FILE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &i32| *v >= 0)
                .unwrap_or(5),
            environment,
        }
    }

    /// Create a config rooted at a custom work dir
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(CATALOG_FILE)
    }

    pub fn sales_db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(SALES_DB_FILE)
    }

    pub fn secrets_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(SECRETS_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
