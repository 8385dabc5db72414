use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/order-server | Working directory (database, documents, logs) |
/// | HTTP_PORT | 8080 | HTTP API port |
/// | ORDERS_DB | orders.redb | Record store file name, under WORK_DIR |
/// | DOCUMENTS_DIR | documents | Document mirror root, under WORK_DIR |
/// | ORDER_TOPIC | order-events | Topic tag stamped on notifications |
/// | NOTIFICATION_FEED_CAPACITY | 100 | Recent notifications kept for polling |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Tracing filter (overridden by RUST_LOG) |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database, documents, and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Record store file name (relative to the work dir)
    pub orders_db: String,
    /// Document mirror root (relative to the work dir)
    pub documents_dir: String,
    /// Topic tag stamped on every published notification
    pub order_topic: String,
    /// Bounded capacity of the recent-notification feed
    pub feed_capacity: usize,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Default tracing filter
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/order-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            orders_db: std::env::var("ORDERS_DB").unwrap_or_else(|_| "orders.redb".into()),
            documents_dir: std::env::var("DOCUMENTS_DIR").unwrap_or_else(|_| "documents".into()),
            order_topic: std::env::var("ORDER_TOPIC").unwrap_or_else(|_| "order-events".into()),
            feed_capacity: std::env::var("NOTIFICATION_FEED_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(100),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override the work directory and port, keeping everything else from
    /// the environment. Used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the record store database file
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.orders_db)
    }

    /// Root directory of the document mirror
    pub fn documents_root(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.documents_dir)
    }

    /// Log directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if it does not exist yet
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.documents_root())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
