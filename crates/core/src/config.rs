use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Webhook URL for Telegram updates
/// Read from WEBHOOK_URL environment variable; long polling is used when unset
pub static WEBHOOK_URL: Lazy<Option<String>> = Lazy::new(|| env::var("WEBHOOK_URL").ok());

/// Secret token Telegram echoes back on every webhook call
/// Read from WEBHOOK_SECRET_TOKEN environment variable; unset disables the check
pub static WEBHOOK_SECRET_TOKEN: Lazy<Option<String>> = Lazy::new(|| {
    env::var("WEBHOOK_SECRET_TOKEN")
        .ok()
        .filter(|s| !s.trim().is_empty())
});

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: materials.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "materials.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: muqarrar.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "muqarrar.log".to_string()));

/// Operator configuration
pub mod operator {
    use once_cell::sync::Lazy;
    use std::env;

    /// Telegram handle (username, without @) of the single privileged
    /// operator allowed to register content.
    /// Read from OPERATOR_HANDLE environment variable.
    /// Defaults to empty string if not set (no operator access).
    pub static OPERATOR_HANDLE: Lazy<String> =
        Lazy::new(|| env::var("OPERATOR_HANDLE").unwrap_or_else(|_| String::new()));
}

/// Network configuration
pub mod network {
    use once_cell::sync::Lazy;
    use std::env;
    use std::time::Duration;

    /// Request timeout for outbound Telegram API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    /// Port the webhook listener binds to
    /// Read from WEBHOOK_PORT environment variable
    /// Default: 8443
    pub static WEBHOOK_PORT: Lazy<u16> = Lazy::new(|| {
        env::var("WEBHOOK_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8443)
    });
}

/// Storage configuration
pub mod store {
    use super::Duration;

    /// SQLite busy timeout; a lock held longer than this surfaces as a
    /// storage-unavailable error instead of blocking the request handler.
    pub const BUSY_TIMEOUT_SECS: u64 = 5;

    pub fn busy_timeout() -> Duration {
        Duration::from_secs(BUSY_TIMEOUT_SECS)
    }
}
