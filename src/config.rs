use std::env;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Read once at startup from the environment. Every field has a default so
// the demo runs without any variables set.
//
// ============================================================================

pub const DEFAULT_LOG_FILTER: &str = "info,ddd_events=debug";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// tracing EnvFilter directive (RUST_LOG)
    pub log_filter: String,
    /// Mailbox that receives the email handlers' messages (DDD_NOTIFY_EMAIL)
    pub notify_email: String,
    /// Queue that receives customer lifecycle messages (DDD_CUSTOMER_QUEUE)
    pub customer_queue: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            notify_email: "backoffice@store.local".to_string(),
            customer_queue: "customer-events".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };

        Self {
            log_filter: read("RUST_LOG", defaults.log_filter),
            notify_email: read("DDD_NOTIFY_EMAIL", defaults.notify_email),
            customer_queue: read("DDD_CUSTOMER_QUEUE", defaults.customer_queue),
        }
    }
}
