//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Leave workflow configuration.
    #[serde(default)]
    pub leave: LeaveConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Leave workflow configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveConfig {
    /// Approver roles, in the order a new request visits them.
    #[serde(default = "default_approval_chain")]
    pub approval_chain: Vec<String>,
    /// Whether full approval debits the employee's leave balance.
    #[serde(default = "default_debit_balance_on_approval")]
    pub debit_balance_on_approval: bool,
}

impl Default for LeaveConfig {
    fn default() -> Self {
        Self {
            approval_chain: default_approval_chain(),
            debit_balance_on_approval: default_debit_balance_on_approval(),
        }
    }
}

fn default_approval_chain() -> Vec<String> {
    vec!["line_manager".to_string(), "hr".to_string()]
}

fn default_debit_balance_on_approval() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "leavedesk=debug".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEAVEDESK")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("leave.approval_chain")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "LEAVEDESK__LEAVE__APPROVAL_CHAIN",
                "LEAVEDESK__LEAVE__DEBIT_BALANCE_ON_APPROVAL",
                "LEAVEDESK__LOGGING__JSON",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.leave.approval_chain, vec!["line_manager", "hr"]);
                assert!(config.leave.debit_balance_on_approval);
                assert_eq!(config.logging.filter, "leavedesk=debug");
                assert!(!config.logging.json);
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("LEAVEDESK__LEAVE__APPROVAL_CHAIN", Some("hr")),
                ("LEAVEDESK__LEAVE__DEBIT_BALANCE_ON_APPROVAL", Some("false")),
                ("LEAVEDESK__LOGGING__JSON", Some("true")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.leave.approval_chain, vec!["hr"]);
                assert!(!config.leave.debit_balance_on_approval);
                assert!(config.logging.json);
            },
        );
    }

    #[test]
    fn test_default_impl_matches_serde_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.leave.approval_chain.len(), 2);
        assert!(config.leave.debit_balance_on_approval);
    }
}
