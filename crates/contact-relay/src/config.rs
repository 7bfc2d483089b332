use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8888
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    /// Injected through `PARFUMIS__MAIL__SMTP_PASSWORD`; never stored in code.
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "forms@parfumis.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PARFUMIS__MAIL__SMTP_PASSWORD, etc.)
    /// 2. Config file specified by path, `CONFIG_PATH`, or `config/default.toml`
    /// 3. Built-in defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PARFUMIS")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Reject unusable settings. Returns warnings about settings that work
    /// but are probably not intended, for the caller to log.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if self.mail.smtp_host.trim().is_empty() {
            return Err("mail.smtp_host must be set".to_string());
        }
        if self.mail.from_address.trim().is_empty() {
            return Err("mail.from_address must be set".to_string());
        }

        let mut warnings = Vec::new();
        if !self.mail.smtp_username.is_empty() && self.mail.smtp_password.is_empty() {
            warnings.push(
                "mail.smtp_username is set without mail.smtp_password; \
                 the relay will connect unauthenticated"
                    .to_string(),
            );
        }
        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.server.port, 8888);
        assert_eq!(config.mail.from_address, "forms@parfumis.com");
        assert_eq!(config.validate(), Ok(Vec::new()));
    }

    #[test]
    fn username_without_password_is_reported() {
        let mut config = Config::default();
        config.mail.smtp_username = "relay".into();
        let warnings = config.validate().expect("valid");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("smtp_password"));
    }

    #[test]
    fn loads_values_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        writeln!(
            file,
            "[server]\nport = 9000\n\n[mail]\nsmtp_host = \"smtp.example.com\"\nfrom_address = \"relay@example.com\"\n"
        )
        .expect("write");

        let path = file.path().to_string_lossy().into_owned();
        let config = Config::load(Some(path)).expect("load");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.mail.smtp_host, "smtp.example.com");
        assert_eq!(config.mail.from_address, "relay@example.com");
        assert_eq!(config.mail.smtp_port, 587);
    }

    #[test]
    fn empty_from_address_is_rejected() {
        let mut config = Config::default();
        config.mail.from_address = " ".into();
        assert!(config.validate().is_err());
    }
}
