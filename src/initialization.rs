use std::env;
use std::fs;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Deserialize;
use crate::errors::ConfigError;

const CONF_ENV: &str = "FORECASTVIEW_CONF";
const CONF_DEFAULT: &str = "forecastview.toml";
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub web_server: WebServer,
    pub owm: Owm,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: Option<String>,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct Owm {
    pub api_key: String,
}

/// Loads the application configuration from the toml file pointed out by
/// the FORECASTVIEW_CONF environment variable, or forecastview.toml in
/// the working directory when unset.
pub fn config() -> Result<Config, ConfigError> {
    let path = env::var(CONF_ENV).unwrap_or_else(|_| CONF_DEFAULT.to_string());
    let raw = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&raw)?;

    Ok(config)
}

/// Sets up log4rs with a console appender, a file appender, or both,
/// according to the general configuration section.
///
/// # Arguments
///
/// * 'general' - the general configuration section
pub fn logging(general: &General) -> Result<(), ConfigError> {
    let mut builder = log4rs::Config::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if let Some(path) = &general.log_path {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = builder.build(root.build(LevelFilter::Info))?;
    log4rs::init_config(config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let raw = r#"
            [general]
            log_path = "/var/log/forecastview.log"
            log_to_stdout = true

            [web_server]
            bind_address = "0.0.0.0"
            bind_port = 8080

            [owm]
            api_key = "secret"
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.general.log_path.as_deref(), Some("/var/log/forecastview.log"));
        assert!(config.general.log_to_stdout);
        assert_eq!(config.web_server.bind_address, "0.0.0.0");
        assert_eq!(config.web_server.bind_port, 8080);
        assert_eq!(config.owm.api_key, "secret");
    }

    #[test]
    fn log_settings_are_optional() {
        let raw = r#"
            [general]

            [web_server]
            bind_address = "127.0.0.1"
            bind_port = 8080

            [owm]
            api_key = "secret"
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        assert!(config.general.log_path.is_none());
        assert!(!config.general.log_to_stdout);
    }
}
