use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

use crate::services::KeyFormat;

#[derive(Debug, Clone)]
pub struct EntitlementConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub redis: RedisConfig,
    pub key_format: KeyFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

impl EntitlementConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        // Unset keeps the legacy concatenated key layout.
        let key_format = match env::var("SUBSCRIPTION_KEY_DELIMITER") {
            Ok(sep) => KeyFormat::Delimited(sep),
            Err(_) => KeyFormat::Concatenated,
        };

        let config = EntitlementConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("entitlement-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            redis: RedisConfig {
                url: get_env("REDIS_URL", Some("redis://127.0.0.1:6379"), is_prod)?,
            },
            key_format,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.common.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "PORT must be greater than 0"
            )));
        }

        if let KeyFormat::Delimited(sep) = &self.key_format {
            if sep.is_empty() {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "SUBSCRIPTION_KEY_DELIMITER must not be empty when set"
                )));
            }
        }

        if self.environment == Environment::Prod && self.redis.url.starts_with("redis://127.0.0.1")
        {
            tracing::warn!("REDIS_URL points at localhost in production");
        }

        Ok(())
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(port: u16, key_format: KeyFormat) -> EntitlementConfig {
        EntitlementConfig {
            common: core_config::Config { port },
            environment: Environment::Dev,
            service_name: "entitlement-service".to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            redis: RedisConfig {
                url: "redis://127.0.0.1:6379".to_string(),
            },
            key_format,
        }
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        assert!(config(0, KeyFormat::Concatenated).validate().is_err());
        assert!(config(8080, KeyFormat::Concatenated).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_delimiter() {
        assert!(config(8080, KeyFormat::Delimited(String::new()))
            .validate()
            .is_err());
        assert!(config(8080, KeyFormat::Delimited(":".to_string()))
            .validate()
            .is_ok());
    }
}
