use std::env::VarError;
use std::fmt::{Display, Formatter};

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

#[derive(Debug, Clone)]
pub struct SystemTestConfig {
    /// Root URL of the Eventmi server under test, from `EVENTMI_BASE_URL`
    pub base_url: url::Url,
    /// Connection URL of the server's database, from `DATABASE_URL`
    pub database_url: String,
}

impl SystemTestConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine, the variables may be set in the environment directly.
        let _ = dotenvy::dotenv();
        Self::from_values(
            std::env::var("EVENTMI_BASE_URL"),
            std::env::var("DATABASE_URL"),
        )
    }

    fn from_values(
        base_url: Result<String, VarError>,
        database_url: Result<String, VarError>,
    ) -> Result<Self, ConfigError> {
        let base_url = match base_url {
            Ok(value) => value,
            Err(VarError::NotPresent) => DEFAULT_BASE_URL.to_owned(),
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidVariable(
                    "EVENTMI_BASE_URL",
                    "not unicode".to_owned(),
                ))
            }
        };
        let base_url = url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidVariable("EVENTMI_BASE_URL", e.to_string()))?;
        let database_url = database_url.map_err(|_| ConfigError::MissingVariable("DATABASE_URL"))?;
        Ok(Self {
            base_url,
            database_url,
        })
    }

    /// Absolute URL for the given path on the server under test
    pub fn url(&self, path: &str) -> Result<url::Url, ConfigError> {
        self.base_url
            .join(path)
            .map_err(|e| ConfigError::InvalidVariable("EVENTMI_BASE_URL", e.to_string()))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(&'static str),
    InvalidVariable(&'static str, String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(name) => {
                write!(f, "Environment variable {} is not set", name)
            }
            ConfigError::InvalidVariable(name, e) => {
                write!(f, "Environment variable {} is invalid: {}", name, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
