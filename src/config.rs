use thiserror::Error;

pub const TOKEN_VAR: &str = "TELOXIDE_TOKEN";
pub const DATABASE_VAR: &str = "QUIZ_BOT_DB";
pub const DEFAULT_DATABASE: &str = "db.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} is empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    /// SQLite file holding every chat's dialogue state.
    pub database_path: String,
}

impl Config {
    /// Reads the process environment; call after `.env` has been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = var(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        if token.trim().is_empty() {
            return Err(ConfigError::Empty(TOKEN_VAR));
        }

        let database_path = match var(DATABASE_VAR) {
            Some(path) if path.trim().is_empty() => return Err(ConfigError::Empty(DATABASE_VAR)),
            Some(path) => path,
            None => DEFAULT_DATABASE.to_string(),
        };

        Ok(Self {
            token,
            database_path,
        })
    }
}
