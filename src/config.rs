use crate::models::AuthorDeletePolicy;
use anyhow::Context;
use std::str::FromStr;

#[derive(Debug)]
pub struct Config {
    database_url: String,
    server_port: u16,
    author_delete_policy: AuthorDeletePolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = load_env("DATABASE_URL")?;
        let server_port = load_env("SERVER_PORT")?;
        let author_delete_policy =
            load_env_or("AUTHOR_DELETE_POLICY", AuthorDeletePolicy::default())?;
        Ok(Self {
            database_url,
            server_port,
            author_delete_policy,
        })
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub const fn server_port(&self) -> u16 {
        self.server_port
    }

    #[must_use]
    pub const fn author_delete_policy(&self) -> AuthorDeletePolicy {
        self.author_delete_policy
    }
}

fn load_env<T>(key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let val =
        std::env::var(key).with_context(|| format!("Failed to load environment variable {key}"))?;
    parse_env(key, &val)
}

fn load_env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(val) => parse_env(key, &val),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to load environment variable {key}"))
        }
    }
}

fn parse_env<T>(key: &str, val: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    val.parse::<T>()
        .with_context(|| format!("Failed to parse environment variable {key}"))
}
