use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Extra origin allowed by CORS; every origin is allowed when unset.
    pub app_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "menus.db".into()),
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS", "5")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed("PORT", "8080")?,
            app_base_url: env::var("APP_BASE_URL").ok().filter(|s| !s.is_empty()),
        })
    }
}

fn parsed<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.into())
        .parse()
        .with_context(|| format!("Invalid value for env var: {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_falls_back_to_default() {
        let v: u16 = parsed("MENU_CALENDAR_TEST_UNSET_PORT", "8080").unwrap();
        assert_eq!(v, 8080);
    }

    #[test]
    fn parsed_names_the_bad_variable() {
        env::set_var("MENU_CALENDAR_TEST_BAD_PORT", "eighty");
        let err = parsed::<u16>("MENU_CALENDAR_TEST_BAD_PORT", "8080").unwrap_err();
        assert!(err.to_string().contains("MENU_CALENDAR_TEST_BAD_PORT"));
    }
}
