use anyhow::{bail, Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = get("DATABASE_URL")?;
        let bind_addr =
            std::env::var("INTAKE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        // Tiny sanity checks (fail fast, fail loud)
        if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
            bail!("DATABASE_URL must start with postgres:// or postgresql://");
        }

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}

fn get(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing required env var: {key}"))
}
