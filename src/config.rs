//! Environment-driven configuration.

use std::net::SocketAddr;

use anyhow::{Context, Result};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_BANK_OK_URL: &str = "http://localhost:8081";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the API listens on (`BUDGET_OK_ADDR`)
    pub addr: SocketAddr,
    /// SQLite database URL (`DATABASE_URL`); storage is in-memory when unset
    pub database_url: Option<String>,
    /// Base URL of the external Bank OK service (`BANK_OK_URL`)
    pub bank_ok_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = lookup("BUDGET_OK_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .with_context(|| format!("invalid BUDGET_OK_ADDR '{}'", addr))?;

        Ok(Self {
            addr,
            database_url: lookup("DATABASE_URL"),
            bank_ok_url: lookup("BANK_OK_URL").unwrap_or_else(|| DEFAULT_BANK_OK_URL.to_string()),
        })
    }
}
