//! Server configuration from defaults, environment variables and CLI flags
//! (CLI overrides environment, environment overrides defaults).

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use crate::identity::cookie::{is_valid_cookie_name, DEFAULT_SESSION_COOKIE};

pub const ENV_HTTP_HOST: &str = "MEMBERLOGIN_HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "MEMBERLOGIN_HTTP_PORT";
pub const ENV_COOKIE_NAME: &str = "MEMBERLOGIN_COOKIE_NAME";
pub const ENV_SESSION_TTL_SECS: &str = "MEMBERLOGIN_SESSION_TTL_SECS";
pub const ENV_SEED_DEMO: &str = "MEMBERLOGIN_SEED_DEMO";

pub const USAGE: &str = "memberlogin\n\nUSAGE:\n  memberlogin [--host ADDR] [--http-port N] [--cookie-name NAME] [--session-ttl SECS] [--no-seed]\n\nOPTIONS:\n  --host ADDR          Bind address (env: MEMBERLOGIN_HTTP_HOST, default 127.0.0.1)\n  --http-port N        HTTP port (env: MEMBERLOGIN_HTTP_PORT, default 8080)\n  --cookie-name NAME   Session cookie name (env: MEMBERLOGIN_COOKIE_NAME, default mySessionId)\n  --session-ttl SECS   Evict sessions older than SECS; 0 disables (env: MEMBERLOGIN_SESSION_TTL_SECS)\n  --no-seed            Do not register the demo member (env: MEMBERLOGIN_SEED_DEMO=false)\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("invalid cookie name: {0:?}")]
    InvalidCookieName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub http_host: IpAddr,
    pub http_port: u16,
    pub cookie_name: String,
    pub session_ttl: Option<Duration>,
    pub seed_demo_member: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: IpAddr::from([127, 0, 0, 1]),
            http_port: 8080,
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            session_ttl: None,
            seed_demo_member: true,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue { key, value: raw.to_string() })
}

// Zero disables age-based eviction
fn parse_ttl(key: &'static str, raw: &str) -> Result<Option<Duration>, ConfigError> {
    let secs: u64 = parse_value(key, raw)?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

fn flag_value<'a>(args: &'a [String], flag: &'static str) -> Result<Option<&'a str>, ConfigError> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == flag {
            return match args.get(i + 1) {
                Some(v) if !v.starts_with("--") => Ok(Some(v.as_str())),
                _ => Err(ConfigError::MissingValue(flag)),
            };
        }
        i += 1;
    }
    Ok(None)
}

pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

impl ServerConfig {
    /// Resolve configuration from process environment and command-line arguments.
    pub fn load(args: &[String]) -> Result<Self, ConfigError> {
        Self::from_sources(args, |k| std::env::var(k).ok())
    }

    pub fn from_sources<F>(args: &[String], env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = env(ENV_HTTP_HOST) { cfg.http_host = parse_value(ENV_HTTP_HOST, &v)?; }
        if let Some(v) = env(ENV_HTTP_PORT) { cfg.http_port = parse_value(ENV_HTTP_PORT, &v)?; }
        if let Some(v) = env(ENV_COOKIE_NAME) { cfg.cookie_name = v; }
        if let Some(v) = env(ENV_SESSION_TTL_SECS) { cfg.session_ttl = parse_ttl(ENV_SESSION_TTL_SECS, &v)?; }
        if let Some(v) = env(ENV_SEED_DEMO) {
            cfg.seed_demo_member = parse_bool(&v)
                .ok_or(ConfigError::InvalidValue { key: ENV_SEED_DEMO, value: v.clone() })?;
        }

        if let Some(v) = flag_value(args, "--host")? { cfg.http_host = parse_value("--host", v)?; }
        if let Some(v) = flag_value(args, "--http-port")? { cfg.http_port = parse_value("--http-port", v)?; }
        if let Some(v) = flag_value(args, "--cookie-name")? { cfg.cookie_name = v.to_string(); }
        if let Some(v) = flag_value(args, "--session-ttl")? { cfg.session_ttl = parse_ttl("--session-ttl", v)?; }
        if has_flag(args, "--no-seed") { cfg.seed_demo_member = false; }

        if !is_valid_cookie_name(&cfg.cookie_name) {
            return Err(ConfigError::InvalidCookieName(cfg.cookie_name));
        }
        Ok(cfg)
    }

    pub fn bind_addr(&self) -> SocketAddr { SocketAddr::new(self.http_host, self.http_port) }
}
