use std::{env, fs, io, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_API_ADDRESS: &str = "https://api.telegram.org";

/// Headroom added on top of the long-poll timeout for the HTTP request timeout.
const POLL_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// Client configuration.
///
/// The token and an optional alternate API address are the only required
/// inputs; the rest tunes polling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bot_token: String,
    pub api_address: String,
    pub request_timeout: Duration,
    pub poll_limit: u32,
    pub poll_timeout: Duration,
}

impl Config {
    pub fn new(bot_token: impl Into<String>) -> Self {
        let poll_timeout = Duration::from_secs(30);
        Self {
            bot_token: bot_token.into(),
            api_address: DEFAULT_API_ADDRESS.to_string(),
            request_timeout: poll_timeout + POLL_TIMEOUT_MARGIN,
            poll_limit: 100,
            poll_timeout,
        }
    }

    pub fn with_api_address(mut self, api_address: impl Into<String>) -> Self {
        self.api_address = api_address.into();
        self
    }

    /// Load from the process environment, reading `.env` first if present.
    ///
    /// An unreadable `.env` (other than a missing one) is an [`Error::Io`].
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"))?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let mut cfg = Self::new(bot_token.trim());

        if let Some(addr) = lookup("TELEGRAM_API_ADDRESS").and_then(non_empty) {
            cfg.api_address = addr.trim().trim_end_matches('/').to_string();
        }
        if let Some(limit) = parse_num::<u32>(&lookup, "TELEGRAM_POLL_LIMIT")? {
            cfg.poll_limit = limit.clamp(1, 100);
        }
        if let Some(secs) = parse_num::<u64>(&lookup, "TELEGRAM_POLL_TIMEOUT_SECS")? {
            cfg.poll_timeout = Duration::from_secs(secs);
        }
        cfg.request_timeout = match parse_num::<u64>(&lookup, "TELEGRAM_REQUEST_TIMEOUT_MS")? {
            Some(ms) => Duration::from_millis(ms),
            None => cfg.poll_timeout + POLL_TIMEOUT_MARGIN,
        };

        // A request timeout shorter than the long poll would abort every idle poll.
        if cfg.request_timeout <= cfg.poll_timeout {
            tracing::warn!(
                request_timeout_ms = cfg.request_timeout.as_millis() as u64,
                poll_timeout_secs = cfg.poll_timeout.as_secs(),
                "request timeout does not exceed poll timeout; raising it"
            );
            cfg.request_timeout = cfg.poll_timeout + POLL_TIMEOUT_MARGIN;
        }

        Ok(cfg)
    }

    pub fn poll_timeout_secs(&self) -> u32 {
        u32::try_from(self.poll_timeout.as_secs()).unwrap_or(u32::MAX)
    }
}

fn parse_num<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a number, got {raw:?}")))
}

/// Export `KEY=value` pairs from `path` without overriding the environment.
///
/// A missing file is fine; any other read failure is reported.
fn load_dotenv_if_present(path: &Path) -> Result<()> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::Io(e)),
    };
    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_none() {
            env::set_var(key, val);
        }
    }
    Ok(())
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim(), unquote(v.trim())))
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn unquote(v: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| v.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(v)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
