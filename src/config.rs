//! Runtime configuration.
//!
//! Values come from the process environment (after `.env` is loaded by the
//! binary). Everything is validated up front so a placeholder credential or a
//! malformed playlist reference fails before any request is made.

use std::path::PathBuf;
use std::time::Duration;

use crate::clients::{
    errors::{Error, Result},
    retry::RetryPolicy,
};
use crate::playlist::MAX_PAGES_LIMIT;

pub const CLIENT_ID_VAR: &str = "RSPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "RSPOTIFY_CLIENT_SECRET";
pub const REDIRECT_URI_VAR: &str = "RSPOTIFY_REDIRECT_URI";
pub const PLAYLIST_ID_VAR: &str = "TRACKDROP_PLAYLIST_ID";
pub const CACHE_PATH_VAR: &str = "TRACKDROP_CACHE_PATH";
pub const MAX_PAGES_VAR: &str = "TRACKDROP_MAX_PAGES";
pub const MAX_RETRIES_VAR: &str = "TRACKDROP_MAX_RETRIES";
pub const RETRY_BACKOFF_MS_VAR: &str = "TRACKDROP_RETRY_BACKOFF_MS";

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8765/callback";
pub const DEFAULT_MAX_PAGES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Bare playlist id, already extracted from any URI or URL form.
    pub playlist_id: String,
    pub cache_path: PathBuf,
    /// Upper bound on pages fetched by one membership check.
    pub max_pages: usize,
    pub retry: RetryPolicy,
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    playlist_id: Option<String>,
    cache_path: Option<PathBuf>,
    max_pages: Option<String>,
    max_retries: Option<String>,
    retry_backoff_ms: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every known variable through `lookup`; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            client_id: lookup(CLIENT_ID_VAR),
            client_secret: lookup(CLIENT_SECRET_VAR),
            redirect_uri: lookup(REDIRECT_URI_VAR),
            playlist_id: lookup(PLAYLIST_ID_VAR),
            cache_path: lookup(CACHE_PATH_VAR).map(PathBuf::from),
            max_pages: lookup(MAX_PAGES_VAR),
            max_retries: lookup(MAX_RETRIES_VAR),
            retry_backoff_ms: lookup(RETRY_BACKOFF_MS_VAR),
        }
    }

    pub fn client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(value.into());
        self
    }

    pub fn client_secret(mut self, value: impl Into<String>) -> Self {
        self.client_secret = Some(value.into());
        self
    }

    pub fn playlist_id(mut self, value: impl Into<String>) -> Self {
        self.playlist_id = Some(value.into());
        self
    }

    pub fn cache_path(mut self, value: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(value.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        let client_id = required(CLIENT_ID_VAR, self.client_id)?;
        let client_secret = required(CLIENT_SECRET_VAR, self.client_secret)?;
        let playlist_id = parse_playlist_ref(&required(PLAYLIST_ID_VAR, self.playlist_id)?)?;

        let redirect_uri = match self.redirect_uri {
            Some(uri) if !uri.trim().is_empty() => uri.trim().to_string(),
            _ => DEFAULT_REDIRECT_URI.to_string(),
        };

        let cache_path = self.cache_path.unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
                .join(".trackdrop_token_cache")
        });

        let max_pages = parse_number(MAX_PAGES_VAR, self.max_pages, DEFAULT_MAX_PAGES)?;
        if !(1..=MAX_PAGES_LIMIT).contains(&max_pages) {
            return Err(Error::ConfigurationError(format!(
                "{MAX_PAGES_VAR} must be between 1 and {MAX_PAGES_LIMIT}"
            )));
        }

        let defaults = RetryPolicy::default();
        let base_ms = u64::try_from(defaults.base_delay.as_millis()).unwrap_or(u64::MAX);
        let retry = RetryPolicy {
            max_retries: parse_number(MAX_RETRIES_VAR, self.max_retries, defaults.max_retries)?,
            base_delay: Duration::from_millis(parse_number(
                RETRY_BACKOFF_MS_VAR,
                self.retry_backoff_ms,
                base_ms,
            )?),
            max_delay: defaults.max_delay,
        };

        Ok(Config {
            client_id,
            client_secret,
            redirect_uri,
            playlist_id,
            cache_path,
            max_pages,
            retry,
        })
    }
}

fn required(key: &str, value: Option<String>) -> Result<String> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(Error::ConfigurationError(format!(
            "{key} is not set. Put it in the environment or in a .env file."
        )));
    }
    if is_placeholder(&value) {
        return Err(Error::ConfigurationError(format!(
            "{key} still holds the placeholder {value:?}"
        )));
    }
    Ok(value)
}

fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.contains("replace me")
        || lower.contains("replace_me")
        || lower.contains("changeme")
        || (lower.starts_with('<') && lower.ends_with('>'))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::ConfigurationError(format!("{key} is not a valid number: {raw:?}"))),
    }
}

/// Accepts a bare id, a `spotify:playlist:` URI or an `open.spotify.com` link.
pub fn parse_playlist_ref(value: &str) -> Result<String> {
    let value = value.trim();
    let id = if let Some(rest) = value.strip_prefix("spotify:playlist:") {
        rest
    } else if let Some((_, rest)) = value.split_once("/playlist/") {
        rest.split(['?', '/', '#']).next().unwrap_or_default()
    } else {
        value
    };

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::ConfigurationError(format!(
            "{value:?} is not a Spotify playlist id, URI or URL"
        )));
    }
    Ok(id.to_string())
}
