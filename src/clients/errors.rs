use std::time::Duration;

use rspotify::{ClientError, http::HttpError, model::IdError};
use thiserror::Error;

use crate::clients::retry::Retryable;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Spotify error: {0}")]
    SpotifyError(#[from] ClientError),

    #[error("Invalid Spotify id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Spotify API unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Playlist {playlist_id} still had more items after {pages} pages")]
    PaginationExhausted { playlist_id: String, pages: usize },

    #[error("no title received")]
    MissingTitle,

    #[error("no match for: {0}")]
    NoMatch(String),
}

impl Error {
    /// `false` only for the failures caused by what the user typed.
    pub fn is_service(&self) -> bool {
        !matches!(self, Error::MissingTitle | Error::NoMatch(_))
    }

    /// The service certainly did not apply the request: it was rate limited,
    /// or the connection was never established. A 5xx gives no such guarantee.
    pub fn was_not_processed(&self) -> bool {
        let Error::SpotifyError(ClientError::Http(http)) = self else {
            return false;
        };
        match http.as_ref() {
            HttpError::StatusCode(response) => response.status().as_u16() == 429,
            HttpError::Client(err) => err.is_connect(),
        }
    }
}

impl Retryable for Error {
    fn is_transient(&self) -> bool {
        let Error::SpotifyError(ClientError::Http(http)) = self else {
            return false;
        };
        match http.as_ref() {
            HttpError::StatusCode(response) => {
                matches!(response.status().as_u16(), 429 | 500 | 502 | 503 | 504)
            }
            HttpError::Client(err) => err.is_connect(),
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        let Error::SpotifyError(ClientError::Http(http)) = self else {
            return None;
        };
        let HttpError::StatusCode(response) = http.as_ref() else {
            return None;
        };
        response
            .headers()
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}
