/// Typed values at the API boundary (tracks, playlist pages, playback)
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Retry with backoff for transient failures
pub mod retry;
/// The music service seam the domain logic talks to
pub mod service;
/// Spotify API client
pub mod spotify;

pub use errors::{Error, Result};
pub use service::MusicService;
pub use spotify::SpotifyClient;
