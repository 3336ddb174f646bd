//! Trackdrop - add the track you are listening to into a Spotify playlist
//!
//! The track is either the one currently playing on the user's account or the
//! best search match for a title/artist pair. Adding is idempotent: a track that
//! is already in the playlist is left alone.

/// Client modules for interacting with the music service
pub mod clients;
/// Environment-driven configuration
pub mod config;
/// Playlist membership check and idempotent add
pub mod playlist;
/// Current-track and search based track resolution
pub mod resolver;
/// Status line output and exit codes
pub mod status;
