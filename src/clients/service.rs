use crate::clients::{
    entities::{Playback, PlaylistPage, Track},
    errors::Result,
};

/// The slice of the remote music API this tool talks to.
///
/// Implemented by [`SpotifyClient`](crate::clients::SpotifyClient); tests
/// substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait MusicService {
    /// Current playback state, `None` when no device reports anything.
    async fn currently_playing(&self) -> Result<Option<Playback>>;

    /// Track search, results in the order the service ranks them.
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>>;

    async fn playlist_page(&self, playlist_id: &str, limit: u32, offset: u32) -> Result<PlaylistPage>;

    async fn append_to_playlist(&self, playlist_id: &str, track_id: &str) -> Result<()>;
}
