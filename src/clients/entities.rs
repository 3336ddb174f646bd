#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Missing for local files and tracks Spotify cannot link.
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<Artist>,
    pub popularity: u32,
}

impl Track {
    /// Artist names as shown in status lines, e.g. `"Simon, Garfunkel"`.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One page of a playlist listing, reduced to what the membership check needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    /// `None` for removed tracks, local files and non-track items.
    pub track_ids: Vec<Option<String>>,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayingItem {
    Track(Track),
    /// Episodes, audiobook chapters and anything else that is not a song.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    pub is_playing: bool,
    pub item: Option<PlayingItem>,
}
