//! Turning "what is playing" or a title/artist pair into a playlist add.

use log::{debug, info};

use crate::clients::{
    entities::{PlayingItem, Track},
    errors::{Error, Result},
    service::MusicService,
};
use crate::playlist::{AddOutcome, PlaylistAdder};

/// Candidates requested by the field-restricted query.
pub const STRUCTURED_LIMIT: u32 = 5;
/// Candidates requested by the free-text fallback.
pub const FREE_TEXT_LIMIT: u32 = 10;

/// A resolved track and what happened when adding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub track: Track,
    pub outcome: AddOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentOutcome {
    Resolved(Resolved),
    NotPlaying,
    NotTrack,
}

pub struct Resolver<'a, S> {
    service: &'a S,
    adder: PlaylistAdder<'a, S>,
}

impl<'a, S: MusicService> Resolver<'a, S> {
    pub fn new(service: &'a S, adder: PlaylistAdder<'a, S>) -> Self {
        Resolver { service, adder }
    }

    pub async fn from_current(&self) -> Result<CurrentOutcome> {
        let playback = match self.service.currently_playing().await? {
            Some(playback) if playback.is_playing => playback,
            _ => return Ok(CurrentOutcome::NotPlaying),
        };

        let track = match playback.item {
            Some(PlayingItem::Track(track)) => track,
            Some(PlayingItem::Other(kind)) => {
                debug!("Currently playing a {kind}, not a track");
                return Ok(CurrentOutcome::NotTrack);
            }
            None => return Ok(CurrentOutcome::NotTrack),
        };

        info!("Currently playing: {} by {}", track.name, track.artist_names());
        let outcome = self.adder.add(track.id.as_deref()).await?;
        Ok(CurrentOutcome::Resolved(Resolved { track, outcome }))
    }

    /// Searches by exact title (and artist) first, then by free text, and adds
    /// the most popular candidate.
    pub async fn by_search(&self, title: &str, artist: &str) -> Result<Resolved> {
        let title = title.trim();
        let artist = artist.trim();
        if title.is_empty() {
            return Err(Error::MissingTitle);
        }

        let mut candidates = self
            .service
            .search_tracks(&structured_query(title, artist), STRUCTURED_LIMIT)
            .await?;
        if candidates.is_empty() {
            debug!("No structured match, falling back to free text");
            candidates = self
                .service
                .search_tracks(&free_text_query(title, artist), FREE_TEXT_LIMIT)
                .await?;
        }

        let Some(track) = most_popular(candidates) else {
            return Err(Error::NoMatch(free_text_query(title, artist)));
        };

        info!(
            "Best match: {} by {} (popularity {})",
            track.name,
            track.artist_names(),
            track.popularity
        );
        let outcome = self.adder.add(track.id.as_deref()).await?;
        Ok(Resolved { track, outcome })
    }
}

pub fn structured_query(title: &str, artist: &str) -> String {
    if artist.is_empty() {
        format!("track:\"{title}\"")
    } else {
        format!("track:\"{title}\" artist:\"{artist}\"")
    }
}

pub fn free_text_query(title: &str, artist: &str) -> String {
    format!("{title} {artist}").trim().to_string()
}

/// Highest popularity wins; among equals the earliest candidate is kept.
pub fn most_popular(candidates: Vec<Track>) -> Option<Track> {
    candidates
        .into_iter()
        .reduce(|best, next| if next.popularity > best.popularity { next } else { best })
}
