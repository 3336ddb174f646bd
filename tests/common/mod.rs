#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use trackdrop::clients::{
    MusicService,
    entities::{Artist, Playback, PlayingItem, PlaylistPage, Track},
    errors::{Error, Result},
};

pub const PLAYLIST: &str = "37i9dQZF1DXcBWIGoYBM5M";

/// In-memory stand-in for the Spotify API that records every call.
#[derive(Default)]
pub struct FakeService {
    pub playback: Option<Playback>,
    pub playlist: RefCell<Vec<Option<String>>>,
    /// Page requests at or beyond this offset fail, as if the request timed out.
    pub poisoned_from_offset: Option<u32>,
    /// Always report another page, with nothing on it.
    pub endless: bool,
    pub search_responses: RefCell<VecDeque<Vec<Track>>>,
    pub searches: RefCell<Vec<(String, u32)>>,
    pub page_requests: RefCell<Vec<u32>>,
    pub appended: RefCell<Vec<String>>,
}

impl FakeService {
    pub fn with_playlist<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FakeService {
            playlist: RefCell::new(ids.into_iter().map(|id| Some(id.into())).collect()),
            ..Default::default()
        }
    }

    pub fn playing(mut self, is_playing: bool, item: Option<PlayingItem>) -> Self {
        self.playback = Some(Playback { is_playing, item });
        self
    }

    pub fn search_returns(self, tracks: Vec<Track>) -> Self {
        self.search_responses.borrow_mut().push_back(tracks);
        self
    }
}

impl MusicService for FakeService {
    async fn currently_playing(&self) -> Result<Option<Playback>> {
        Ok(self.playback.clone())
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        self.searches.borrow_mut().push((query.to_string(), limit));
        Ok(self.search_responses.borrow_mut().pop_front().unwrap_or_default())
    }

    async fn playlist_page(&self, playlist_id: &str, limit: u32, offset: u32) -> Result<PlaylistPage> {
        assert_eq!(playlist_id, PLAYLIST);
        self.page_requests.borrow_mut().push(offset);
        if self.poisoned_from_offset.is_some_and(|poison| offset >= poison) {
            return Err(Error::UnexpectedResponse(format!(
                "page at offset {offset} should never be requested"
            )));
        }
        if self.endless {
            return Ok(PlaylistPage {
                track_ids: vec![],
                has_next: true,
            });
        }

        let playlist = self.playlist.borrow();
        let start = (offset as usize).min(playlist.len());
        let end = (start + limit as usize).min(playlist.len());
        Ok(PlaylistPage {
            track_ids: playlist[start..end].to_vec(),
            has_next: end < playlist.len(),
        })
    }

    async fn append_to_playlist(&self, playlist_id: &str, track_id: &str) -> Result<()> {
        assert_eq!(playlist_id, PLAYLIST);
        self.appended.borrow_mut().push(track_id.to_string());
        self.playlist.borrow_mut().push(Some(track_id.to_string()));
        Ok(())
    }
}

pub fn track(id: &str, name: &str, artists: &[&str], popularity: u32) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|name| Artist {
                name: (*name).to_string(),
            })
            .collect(),
        popularity,
    }
}

/// `count` distinct filler ids, `t0`, `t1`, ...
pub fn filler(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("t{i}")).collect()
}
