use log::{debug, info};

use crate::clients::{
    errors::{Error, Result},
    service::MusicService,
};
use crate::config::DEFAULT_MAX_PAGES;

/// Items requested per playlist page.
pub const PAGE_SIZE: u32 = 100;

/// Most pages whose offsets still fit the API's `u32` offset parameter.
pub const MAX_PAGES_LIMIT: usize = (u32::MAX / PAGE_SIZE) as usize;

/// What an add attempt ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    NoTrackId,
    AlreadyPresent,
    Added,
}

impl AddOutcome {
    pub fn ok(self) -> bool {
        !matches!(self, AddOutcome::NoTrackId)
    }

    pub fn message(self) -> &'static str {
        match self {
            AddOutcome::NoTrackId => "no track id",
            AddOutcome::AlreadyPresent => "in playlist already",
            AddOutcome::Added => "added to playlist",
        }
    }
}

/// Idempotent "add track" against one target playlist.
pub struct PlaylistAdder<'a, S> {
    service: &'a S,
    playlist_id: &'a str,
    max_pages: usize,
}

impl<'a, S: MusicService> PlaylistAdder<'a, S> {
    pub fn new(service: &'a S, playlist_id: &'a str) -> Self {
        PlaylistAdder {
            service,
            playlist_id,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Clamped to [`MAX_PAGES_LIMIT`].
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.min(MAX_PAGES_LIMIT);
        self
    }

    /// Pages through the playlist until `track_id` shows up or the listing ends.
    ///
    /// Stops at the first match without requesting later pages. Fails with
    /// [`Error::PaginationExhausted`] if the service keeps signalling more
    /// pages past `max_pages`.
    pub async fn contains(&self, track_id: &str) -> Result<bool> {
        let mut offset: u32 = 0;
        for page_number in 0..self.max_pages {
            let page = self
                .service
                .playlist_page(self.playlist_id, PAGE_SIZE, offset)
                .await?;

            if page
                .track_ids
                .iter()
                .any(|id| id.as_deref() == Some(track_id))
            {
                debug!("Found {track_id} on page {page_number}");
                return Ok(true);
            }
            if !page.has_next {
                return Ok(false);
            }
            offset = offset.checked_add(PAGE_SIZE).ok_or_else(|| self.exhausted(page_number + 1))?;
        }

        Err(self.exhausted(self.max_pages))
    }

    fn exhausted(&self, pages: usize) -> Error {
        Error::PaginationExhausted {
            playlist_id: self.playlist_id.to_string(),
            pages,
        }
    }

    pub async fn add(&self, track_id: Option<&str>) -> Result<AddOutcome> {
        let Some(track_id) = track_id.filter(|id| !id.is_empty()) else {
            return Ok(AddOutcome::NoTrackId);
        };

        if self.contains(track_id).await? {
            debug!("{track_id} is already in playlist {}", self.playlist_id);
            return Ok(AddOutcome::AlreadyPresent);
        }

        self.service
            .append_to_playlist(self.playlist_id, track_id)
            .await?;
        info!("Added {track_id} to playlist {}", self.playlist_id);
        Ok(AddOutcome::Added)
    }
}
