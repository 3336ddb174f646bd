use std::future::Future;

use log::debug;

use crate::clients::{
    entities::{Artist, Playback, PlayingItem, PlaylistPage, Track},
    errors::{Error, Result},
    retry::{RetryPolicy, with_retry, with_retry_when},
    service::MusicService,
};
use crate::config::Config;
use rspotify::{
    AuthCodeSpotify, Config as SpotifyConfig, Credentials, OAuth,
    model::{
        AdditionalType, CurrentlyPlayingContext, FullTrack, PlayableId, PlayableItem, PlaylistId,
        PlaylistItem, SearchResult, SearchType, TrackId,
    },
    prelude::*,
    scopes,
};

impl From<FullTrack> for Track {
    fn from(f: FullTrack) -> Track {
        Track {
            id: f.id.map(|id| id.id().to_string()),
            name: f.name,
            artists: f
                .artists
                .into_iter()
                .map(|a| Artist { name: a.name })
                .collect(),
            popularity: f.popularity,
        }
    }
}

impl From<CurrentlyPlayingContext> for Playback {
    fn from(ctx: CurrentlyPlayingContext) -> Playback {
        let item = match ctx.item {
            Some(PlayableItem::Track(track)) => Some(PlayingItem::Track(Track::from(track))),
            Some(_) => {
                let kind: &'static str = ctx.currently_playing_type.into();
                Some(PlayingItem::Other(kind.to_string()))
            }
            None => None,
        };
        Playback {
            is_playing: ctx.is_playing,
            item,
        }
    }
}

/// Appends are not idempotent: after a 5xx the track may already be in the
/// playlist, so only failures the service provably never applied are retried.
async fn append_with_retry<F, Fut>(policy: &RetryPolicy, call: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    with_retry_when(policy, "playlist append", Error::was_not_processed, call).await
}

fn playlist_item_track_id(item: PlaylistItem) -> Option<String> {
    match item.track {
        Some(PlayableItem::Track(track)) => track.id.map(|id| id.id().to_string()),
        _ => None,
    }
}

pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
    retry: RetryPolicy,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodeSpotify, retry: RetryPolicy) -> Self {
        SpotifyClient { spotify, retry }
    }

    // Authorize the Spotify client via CLI prompt and OAuth flow
    // A valid cached token is reused (and refreshed) without prompting.
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        // This function requires the `cli` feature enabled.
        self.spotify.prompt_for_token(&url).await?;
        debug!("Spotify token ready");
        Ok(())
    }

    // Create a SpotifyClient with token caching at the configured path
    pub fn from_config(config: &Config) -> Self {
        let creds = Credentials::new(&config.client_id, &config.client_secret);
        let oauth = OAuth {
            redirect_uri: config.redirect_uri.clone(),
            scopes: scopes!(
                "user-read-currently-playing",
                "playlist-modify-public",
                "playlist-modify-private"
            ),
            ..Default::default()
        };

        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            SpotifyConfig {
                token_cached: true,
                cache_path: config.cache_path.clone(),
                ..Default::default()
            },
        );
        debug!("Using token cache at {:?}", config.cache_path);

        Self::new(spotify, config.retry)
    }
}

impl MusicService for SpotifyClient {
    async fn currently_playing(&self) -> Result<Option<Playback>> {
        let additional_types = [AdditionalType::Track, AdditionalType::Episode];
        let additional_types = &additional_types;
        let context = with_retry(&self.retry, "currently playing", || async move {
            self.spotify
                .current_playing(None, Some(additional_types))
                .await
                .map_err(Error::from)
        })
        .await?;
        Ok(context.map(Playback::from))
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        debug!("Searching tracks for {query:?} (limit {limit})");
        let result = with_retry(&self.retry, "search", || async move {
            self.spotify
                .search(query, SearchType::Track, None, None, Some(limit), None)
                .await
                .map_err(Error::from)
        })
        .await?;

        match result {
            SearchResult::Tracks(page) => Ok(page.items.into_iter().map(Track::from).collect()),
            other => Err(Error::UnexpectedResponse(format!(
                "track search returned {other:?}"
            ))),
        }
    }

    async fn playlist_page(&self, playlist_id: &str, limit: u32, offset: u32) -> Result<PlaylistPage> {
        let playlist = PlaylistId::from_id_or_uri(playlist_id)?;
        let playlist = &playlist;
        debug!("Fetching playlist {playlist_id} items {offset}..{}", offset.saturating_add(limit));
        let page = with_retry(&self.retry, "playlist items", || async move {
            self.spotify
                .playlist_items_manual(playlist.clone(), None, None, Some(limit), Some(offset))
                .await
                .map_err(Error::from)
        })
        .await?;

        Ok(PlaylistPage {
            has_next: page.next.is_some(),
            track_ids: page.items.into_iter().map(playlist_item_track_id).collect(),
        })
    }

    async fn append_to_playlist(&self, playlist_id: &str, track_id: &str) -> Result<()> {
        let playlist = PlaylistId::from_id_or_uri(playlist_id)?;
        let track = TrackId::from_id_or_uri(track_id)?;
        let (playlist, track) = (&playlist, &track);
        append_with_retry(&self.retry, || async move {
            self.spotify
                .playlist_add_items(playlist.clone(), [PlayableId::Track(track.clone())], None)
                .await
                .map(|_| ())
                .map_err(Error::from)
        })
        .await
    }
}
