mod common;

use common::{FakeService, PLAYLIST, track};
use trackdrop::clients::{entities::PlayingItem, errors::Error};
use trackdrop::playlist::{AddOutcome, PlaylistAdder};
use trackdrop::resolver::{CurrentOutcome, FREE_TEXT_LIMIT, Resolver, STRUCTURED_LIMIT};
use trackdrop::status::StatusLine;

fn resolver(service: &FakeService) -> Resolver<'_, FakeService> {
    Resolver::new(service, PlaylistAdder::new(service, PLAYLIST))
}

#[tokio::test]
async fn paused_playback_is_not_playing() {
    let service = FakeService::default().playing(
        false,
        Some(PlayingItem::Track(track("a", "Song", &["Band"], 1))),
    );

    let line = StatusLine::from_current(resolver(&service).from_current().await);

    assert_eq!(line.to_string(), "CURR_NO: not playing");
    assert!(service.page_requests.borrow().is_empty());
}

#[tokio::test]
async fn nothing_reported_is_not_playing() {
    let service = FakeService::default();
    let outcome = resolver(&service).from_current().await.unwrap();
    assert_eq!(outcome, CurrentOutcome::NotPlaying);
}

#[tokio::test]
async fn episode_is_not_a_song() {
    let service =
        FakeService::default().playing(true, Some(PlayingItem::Other("episode".into())));

    let line = StatusLine::from_current(resolver(&service).from_current().await);

    assert_eq!(line.to_string(), "CURR_NO: podcast/audiobook, no song");
    assert!(service.appended.borrow().is_empty());
}

#[tokio::test]
async fn playing_without_item_is_not_a_song() {
    let service = FakeService::default().playing(true, None);
    let outcome = resolver(&service).from_current().await.unwrap();
    assert_eq!(outcome, CurrentOutcome::NotTrack);
}

#[tokio::test]
async fn current_track_is_added() {
    let service = FakeService::with_playlist(["x"]).playing(
        true,
        Some(PlayingItem::Track(track(
            "4u7EnebtmKWzUH433cf5Qv",
            "Bohemian Rhapsody",
            &["Queen"],
            90,
        ))),
    );

    let line = StatusLine::from_current(resolver(&service).from_current().await);

    assert_eq!(
        line.to_string(),
        "CURR_OK: Bohemian Rhapsody Queen | added to playlist"
    );
    assert_eq!(line.code(), 0);
    assert_eq!(
        *service.appended.borrow(),
        vec!["4u7EnebtmKWzUH433cf5Qv".to_string()]
    );
}

#[tokio::test]
async fn blank_title_is_rejected_whatever_the_artist() {
    for (title, artist) in [("", ""), ("   ", "Queen"), ("\t", "")] {
        let service = FakeService::default();
        let err = resolver(&service).by_search(title, artist).await.unwrap_err();
        assert!(matches!(err, Error::MissingTitle));
        assert!(service.searches.borrow().is_empty());
    }
}

#[tokio::test]
async fn structured_match_is_added() {
    let service = FakeService::default().search_returns(vec![track(
        "7pKfPomDEeI4TPT6EOYjn9",
        "Imagine",
        &["John Lennon"],
        80,
    )]);

    let line = StatusLine::from_search(resolver(&service).by_search("Imagine", "").await);

    assert_eq!(
        line.to_string(),
        "SHZ_OK: Imagine John Lennon | added to playlist"
    );
    assert_eq!(
        *service.searches.borrow(),
        vec![("track:\"Imagine\"".to_string(), STRUCTURED_LIMIT)]
    );
    assert_eq!(service.appended.borrow().len(), 1);
}

#[tokio::test]
async fn free_text_fallback_runs_before_giving_up() {
    let service = FakeService::default();

    let err = resolver(&service)
        .by_search("  Imagine ", " John Lennon ")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "no match for: Imagine John Lennon");
    assert_eq!(
        *service.searches.borrow(),
        vec![
            (
                "track:\"Imagine\" artist:\"John Lennon\"".to_string(),
                STRUCTURED_LIMIT
            ),
            ("Imagine John Lennon".to_string(), FREE_TEXT_LIMIT),
        ]
    );
}

#[tokio::test]
async fn no_match_without_artist_names_only_the_title() {
    let service = FakeService::default();
    let line = StatusLine::from_search(resolver(&service).by_search("Imagine", "").await);
    assert_eq!(line.to_string(), "SHZ_FAIL: no match for: Imagine");
    assert_eq!(line.code(), 1);
}

#[tokio::test]
async fn fallback_results_pick_most_popular() {
    let service = FakeService::default()
        .search_returns(vec![])
        .search_returns(vec![
            track("low", "Imagine", &["Cover Band"], 10),
            track("top", "Imagine", &["John Lennon"], 95),
            track("mid", "Imagine", &["Tribute"], 40),
        ]);

    let resolved = resolver(&service).by_search("Imagine", "").await.unwrap();

    assert_eq!(resolved.track.id.as_deref(), Some("top"));
    assert_eq!(resolved.outcome, AddOutcome::Added);
    assert_eq!(*service.appended.borrow(), vec!["top".to_string()]);
}

#[tokio::test]
async fn searched_track_already_in_playlist() {
    let service = FakeService::with_playlist(["top"])
        .search_returns(vec![track("top", "Imagine", &["John Lennon"], 95)]);

    let line = StatusLine::from_search(resolver(&service).by_search("Imagine", "Lennon").await);

    assert_eq!(
        line.to_string(),
        "SHZ_OK: Imagine John Lennon | in playlist already"
    );
    assert!(service.appended.borrow().is_empty());
}

#[tokio::test]
async fn match_without_id_reports_no_track_id() {
    let mut local = track("ignored", "Imagine", &["Someone"], 5);
    local.id = None;
    let service = FakeService::default().search_returns(vec![local]);

    let line = StatusLine::from_search(resolver(&service).by_search("Imagine", "").await);

    assert_eq!(line.to_string(), "SHZ_OK: Imagine Someone | no track id");
    assert_eq!(line.code(), 1);
    assert!(service.page_requests.borrow().is_empty());
}
