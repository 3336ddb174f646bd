use clap::Parser;
use log::info;
use trackdrop::clients::{
    SpotifyClient,
    errors::{Error, Result},
};
use trackdrop::config::{Config, ConfigBuilder};
use trackdrop::playlist::PlaylistAdder;
use trackdrop::resolver::{CurrentOutcome, Resolved, Resolver};
use trackdrop::status::StatusLine;

#[derive(Parser)]
#[command(name = "trackdrop")]
#[command(
    about = "Add the current Spotify track, or a searched one, to a playlist",
    long_about = None
)]
// Every argument is a title or artist and every run ends in a status line
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Track title to search for
    #[arg(allow_hyphen_values = true)]
    title: Option<String>,
    /// Artist name narrowing the search
    #[arg(allow_hyphen_values = true)]
    artist: Option<String>,
    /// Ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<String>,
}

pub async fn run() -> StatusLine {
    let cli = Cli::parse();

    match cli.title {
        Some(title) => {
            let artist = cli.artist.unwrap_or_default();
            StatusLine::from_search(search_and_add(&title, &artist).await)
        }
        None => StatusLine::from_current(add_current().await),
    }
}

async fn connect() -> Result<(Config, SpotifyClient)> {
    info!("Building config ...");
    let config = ConfigBuilder::from_env().build()?;
    let spotify = SpotifyClient::from_config(&config);
    info!("Authorizing client ...");
    // CLI prompt may be shown here when no valid token is cached
    spotify.authorize_client().await?;
    Ok((config, spotify))
}

async fn search_and_add(title: &str, artist: &str) -> Result<Resolved> {
    // Rejected before any credentials are needed
    if title.trim().is_empty() {
        return Err(Error::MissingTitle);
    }
    let (config, spotify) = connect().await?;
    let adder = PlaylistAdder::new(&spotify, &config.playlist_id).with_max_pages(config.max_pages);
    Resolver::new(&spotify, adder).by_search(title, artist).await
}

async fn add_current() -> Result<CurrentOutcome> {
    let (config, spotify) = connect().await?;
    let adder = PlaylistAdder::new(&spotify, &config.playlist_id).with_max_pages(config.max_pages);
    Resolver::new(&spotify, adder).from_current().await
}
