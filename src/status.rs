//! The single line printed to stdout, and the exit code that goes with it.
//!
//! The prefixes (`SHZ_OK`, `SHZ_FAIL`, `CURR_OK`, `CURR_NO`, `CURR_FAIL`) are
//! parsed by downstream scripts and must not change.

use std::fmt;
use std::process::ExitCode;

use crate::clients::errors::{Error, Result};
use crate::resolver::{CurrentOutcome, Resolved};

#[derive(Debug)]
pub enum StatusLine {
    SearchOk(Resolved),
    SearchFail(Error),
    CurrentOk(Resolved),
    NotPlaying,
    NotTrack,
    CurrentFail(Error),
}

impl StatusLine {
    pub fn from_search(result: Result<Resolved>) -> Self {
        match result {
            Ok(resolved) => StatusLine::SearchOk(resolved),
            Err(err) => StatusLine::SearchFail(err),
        }
    }

    pub fn from_current(result: Result<CurrentOutcome>) -> Self {
        match result {
            Ok(CurrentOutcome::Resolved(resolved)) => StatusLine::CurrentOk(resolved),
            Ok(CurrentOutcome::NotPlaying) => StatusLine::NotPlaying,
            Ok(CurrentOutcome::NotTrack) => StatusLine::NotTrack,
            Err(err) => StatusLine::CurrentFail(err),
        }
    }

    /// 0 on success or an informational line, 1 for a handled failure, 2 when
    /// the service or configuration failed.
    pub fn code(&self) -> u8 {
        match self {
            StatusLine::SearchOk(resolved) | StatusLine::CurrentOk(resolved) => {
                u8::from(!resolved.outcome.ok())
            }
            StatusLine::NotPlaying | StatusLine::NotTrack => 0,
            StatusLine::SearchFail(err) | StatusLine::CurrentFail(err) => {
                if err.is_service() {
                    2
                } else {
                    1
                }
            }
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::SearchOk(resolved) => write_resolved(f, "SHZ_OK", resolved),
            StatusLine::SearchFail(err) => write!(f, "SHZ_FAIL: {err}"),
            StatusLine::CurrentOk(resolved) => write_resolved(f, "CURR_OK", resolved),
            StatusLine::NotPlaying => write!(f, "CURR_NO: not playing"),
            StatusLine::NotTrack => write!(f, "CURR_NO: podcast/audiobook, no song"),
            StatusLine::CurrentFail(err) => write!(f, "CURR_FAIL: {err}"),
        }
    }
}

fn write_resolved(f: &mut fmt::Formatter<'_>, prefix: &str, resolved: &Resolved) -> fmt::Result {
    write!(
        f,
        "{prefix}: {} {} | {}",
        resolved.track.name,
        resolved.track.artist_names(),
        resolved.outcome.message()
    )
}
