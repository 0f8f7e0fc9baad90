//! UI event types delivered to the reducer.

use std::path::PathBuf;

use shelf_core::auth::{Session, SessionSignal};
use shelf_core::catalog::SearchPage;

/// Events processed by the reducer.
///
/// Terminal input and ticks come from the event loop; everything else
/// arrives through the runtime's inbox channel from spawned tasks.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (drives the spinner and render cadence).
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// A session signal from the store subscription.
    Session(SessionSignal),
    /// Result of an asynchronous sign-in attempt.
    SignInFinished(Result<Session, String>),
    /// Result of a catalog fetch, tagged with the generation that issued it.
    FetchFinished {
        generation: u64,
        result: Result<SearchPage, String>,
    },
    /// Result of a CSV export.
    ExportFinished(Result<PathBuf, String>),
}
