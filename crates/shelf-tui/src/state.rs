//! Application state composition.
//!
//! The top-level state is the identity gate: until the session store has
//! answered once, the app is `Loading` and renders a neutral progress
//! indicator only. After the first signal the gate switches between the
//! sign-in form and the dashboard and never returns to `Loading`.
//!
//! ```text
//! AppState
//! ├── gate: GateState
//! │   ├── Loading
//! │   ├── SignedOut(SignInState)    (sign-in form)
//! │   └── SignedIn(DashboardState)  (search-and-table view)
//! └── spinner_frame
//! ```

use shelf_core::config::Config;

use crate::signin::SignInState;
use crate::table::DashboardState;

/// Which top-level view is active.
pub enum GateState {
    /// Waiting for the session store's first answer.
    Loading,
    /// No session; the sign-in form is shown.
    SignedOut(SignInState),
    /// A session is present; the dashboard is shown.
    SignedIn(DashboardState),
}

/// Combined application state for the TUI.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Identity gate: which view is active.
    pub gate: GateState,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Page size the dashboard starts with (from config).
    pub default_page_size: u32,
}

impl AppState {
    /// Creates the initial state: gate loading, nothing rendered yet.
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            gate: GateState::Loading,
            spinner_frame: 0,
            default_page_size: config.catalog.page_size,
        }
    }

    /// Returns true while an async operation should keep the tick rate high.
    pub fn is_busy(&self) -> bool {
        match &self.gate {
            GateState::Loading => true,
            GateState::SignedOut(form) => form.submitting,
            GateState::SignedIn(dash) => dash.fetch_in_flight,
        }
    }
}
