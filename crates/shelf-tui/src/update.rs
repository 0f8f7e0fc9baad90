//! Top-level reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use shelf_core::auth::SessionSignal;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, GateState};
use crate::table::DashboardState;
use crate::{signin, table};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(state, term_event),
        UiEvent::Session(signal) => {
            apply_session_signal(state, signal);
            vec![]
        }
        UiEvent::SignInFinished(result) => {
            // The gate may already have moved on (the store signal can land
            // first); only an open form cares about the outcome.
            if let GateState::SignedOut(form) = &mut state.gate {
                signin::handle_sign_in_result(form, &result);
            }
            vec![]
        }
        UiEvent::FetchFinished { generation, result } => {
            // Results for an unmounted view are dropped here.
            if let GateState::SignedIn(dash) = &mut state.gate {
                dash.apply_fetch(generation, result);
            }
            vec![]
        }
        UiEvent::ExportFinished(result) => {
            if let GateState::SignedIn(dash) = &mut state.gate {
                dash.status = Some(match result {
                    Ok(path) => format!("Exported to {}", path.display()),
                    Err(message) => format!("Export failed: {message}"),
                });
            }
            vec![]
        }
    }
}

/// Applies a session signal to the gate.
///
/// The first signal leaves `Loading` permanently; later signals switch
/// between the form and the dashboard, or update the session in place.
fn apply_session_signal(state: &mut AppState, signal: SessionSignal) {
    match signal {
        SessionSignal::Unknown => {}
        SessionSignal::SignedOut => {
            // An open form keeps what the user already typed.
            if !matches!(state.gate, GateState::SignedOut(_)) {
                state.gate = GateState::SignedOut(signin::SignInState::default());
            }
        }
        SessionSignal::SignedIn(session) => match &mut state.gate {
            GateState::SignedIn(dash) => {
                dash.session = session;
            }
            _ => {
                state.gate = GateState::SignedIn(DashboardState::new(
                    session,
                    state.default_page_size,
                ));
            }
        },
    }
}

fn handle_terminal_event(state: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl && key.code == KeyCode::Char('c') {
                return vec![UiEffect::Quit];
            }
            match &mut state.gate {
                GateState::Loading => vec![],
                GateState::SignedOut(form) => signin::handle_key(form, key),
                GateState::SignedIn(dash) => {
                    if ctrl && key.code == KeyCode::Char('l') {
                        return vec![UiEffect::SignOut];
                    }
                    table::handle_key(dash, key)
                }
            }
        }
        Event::Mouse(mouse) => {
            if let GateState::SignedIn(dash) = &mut state.gate {
                table::handle_mouse(dash, mouse)
            } else {
                vec![]
            }
        }
        _ => vec![],
    }
}
