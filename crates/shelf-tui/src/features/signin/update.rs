//! Sign-in form reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shelf_core::auth::Session;

use super::state::SignInState;
use crate::effects::UiEffect;

/// Handles a key press while the sign-in form is shown.
pub fn handle_key(form: &mut SignInState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = form.focus.next();
            vec![]
        }
        KeyCode::Enter => submit(form),
        KeyCode::Backspace => {
            form.pop_char();
            vec![]
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.push_char(ch);
            vec![]
        }
        _ => vec![],
    }
}

fn submit(form: &mut SignInState) -> Vec<UiEffect> {
    // No format validation and no in-flight lock: Enter always submits.
    form.error = None;
    form.submitting = true;
    vec![UiEffect::SignIn {
        email: form.email.clone(),
        secret: form.secret.clone(),
    }]
}

/// Applies the provider's answer to the form.
///
/// Success does not transition the gate here; the session store's signal is
/// the sole source of truth for that.
pub fn handle_sign_in_result(form: &mut SignInState, result: &Result<Session, String>) {
    form.submitting = false;
    if let Err(message) = result {
        tracing::warn!("sign-in failed: {message}");
        form.error = Some(message.clone());
    }
}
