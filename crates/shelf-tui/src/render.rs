//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! Frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::{AppState, GateState};
use crate::{signin, table};

/// Spinner frames for the loading gate.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match &state.gate {
        // Neither the form nor the table may flash before the store answers.
        GateState::Loading => render_loading(frame, area, state.spinner_frame),
        GateState::SignedOut(form) => signin::render_sign_in(form, frame, area),
        GateState::SignedIn(dash) => {
            table::render_dashboard(dash, frame, area, state.spinner_frame);
        }
    }
}

fn render_loading(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);

    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan)),
        Span::raw(" Checking session..."),
    ]);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        chunks[1],
    );
}
