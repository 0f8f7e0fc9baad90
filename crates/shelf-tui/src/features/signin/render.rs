//! Sign-in form view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{SignInField, SignInState};

const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 12;

/// Renders the centered sign-in form.
pub fn render_sign_in(form: &SignInState, frame: &mut Frame, area: Rect) {
    let form_area = centered_rect(area, FORM_WIDTH, FORM_HEIGHT);

    let container = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Sign in ");
    frame.render_widget(container, form_area);

    let inner = Rect::new(
        form_area.x + 2,
        form_area.y + 1,
        form_area.width.saturating_sub(4),
        form_area.height.saturating_sub(2),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // email
            Constraint::Length(3), // secret
            Constraint::Length(1), // status / error
            Constraint::Length(1), // hints
        ])
        .split(inner);

    render_field(
        frame,
        chunks[0],
        "Email",
        &form.email,
        form.focus == SignInField::Email,
    );
    let masked = "*".repeat(form.secret.chars().count());
    render_field(
        frame,
        chunks[1],
        "Password",
        &masked,
        form.focus == SignInField::Secret,
    );

    let status = if let Some(error) = &form.error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))
    } else if form.submitting {
        Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(status), chunks[2]);

    let hints = Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::DarkGray)),
        Span::raw(" switch field  "),
        Span::styled("Enter", Style::default().fg(Color::DarkGray)),
        Span::raw(" sign in  "),
        Span::styled("Ctrl+C", Style::default().fg(Color::DarkGray)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let content = if focused {
        format!("{value}\u{2588}")
    } else {
        value.to_string()
    };
    let field = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {label} ")),
    );
    frame.render_widget(field, area);
}

/// Centers a fixed-size rect inside `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
