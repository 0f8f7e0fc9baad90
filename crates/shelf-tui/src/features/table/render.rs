//! Dashboard view: query box, result table, status line.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use shelf_core::catalog::{BookColumn, SortDirection};

use super::state::{DashboardState, Focus};

/// Spinner frames for the status line while a fetch is outstanding.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the signed-in dashboard.
pub fn render_dashboard(
    dash: &DashboardState,
    frame: &mut Frame,
    area: Rect,
    spinner_frame: usize,
) {
    let error_height = u16::from(dash.error.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // query input
            Constraint::Length(error_height), // inline fetch error
            Constraint::Min(1),               // table
            Constraint::Length(1),            // status line
        ])
        .split(area);

    render_query(dash, frame, chunks[0]);

    if let Some(error) = &dash.error {
        let line = Line::from(Span::styled(
            format!("Error: {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }

    render_table(dash, frame, chunks[2]);
    render_status_line(dash, frame, chunks[3], spinner_frame);
}

fn render_query(dash: &DashboardState, frame: &mut Frame, area: Rect) {
    let focused = dash.focus == Focus::Query && dash.edit.is_none();
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let content = if focused {
        format!("{}\u{2588}", dash.query)
    } else {
        dash.query.clone()
    };
    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search by Author "),
    );
    frame.render_widget(input, area);
}

fn render_table(dash: &DashboardState, frame: &mut Frame, area: Rect) {
    // Captured for mouse hit-testing in the reducer.
    dash.table_area.set(area);

    let header = Row::new(
        BookColumn::ALL
            .iter()
            .enumerate()
            .map(|(index, column)| header_cell(dash, index, *column)),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = dash.books.iter().enumerate().map(|(row_index, book)| {
        match &dash.edit {
            // The edited row renders the buffer, not the committed record.
            Some(edit) if edit.row == row_index => {
                Row::new(BookColumn::ALL.iter().map(|column| {
                    let value = edit.buffer.field(*column).unwrap_or("").to_string();
                    if *column == edit.field {
                        Cell::from(format!("{value}\u{2588}"))
                            .style(Style::default().fg(Color::Black).bg(Color::Cyan))
                    } else {
                        Cell::from(value).style(Style::default().fg(Color::Cyan))
                    }
                }))
            }
            _ => Row::new(
                BookColumn::ALL
                    .iter()
                    .map(|column| Cell::from(book.display(*column).to_string())),
            ),
        }
    });

    let widths = [Constraint::Ratio(1, 7); 7];
    let highlight = if dash.edit.is_some() {
        // The edited row carries its own styling; mute the selection bar.
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(highlight);

    let mut table_state = TableState::default();
    if !dash.books.is_empty() {
        table_state.select(Some(dash.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn header_cell(dash: &DashboardState, index: usize, column: BookColumn) -> Cell<'static> {
    let indicator = if dash.sort.column == column {
        match dash.sort.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!("{}{indicator}", column.label())),
    ]);
    Cell::from(line)
}

fn render_status_line(
    dash: &DashboardState,
    frame: &mut Frame,
    area: Rect,
    spinner_frame: usize,
) {
    let hint_style = Style::default().fg(Color::DarkGray);

    let left: Vec<Span> = if dash.edit.is_some() {
        vec![
            Span::styled("Editing", Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled("Tab", hint_style),
            Span::raw(" field  "),
            Span::styled("↑/↓", hint_style),
            Span::raw(" row  "),
            Span::styled("Enter", hint_style),
            Span::raw(" save"),
        ]
    } else if let Some(status) = &dash.status {
        vec![Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )]
    } else {
        vec![
            Span::styled("Tab", hint_style),
            Span::raw(" search  "),
            Span::styled("←/→", hint_style),
            Span::raw(" page  "),
            Span::styled("[/]", hint_style),
            Span::raw(" size  "),
            Span::styled("1-7", hint_style),
            Span::raw(" sort  "),
            Span::styled("e", hint_style),
            Span::raw(" edit  "),
            Span::styled("x", hint_style),
            Span::raw(" export  "),
            Span::styled("Ctrl+L", hint_style),
            Span::raw(" sign out  "),
            Span::styled("Ctrl+C", hint_style),
            Span::raw(" quit"),
        ]
    };
    frame.render_widget(Paragraph::new(Line::from(left)), area);

    let mut right: Vec<Span> = Vec::new();
    if dash.fetch_in_flight {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        right.push(Span::styled(
            format!("{spinner} "),
            Style::default().fg(Color::Yellow),
        ));
    }
    right.push(Span::styled(
        format!(
            "Page {}/{}  {} found  size {}",
            dash.page + 1,
            dash.max_page() + 1,
            dash.num_found,
            dash.page_size
        ),
        hint_style,
    ));
    let info = Paragraph::new(Line::from(right)).alignment(Alignment::Right);
    frame.render_widget(info, area);
}
