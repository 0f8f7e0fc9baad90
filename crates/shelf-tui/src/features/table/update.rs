//! Dashboard reducer: routes keys and mouse clicks to state transitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use shelf_core::catalog::BookColumn;

use super::state::{DashboardState, Focus};
use crate::effects::UiEffect;

/// Handles a key press while the dashboard is shown.
pub fn handle_key(dash: &mut DashboardState, key: KeyEvent) -> Vec<UiEffect> {
    if dash.edit.is_some() {
        return handle_edit_key(dash, key);
    }
    match dash.focus {
        Focus::Query => handle_query_key(dash, key),
        Focus::Table => handle_table_key(dash, key),
    }
}

fn handle_query_key(dash: &mut DashboardState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::Enter | KeyCode::Down => {
            dash.focus = Focus::Table;
            vec![]
        }
        KeyCode::Backspace => {
            dash.query.pop();
            dash.refresh()
        }
        // Every keystroke narrows the query and re-fetches.
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            dash.query.push(ch);
            dash.refresh()
        }
        _ => vec![],
    }
}

fn handle_table_key(dash: &mut DashboardState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::Char('/') => {
            dash.focus = Focus::Query;
            vec![]
        }
        KeyCode::Up => {
            dash.selected = dash.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down => {
            if dash.selected + 1 < dash.books.len() {
                dash.selected += 1;
            }
            vec![]
        }
        KeyCode::Left => dash.change_page(false),
        KeyCode::Right => dash.change_page(true),
        KeyCode::Char('[') => dash.cycle_page_size(false),
        KeyCode::Char(']') => dash.cycle_page_size(true),
        KeyCode::Char(ch @ '1'..='7') => {
            let index = ch as usize - '1' as usize;
            dash.toggle_sort(BookColumn::ALL[index]);
            vec![]
        }
        KeyCode::Char('e') => {
            dash.enter_edit(dash.selected);
            vec![]
        }
        KeyCode::Char('x') => export(dash),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => vec![],
    }
}

fn export(dash: &mut DashboardState) -> Vec<UiEffect> {
    if dash.books.is_empty() {
        dash.status = Some("Nothing to export".to_string());
        return vec![];
    }
    dash.status = None;
    // The committed page only; an open edit buffer is not exported.
    vec![UiEffect::ExportCsv {
        books: dash.books.clone(),
    }]
}

fn handle_edit_key(dash: &mut DashboardState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Enter => {
            dash.save_edit();
            vec![]
        }
        KeyCode::Tab => {
            dash.cycle_edit_field(true);
            vec![]
        }
        KeyCode::BackTab => {
            dash.cycle_edit_field(false);
            vec![]
        }
        // Moving to another row re-enters edit there, discarding this buffer.
        KeyCode::Up => {
            if let Some(edit) = &dash.edit
                && edit.row > 0
            {
                dash.enter_edit(edit.row - 1);
            }
            vec![]
        }
        KeyCode::Down => {
            if let Some(edit) = &dash.edit
                && edit.row + 1 < dash.books.len()
            {
                dash.enter_edit(edit.row + 1);
            }
            vec![]
        }
        KeyCode::Backspace => {
            dash.edit_pop_char();
            vec![]
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            dash.edit_push_char(ch);
            vec![]
        }
        // No cancel affordance: the only way out is to save.
        _ => vec![],
    }
}

/// Handles a mouse click: header cells toggle sort, data rows select.
pub fn handle_mouse(dash: &mut DashboardState, mouse: MouseEvent) -> Vec<UiEffect> {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return vec![];
    }

    let area = dash.table_area.get();
    if area.width == 0 || !area.contains(ratatui::layout::Position::new(mouse.column, mouse.row)) {
        return vec![];
    }

    if mouse.row == area.y {
        // Header row: equal-width columns, same division the renderer uses.
        let offset = mouse.column.saturating_sub(area.x);
        let column_width = area.width / BookColumn::ALL.len() as u16;
        if column_width == 0 {
            return vec![];
        }
        let index = usize::from(offset / column_width).min(BookColumn::ALL.len() - 1);
        dash.toggle_sort(BookColumn::ALL[index]);
        return vec![];
    }

    // Data rows: map only while the whole page fits on screen (no scroll).
    let visible_rows = usize::from(area.height.saturating_sub(1));
    if dash.books.len() > visible_rows {
        return vec![];
    }
    let row = usize::from(mouse.row - area.y - 1);
    if row < dash.books.len() {
        if dash.edit.as_ref().is_some_and(|edit| edit.row != row) {
            // Clicking another row while editing moves the edit there.
            dash.enter_edit(row);
        } else {
            dash.selected = row;
        }
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::layout::Rect;
    use shelf_core::auth::Session;
    use shelf_core::catalog::{BookRecord, SearchPage, SortDirection};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn dash() -> DashboardState {
        let session = Session {
            user_id: "uid".to_string(),
            email: "reader@example.com".to_string(),
            id_token: "token".to_string(),
        };
        DashboardState::new(session, 10)
    }

    fn book(author: &str) -> BookRecord {
        BookRecord {
            author_name: Some(author.to_string()),
            title: Some("t".to_string()),
            ..BookRecord::default()
        }
    }

    #[test]
    fn test_each_query_keystroke_fetches() {
        let mut state = dash();
        let effects = handle_key(&mut state, key(KeyCode::Char('t')));
        assert!(matches!(effects.as_slice(), [UiEffect::Fetch { .. }]));
        assert_eq!(state.query, "t");

        // Deleting the last character empties the query: no fetch, cleared page.
        let effects = handle_key(&mut state, key(KeyCode::Backspace));
        assert!(effects.is_empty());
        assert!(state.query.is_empty());
    }

    #[test]
    fn test_digit_keys_toggle_sort_in_table_focus() {
        let mut state = dash();
        state.focus = Focus::Table;
        state.books = vec![book("B"), book("A")];

        handle_key(&mut state, key(KeyCode::Char('2')));
        assert_eq!(state.sort.column, BookColumn::AuthorName);
        assert_eq!(state.sort.direction, SortDirection::Ascending);
        assert_eq!(state.books[0].author_name.as_deref(), Some("A"));
    }

    #[test]
    fn test_export_uses_committed_rows_not_buffer() {
        let mut state = dash();
        state.focus = Focus::Table;
        state.query = "x".to_string();
        state.fetch_generation += 1;
        state.apply_fetch(
            state.fetch_generation,
            Ok(SearchPage {
                books: vec![book("A")],
                num_found: 1,
            }),
        );
        state.enter_edit(0);
        // Unsaved buffer edit that must not leak into the export.
        state.edit_push_char('!');

        let effects = export(&mut state);
        match effects.as_slice() {
            [UiEffect::ExportCsv { books }] => {
                assert_eq!(books[0].author_name.as_deref(), Some("A"));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_export_with_empty_page_is_a_status_message() {
        let mut state = dash();
        state.focus = Focus::Table;
        let effects = handle_key(&mut state, key(KeyCode::Char('x')));
        assert!(effects.is_empty());
        assert_eq!(state.status.as_deref(), Some("Nothing to export"));
    }

    #[test]
    fn test_escape_does_not_cancel_edit() {
        let mut state = dash();
        state.books = vec![book("A")];
        state.enter_edit(0);
        state.edit_push_char('z');

        handle_key(&mut state, key(KeyCode::Esc));
        assert!(state.edit.is_some());
    }

    #[test]
    fn test_header_click_toggles_clicked_column() {
        let mut state = dash();
        state.books = vec![book("A"), book("B")];
        // 70 columns wide: each of the 7 header cells spans 10 cells.
        state.table_area.set(Rect::new(0, 5, 70, 20));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 25, // third column: Title
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut state, click);
        assert_eq!(state.sort.column, BookColumn::Title);
    }

    #[test]
    fn test_row_click_while_editing_moves_the_edit() {
        let mut state = dash();
        state.books = vec![book("A"), book("B")];
        state.table_area.set(Rect::new(0, 5, 70, 20));
        state.enter_edit(0);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 7, // second data row
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut state, click);

        let edit = state.edit.as_ref().unwrap();
        assert_eq!(edit.row, 1);
        assert_eq!(edit.buffer.author_name.as_deref(), Some("B"));
    }
}
