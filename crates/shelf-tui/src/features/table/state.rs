//! Dashboard state: query, result page, sort spec, edit buffer, pagination.
//!
//! The result page is replaced wholesale on every fetch; nothing is merged
//! across pages. Each issued fetch carries a generation number and the
//! reducer drops completions whose generation is no longer the latest, so
//! the last *issued* request wins regardless of response order.

use std::cell::Cell;

use ratatui::layout::Rect;
use shelf_core::auth::Session;
use shelf_core::catalog::{
    BookColumn, BookRecord, SearchPage, SortDirection, compare_by_column,
};

use crate::effects::UiEffect;

/// Page sizes the dashboard cycles through.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Query,
    Table,
}

/// The user's last sort choice: column plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: BookColumn,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: BookColumn::AuthorName,
            direction: SortDirection::Ascending,
        }
    }
}

/// Shadow copy of one row while it is being edited.
///
/// Only the buffer changes while typing; the committed page is untouched
/// until save.
#[derive(Debug, Clone)]
pub struct EditState {
    /// Index of the sole editable row.
    pub row: usize,
    /// Working copy of that row's fields.
    pub buffer: BookRecord,
    /// Field the cursor is in.
    pub field: BookColumn,
}

/// State of the search-and-table view.
pub struct DashboardState {
    pub session: Session,
    /// Current author search term; mutated per keystroke.
    pub query: String,
    /// Zero-based page index.
    pub page: u64,
    /// Rows requested per page.
    pub page_size: u32,
    /// The committed result page, replaced wholesale per fetch.
    pub books: Vec<BookRecord>,
    /// Total matches reported by the catalog.
    pub num_found: u64,
    pub sort: SortSpec,
    /// Last fetch failure, rendered alongside the table.
    pub error: Option<String>,
    /// Transient status message (export results and the like).
    pub status: Option<String>,
    pub focus: Focus,
    /// Selected row index (table focus).
    pub selected: usize,
    /// At most one row is in edit mode.
    pub edit: Option<EditState>,
    /// Generation of the most recently issued fetch.
    pub fetch_generation: u64,
    /// True while the latest issued fetch is outstanding.
    pub fetch_in_flight: bool,
    /// Table area captured during render, used to hit-test header clicks.
    pub table_area: Cell<Rect>,
}

impl DashboardState {
    pub fn new(session: Session, page_size: u32) -> Self {
        Self {
            session,
            query: String::new(),
            page: 0,
            page_size,
            books: Vec::new(),
            num_found: 0,
            sort: SortSpec::default(),
            error: None,
            status: None,
            focus: Focus::default(),
            selected: 0,
            edit: None,
            fetch_generation: 0,
            fetch_in_flight: false,
            table_area: Cell::new(Rect::default()),
        }
    }

    /// Re-evaluates the (query, page, page size) window.
    ///
    /// An empty query forces the page empty without a network call; anything
    /// else issues exactly one fetch tagged with a fresh generation.
    pub fn refresh(&mut self) -> Vec<UiEffect> {
        // Either way the previous window is obsolete: a fresh generation
        // invalidates whatever is still in flight.
        self.fetch_generation += 1;

        if self.query.is_empty() {
            self.books.clear();
            self.num_found = 0;
            self.error = None;
            self.fetch_in_flight = false;
            return vec![];
        }

        self.fetch_in_flight = true;
        vec![UiEffect::Fetch {
            generation: self.fetch_generation,
            query: self.query.clone(),
            limit: self.page_size,
            offset: self.page * u64::from(self.page_size),
        }]
    }

    /// Applies a fetch completion, unless a newer fetch has been issued.
    pub fn apply_fetch(
        &mut self,
        generation: u64,
        result: Result<SearchPage, String>,
    ) {
        if generation != self.fetch_generation {
            // Stale response from an older window; the latest issued
            // request wins.
            return;
        }
        self.fetch_in_flight = false;

        match result {
            Ok(page) => {
                self.books = page.books;
                self.num_found = page.num_found;
                self.error = None;
                // The page changed under any open edit; drop it.
                self.edit = None;
                self.selected = self.selected.min(self.books.len().saturating_sub(1));
            }
            Err(message) => {
                // Previous rows stay on screen; only the message changes.
                self.error = Some(message);
            }
        }
    }

    /// Highest reachable zero-based page index for the current result count.
    pub fn max_page(&self) -> u64 {
        if self.num_found == 0 {
            0
        } else {
            (self.num_found - 1) / u64::from(self.page_size)
        }
    }

    /// Moves to an adjacent page and re-fetches.
    pub fn change_page(&mut self, forward: bool) -> Vec<UiEffect> {
        let next = if forward {
            if self.page >= self.max_page() {
                return vec![];
            }
            self.page + 1
        } else {
            let Some(previous) = self.page.checked_sub(1) else {
                return vec![];
            };
            previous
        };
        self.page = next;
        self.refresh()
    }

    /// Steps to the next or previous page-size option and re-fetches from
    /// page zero.
    pub fn cycle_page_size(&mut self, forward: bool) -> Vec<UiEffect> {
        let position = PAGE_SIZE_OPTIONS
            .iter()
            .position(|size| *size == self.page_size);
        let next = match (position, forward) {
            (Some(index), true) => PAGE_SIZE_OPTIONS[(index + 1) % PAGE_SIZE_OPTIONS.len()],
            (Some(index), false) => {
                PAGE_SIZE_OPTIONS[(index + PAGE_SIZE_OPTIONS.len() - 1) % PAGE_SIZE_OPTIONS.len()]
            }
            // A hand-edited config size falls back to the first option.
            (None, _) => PAGE_SIZE_OPTIONS[0],
        };
        self.page_size = next;
        self.page = 0;

        let mut effects = vec![UiEffect::PersistPageSize { size: next }];
        effects.extend(self.refresh());
        effects
    }

    /// Toggles the sort spec for a column and re-sorts the current page.
    ///
    /// Clicking the active column flips direction; any other column becomes
    /// the sort key, ascending. Only presentation order changes; nothing is
    /// re-fetched.
    pub fn toggle_sort(&mut self, column: BookColumn) {
        if self.sort.column == column {
            self.sort.direction = self.sort.direction.flipped();
        } else {
            self.sort = SortSpec {
                column,
                direction: SortDirection::Ascending,
            };
        }
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let SortSpec { column, direction } = self.sort;
        // Stable sort keeps equal rows in their previous relative order.
        self.books.sort_by(|a, b| {
            let ordering = compare_by_column(a, b, column);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    /// Puts `row` into edit mode, capturing its fields into the buffer.
    ///
    /// Any other row's open edit buffer is discarded: at most one row is
    /// editable at a time.
    pub fn enter_edit(&mut self, row: usize) {
        let Some(record) = self.books.get(row) else {
            return;
        };
        self.selected = row;
        self.edit = Some(EditState {
            row,
            buffer: record.clone(),
            field: BookColumn::ALL[0],
        });
    }

    /// Commits the edit buffer over its row and leaves edit mode.
    pub fn save_edit(&mut self) {
        if let Some(edit) = self.edit.take()
            && let Some(slot) = self.books.get_mut(edit.row)
        {
            *slot = edit.buffer;
        }
    }

    /// Moves the focused edit field forward or backward.
    pub fn cycle_edit_field(&mut self, forward: bool) {
        if let Some(edit) = &mut self.edit {
            let index = BookColumn::ALL
                .iter()
                .position(|column| *column == edit.field)
                .unwrap_or(0);
            let len = BookColumn::ALL.len();
            let next = if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            };
            edit.field = BookColumn::ALL[next];
        }
    }

    /// Appends a character to the focused edit field.
    pub fn edit_push_char(&mut self, ch: char) {
        if let Some(edit) = &mut self.edit {
            let mut value = edit.buffer.field(edit.field).unwrap_or("").to_string();
            value.push(ch);
            edit.buffer.set_field(edit.field, Some(value));
        }
    }

    /// Removes the last character of the focused edit field.
    pub fn edit_pop_char(&mut self) {
        if let Some(edit) = &mut self.edit {
            let mut value = edit.buffer.field(edit.field).unwrap_or("").to_string();
            value.pop();
            edit.buffer.set_field(edit.field, Some(value));
        }
    }
}
