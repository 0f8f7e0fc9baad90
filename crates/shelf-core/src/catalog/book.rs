//! Book records, column metadata, and sort comparators.
//!
//! Records hold display-normalized text: the upstream payload is loosely
//! typed (strings, numbers, or lists depending on the record), and the table
//! edits cells as text, so everything is carried as `Option<String>` after
//! fetch-time normalization.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Rendered (and exported) in place of a missing field.
pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";

/// Columns of the book table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookColumn {
    RatingsAverage,
    AuthorName,
    Title,
    FirstPublishYear,
    Subject,
    AuthorBirthDate,
    AuthorTopWork,
}

/// How a column's values compare when sorting.
#[derive(Debug, Clone, Copy)]
enum ColumnKind {
    Numeric,
    Date,
    Text,
}

impl BookColumn {
    pub const ALL: [BookColumn; 7] = [
        BookColumn::RatingsAverage,
        BookColumn::AuthorName,
        BookColumn::Title,
        BookColumn::FirstPublishYear,
        BookColumn::Subject,
        BookColumn::AuthorBirthDate,
        BookColumn::AuthorTopWork,
    ];

    /// Human-readable header label.
    pub fn label(self) -> &'static str {
        match self {
            BookColumn::RatingsAverage => "Ratings Average",
            BookColumn::AuthorName => "Author Name",
            BookColumn::Title => "Title",
            BookColumn::FirstPublishYear => "First Publish Year",
            BookColumn::Subject => "Subject",
            BookColumn::AuthorBirthDate => "Author Birth Date",
            BookColumn::AuthorTopWork => "Author Top Work",
        }
    }

    fn kind(self) -> ColumnKind {
        match self {
            BookColumn::RatingsAverage | BookColumn::FirstPublishYear => ColumnKind::Numeric,
            BookColumn::AuthorBirthDate => ColumnKind::Date,
            BookColumn::AuthorName
            | BookColumn::Title
            | BookColumn::Subject
            | BookColumn::AuthorTopWork => ColumnKind::Text,
        }
    }
}

/// Display-order directive for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One row of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub ratings_average: Option<String>,
    pub author_name: Option<String>,
    pub title: Option<String>,
    pub first_publish_year: Option<String>,
    pub subject: Option<String>,
    pub author_birth_date: Option<String>,
    pub author_top_work: Option<String>,
}

impl BookRecord {
    /// Returns the raw field value for a column.
    pub fn field(&self, column: BookColumn) -> Option<&str> {
        let value = match column {
            BookColumn::RatingsAverage => &self.ratings_average,
            BookColumn::AuthorName => &self.author_name,
            BookColumn::Title => &self.title,
            BookColumn::FirstPublishYear => &self.first_publish_year,
            BookColumn::Subject => &self.subject,
            BookColumn::AuthorBirthDate => &self.author_birth_date,
            BookColumn::AuthorTopWork => &self.author_top_work,
        };
        value.as_deref()
    }

    /// Replaces the field value for a column.
    pub fn set_field(&mut self, column: BookColumn, value: Option<String>) {
        let slot = match column {
            BookColumn::RatingsAverage => &mut self.ratings_average,
            BookColumn::AuthorName => &mut self.author_name,
            BookColumn::Title => &mut self.title,
            BookColumn::FirstPublishYear => &mut self.first_publish_year,
            BookColumn::Subject => &mut self.subject,
            BookColumn::AuthorBirthDate => &mut self.author_birth_date,
            BookColumn::AuthorTopWork => &mut self.author_top_work,
        };
        *slot = value;
    }

    /// Returns the display form of a field: the value, or the placeholder
    /// when the field is missing or empty.
    pub fn display(&self, column: BookColumn) -> &str {
        self.field(column)
            .filter(|value| !value.is_empty())
            .unwrap_or(MISSING_FIELD_PLACEHOLDER)
    }
}

/// Compares two records on `column`, ascending.
///
/// Numeric columns compare parsed values, date-like columns compare
/// chronologically, text columns compare case-insensitively. Rows missing
/// the field sort last.
pub fn compare_by_column(a: &BookRecord, b: &BookRecord, column: BookColumn) -> Ordering {
    let a_value = a.field(column).filter(|value| !value.is_empty());
    let b_value = b.field(column).filter(|value| !value.is_empty());
    match (a_value, b_value) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match column.kind() {
            ColumnKind::Numeric => compare_numeric(x, y),
            ColumnKind::Date => compare_date(x, y),
            ColumnKind::Text => compare_text(x, y),
        },
    }
}

fn compare_numeric(x: &str, y: &str) -> Ordering {
    match (x.trim().parse::<f64>(), y.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        // Unparseable values (edited cells) fall back to text order.
        _ => compare_text(x, y),
    }
}

fn compare_date(x: &str, y: &str) -> Ordering {
    match (date_key(x), date_key(y)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => compare_text(x, y),
    }
}

/// Reduces a freeform date string to a sortable `(year, month, day)` key.
///
/// Birth dates arrive in several shapes ("1892-01-03", "3 January 1892",
/// "January 3, 1892", or just "1892"); anything with a recognizable year
/// gets a key, the rest falls back to text order.
fn date_key(value: &str) -> Option<(i32, u32, u32)> {
    let trimmed = value.trim();
    for format in ["%Y-%m-%d", "%d %B %Y", "%B %d, %Y"] {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, format) {
            use chrono::Datelike;
            return Some((date.year(), date.month(), date.day()));
        }
    }

    // Year-only fallback: first standalone 4-digit run.
    let bytes = trimmed.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index].is_ascii_digit() {
            let start = index;
            while index < bytes.len() && bytes[index].is_ascii_digit() {
                index += 1;
            }
            if index - start == 4 {
                let year = trimmed[start..index].parse().ok()?;
                return Some((year, 0, 0));
            }
        } else {
            index += 1;
        }
    }
    None
}

fn compare_text(x: &str, y: &str) -> Ordering {
    x.to_lowercase()
        .cmp(&y.to_lowercase())
        .then_with(|| x.cmp(y))
}
