//! CSV export of the displayed result page.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::catalog::{BookColumn, BookRecord};

/// Export filename, written into the configured export directory.
pub const EXPORT_FILE_NAME: &str = "books.csv";

/// Writes the displayed page to `<dir>/books.csv` and returns the path.
///
/// One row per record in display order, with the table's column labels as
/// the header row. Missing fields export the same placeholder the table
/// shows.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_books_csv(dir: &Path, books: &[BookRecord]) -> Result<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer
        .write_record(BookColumn::ALL.iter().map(|column| column.label()))
        .context("Failed to write CSV header")?;

    for book in books {
        writer
            .write_record(BookColumn::ALL.iter().map(|column| book.display(*column)))
            .context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV export")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_export_writes_header_and_rows_in_order() {
        let dir = tempdir().unwrap();
        let books = vec![
            BookRecord {
                ratings_average: Some("4.2".to_string()),
                author_name: Some("Tolkien, J. R. R.".to_string()),
                title: Some("The Hobbit".to_string()),
                first_publish_year: Some("1937".to_string()),
                subject: Some("Fantasy".to_string()),
                author_birth_date: Some("3 January 1892".to_string()),
                author_top_work: Some("The Hobbit".to_string()),
            },
            // Sparse record: gaps export the display placeholder.
            BookRecord {
                title: Some("Roverandom".to_string()),
                ..BookRecord::default()
            },
        ];

        let path = write_books_csv(dir.path(), &books).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Ratings Average,Author Name,Title,First Publish Year,Subject,Author Birth Date,Author Top Work"
        );
        assert_eq!(
            lines[1],
            "4.2,\"Tolkien, J. R. R.\",The Hobbit,1937,Fantasy,3 January 1892,The Hobbit"
        );
        assert_eq!(lines[2], "N/A,N/A,Roverandom,N/A,N/A,N/A,N/A");
    }

    #[test]
    fn test_export_empty_page_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = write_books_csv(dir.path(), &[]).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_export_quotes_embedded_commas() {
        let dir = tempdir().unwrap();
        let books = vec![BookRecord {
            subject: Some("Fantasy, Adventure".to_string()),
            ..BookRecord::default()
        }];

        let path = write_books_csv(dir.path(), &books).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("\"Fantasy, Adventure\""));
    }
}
