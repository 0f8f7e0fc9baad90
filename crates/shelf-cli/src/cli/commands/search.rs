//! One-shot search command handler.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table, presets};
use shelf_core::catalog::{BookColumn, CatalogClient};
use shelf_core::config::Config;
use shelf_core::export::write_books_csv;

pub async fn run(
    config: &Config,
    author: &str,
    limit: Option<u32>,
    page: u64,
    csv_dir: Option<&Path>,
) -> Result<()> {
    let limit = limit.unwrap_or(config.catalog.page_size);
    let client = CatalogClient::new(&config.catalog.base_url)?;
    let results = client
        .search(author, limit, page * u64::from(limit))
        .await
        .context("search catalog")?;

    if let Some(dir) = csv_dir {
        let path = write_books_csv(dir, &results.books).context("write CSV export")?;
        println!("Wrote {} rows to {}", results.books.len(), path.display());
        return Ok(());
    }

    if results.books.is_empty() {
        println!("No results for author '{author}'.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(BookColumn::ALL.iter().map(|column| column.label()));
    for book in &results.books {
        table.add_row(BookColumn::ALL.iter().map(|column| book.display(*column)));
    }

    println!("{table}");
    println!(
        "{} of {} results (page {})",
        results.books.len(),
        results.num_found,
        page + 1
    );
    Ok(())
}
