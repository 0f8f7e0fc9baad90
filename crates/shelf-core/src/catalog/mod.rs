//! Book catalog access: search client, record model, sort comparators.

mod book;
mod client;

pub use book::{
    BookColumn, BookRecord, MISSING_FIELD_PLACEHOLDER, SortDirection, compare_by_column,
};
pub use client::{CatalogClient, SearchPage};
