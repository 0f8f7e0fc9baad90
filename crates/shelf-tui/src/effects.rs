//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use shelf_core::catalog::BookRecord;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Verify credentials with the identity provider.
    SignIn { email: String, secret: String },

    /// Clear the persisted session and publish the signed-out signal.
    SignOut,

    /// Fetch one page of search results.
    ///
    /// `generation` tags the request; the reducer drops completions whose
    /// generation is no longer the latest issued.
    Fetch {
        generation: u64,
        query: String,
        limit: u32,
        offset: u64,
    },

    /// Write the committed page to books.csv in the export directory.
    ExportCsv { books: Vec<BookRecord> },

    /// Persist the page-size preference to config.
    PersistPageSize { size: u32 },
}
