//! Catalog search client.

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use super::book::{BookColumn, BookRecord, compare_by_column};

/// One page of search results, normalized and author-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Records for the requested window, sorted by author name ascending.
    pub books: Vec<BookRecord>,
    /// Total matches reported by the catalog, across all pages.
    pub num_found: u64,
}

/// Client for the author search endpoint.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid catalog base URL: {base_url}"))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Fetches one page of results for an author query.
    ///
    /// The returned page is replaced wholesale by callers; nothing is merged
    /// across fetches.
    ///
    /// # Errors
    /// Fails on transport errors, non-2xx responses, or a payload without a
    /// `docs` list.
    pub async fn search(&self, author: &str, limit: u32, offset: u64) -> Result<SearchPage> {
        let url = self.search_url(author, limit, offset)?;
        tracing::debug!(%url, "searching catalog");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to send search request")?;

        if !response.status().is_success() {
            anyhow::bail!("Search failed (HTTP {})", response.status());
        }

        let data: SearchResponse = response
            .json()
            .await
            .context("Failed to parse search response")?;

        let mut books: Vec<BookRecord> = data.docs.into_iter().map(SearchDoc::into_record).collect();
        // Fixed presentation order, independent of any user-chosen sort.
        books.sort_by(|a, b| compare_by_column(a, b, BookColumn::AuthorName));

        Ok(SearchPage {
            books,
            num_found: data.num_found,
        })
    }

    fn search_url(&self, author: &str, limit: u32, offset: u64) -> Result<Url> {
        let mut url = self
            .base_url
            .join("search.json")
            .context("Failed to build search URL")?;
        url.query_pairs_mut()
            .append_pair("author", author)
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // No default here: a payload without `docs` is malformed and must fail.
    docs: Vec<SearchDoc>,
    #[serde(rename = "numFound", default)]
    num_found: u64,
}

/// Raw search document as returned by the catalog.
///
/// Fields arrive as strings, numbers, or lists of strings depending on the
/// record; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchDoc {
    ratings_average: Option<f64>,
    author_name: Option<OneOrMany>,
    title: Option<String>,
    first_publish_year: Option<i64>,
    subject: Option<OneOrMany>,
    author_birth_date: Option<String>,
    author_top_work: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn join(self) -> String {
        match self {
            OneOrMany::One(value) => value,
            OneOrMany::Many(values) => values.join(", "),
        }
    }
}

impl SearchDoc {
    fn into_record(self) -> BookRecord {
        BookRecord {
            ratings_average: self.ratings_average.map(|value| value.to_string()),
            author_name: self.author_name.map(OneOrMany::join),
            title: self.title,
            first_publish_year: self.first_publish_year.map(|year| year.to_string()),
            subject: self.subject.map(OneOrMany::join),
            author_birth_date: self.author_birth_date,
            author_top_work: self.author_top_work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_has_author_limit_offset() {
        let client = CatalogClient::new("https://openlibrary.org").unwrap();
        let url = client.search_url("Tolkien", 10, 20).unwrap();

        assert_eq!(url.path(), "/search.json");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("author".to_string(), "Tolkien".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_author_name_list_is_comma_joined() {
        let doc: SearchDoc = serde_json::from_value(serde_json::json!({
            "author_name": ["Jane Doe", "J. Smith"],
            "title": "Collected Works",
        }))
        .unwrap();

        let record = doc.into_record();
        assert_eq!(record.author_name.as_deref(), Some("Jane Doe, J. Smith"));
    }

    #[test]
    fn test_scalar_author_name_passes_through() {
        let doc: SearchDoc = serde_json::from_value(serde_json::json!({
            "author_name": "Jane Doe",
        }))
        .unwrap();

        assert_eq!(doc.into_record().author_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_numeric_fields_normalize_to_text() {
        let doc: SearchDoc = serde_json::from_value(serde_json::json!({
            "ratings_average": 3.5,
            "first_publish_year": 1937,
            "subject": ["Fantasy", "Adventure"],
        }))
        .unwrap();

        let record = doc.into_record();
        assert_eq!(record.ratings_average.as_deref(), Some("3.5"));
        assert_eq!(record.first_publish_year.as_deref(), Some("1937"));
        assert_eq!(record.subject.as_deref(), Some("Fantasy, Adventure"));
    }

    #[test]
    fn test_missing_docs_is_malformed() {
        let result: Result<SearchResponse, _> =
            serde_json::from_value(serde_json::json!({ "numFound": 3 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_doc_fields_are_ignored() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "docs": [{ "title": "The Hobbit", "key": "/works/OL1W", "seed": ["x"] }],
            "numFound": 1,
        }))
        .unwrap();
        assert_eq!(response.docs.len(), 1);
    }
}
