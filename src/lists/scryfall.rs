//! Card API client for list queries and single-card lookups.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::normalize::ListEntry;
use crate::card::CardRecord;
use crate::config::{Config, QueryConfig};
use crate::fetch::HttpFetcher;

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    data: Vec<CardRecord>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_page: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Build the search query from comma-separated terms.
///
/// ```
/// use cardforged::lists::scryfall::search_query;
///
/// assert_eq!(search_query("set:mh2, is:borderless ,t:land"), "set:mh2 is:borderless t:land");
/// ```
pub fn search_query(terms: &str) -> String {
    terms
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct ScryfallClient {
    http: Arc<HttpFetcher>,
    base_url: String,
    query: QueryConfig,
}

impl ScryfallClient {
    pub fn new(http: Arc<HttpFetcher>, config: &Config) -> Self {
        Self {
            http,
            base_url: config.network.scryfall_url.trim_end_matches('/').to_string(),
            query: config.query.clone(),
        }
    }

    /// Run a search and collect every page of results.
    pub async fn search(&self, terms: &str) -> Result<Vec<CardRecord>> {
        let q = search_query(terms);
        let params = [
            ("unique", self.query.unique.clone()),
            ("include_extras", self.query.include_extras.to_string()),
            ("q", q.clone()),
        ];

        let url = format!("{}/cards/search", self.base_url);
        let mut page: SearchPage = self
            .http
            .get_json(&url, &params)
            .await
            .with_context(|| format!("Card search failed: {q}"))?;

        let mut cards = std::mem::take(&mut page.data);
        while page.has_more {
            let Some(next) = page.next_page.take() else {
                break;
            };
            page = self
                .http
                .get_json(&next, &[])
                .await
                .with_context(|| format!("Card search page failed: {next}"))?;
            cards.append(&mut page.data);
        }

        debug!(query = %q, cards = cards.len(), "Card search finished");
        Ok(cards)
    }

    /// Look up one printing by set and collector number.
    pub async fn card_by_number(&self, set: &str, number: &str) -> Result<CardRecord> {
        let url = format!("{}/cards/{}/{}", self.base_url, set.to_lowercase(), number);
        self.http
            .get_json(&url, &[])
            .await
            .with_context(|| format!("Card lookup failed: {set} {number}"))
    }

    /// Look up a card by approximate name, optionally within a set.
    pub async fn card_named(&self, name: &str, set: Option<&str>) -> Result<CardRecord> {
        let url = format!("{}/cards/named", self.base_url);
        let mut params = vec![("fuzzy", name.to_string())];
        if let Some(set) = set {
            params.push(("set", set.to_lowercase()));
        }
        self.http
            .get_json(&url, &params)
            .await
            .with_context(|| format!("Card lookup failed: {name}"))
    }

    /// Resolve a parsed list line to a card record.
    pub async fn resolve_entry(&self, entry: &ListEntry) -> Result<CardRecord> {
        match (&entry.set, &entry.number) {
            (Some(set), Some(number)) => self.card_by_number(set, number).await,
            (set, _) => self.card_named(&entry.name, set.as_deref()).await,
        }
    }
}
