//! Deck lists from the deck-building site.
//!
//! The deck document nests cards under boards in a layout that changes over
//! time, so cards are found by key rather than by path: every value under
//! `card`, plus every entry of the top-level `tokens` array marked `isToken`.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use super::json_walk::find_key_values;
use crate::card::CardRecord;
use crate::config::Config;
use crate::fetch::HttpFetcher;

/// Cards and tokens of a deck document, de-duplicated by card id (first wins).
pub fn deck_cards(deck: &Value) -> Vec<CardRecord> {
    let cards = find_key_values(deck, "card");
    let tokens = deck
        .get("tokens")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|token| token.get("isToken").and_then(Value::as_bool) == Some(true));

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for value in cards.into_iter().chain(tokens) {
        if let Some(id) = value.get("scryfall_id").and_then(Value::as_str) {
            if !seen.insert(id.to_string()) {
                continue;
            }
        }
        match serde_json::from_value::<CardRecord>(value.clone()) {
            Ok(record) => records.push(record),
            Err(e) => debug!(error = %e, "Skipping unreadable deck entry"),
        }
    }
    records
}

/// `name (set) number` line for a deck card.
pub fn deck_line(record: &CardRecord) -> String {
    format!("{} ({}) {}", record.name, record.set, record.collector_number)
}

pub struct MoxfieldClient {
    http: Arc<HttpFetcher>,
    base_url: String,
}

impl MoxfieldClient {
    pub fn new(http: Arc<HttpFetcher>, config: &Config) -> Self {
        Self {
            http,
            base_url: config.network.moxfield_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a deck and return its cards and tokens.
    pub async fn deck(&self, deck_id: &str) -> Result<Vec<CardRecord>> {
        let url = format!("{}/v2/decks/all/{}", self.base_url, deck_id);
        let deck: Value = self
            .http
            .get_json(&url, &[])
            .await
            .with_context(|| format!("Failed to fetch deck {deck_id}"))?;
        let cards = deck_cards(&deck);
        debug!(deck = deck_id, cards = cards.len(), "Deck fetched");
        Ok(cards)
    }
}
