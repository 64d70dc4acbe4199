//! Reference-code resolution against set checklists.
//!
//! Two strategies, chosen by the [`SetMapping`]:
//!
//! - **Listed sets**: open the card page for `<set>001`, follow its set link
//!   to the checklist, then match rows by collector number and name, falling
//!   back to name alone.
//! - **Promotional listings**: open the fixed checklist for the promo family
//!   and score every row whose artist and name match by how closely the
//!   row's variant description resembles the card's set name.
//!
//! Every failure (missing page, unexpected markup) is a miss, never an error.

use deunicode::deunicode;
use difflib::sequencematcher::SequenceMatcher;
use serde::Serialize;
use tracing::debug;

use super::listing::{parse_rows, parse_set_link, ListingRow};
use super::set_mapper::SetMapping;
use crate::fetch::PageFetcher;

/// A promotional row that passed the artist and name filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub code: String,
    /// Similarity in `[0, 1]` between the row description and the set name.
    pub score: f64,
}

/// Checklist id of the aggregated listing for a promo family.
pub fn promo_listing_id(promo_code: &str) -> u32 {
    match promo_code {
        "dci" => 18,
        "a22" => 375,
        "uni" => 201,
        _ => 72,
    }
}

/// Ratcliff/Obershelp similarity of two strings in `[0, 1]`: twice the
/// characters in greedily matched longest blocks over the total length.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    f64::from(SequenceMatcher::new(&a, &b).ratio())
}

/// First pass: number and name; second pass: name alone.
pub fn select_listed<'r>(rows: &'r [ListingRow], number: &str, name: &str) -> Option<&'r str> {
    rows.iter()
        .find(|row| row.number == number && row.name_text.contains(name))
        .or_else(|| rows.iter().find(|row| row.name_text.contains(name)))
        .map(|row| row.code.as_str())
}

/// Score every promotional row matching the card's artist and name.
///
/// Artists are compared transliterated to ASCII; the listing spells most
/// names without accents.
pub fn score_promo_rows(
    rows: &[ListingRow],
    name: &str,
    artist: &str,
    set_name: &str,
) -> Vec<MatchCandidate> {
    let name_lower = name.to_lowercase();
    let artist = deunicode(artist);
    rows.iter()
        .filter(|row| {
            deunicode(&row.artist_text).contains(&artist)
                && row.name_text.to_lowercase().contains(&name_lower)
        })
        .map(|row| MatchCandidate {
            code: row.code.clone(),
            score: similarity(&row.name_text.replace(name, ""), set_name),
        })
        .collect()
}

/// Highest-scoring candidate; ties go to the first one encountered.
pub fn best_candidate(candidates: &[MatchCandidate]) -> Option<&MatchCandidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}

/// Resolves reference codes through the scraped source.
pub struct ReferenceResolver<'a> {
    site_url: &'a str,
    pages: &'a dyn PageFetcher,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(site_url: &'a str, pages: &'a dyn PageFetcher) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/'),
            pages,
        }
    }

    /// Resolve the reference code of a printing.
    ///
    /// Promotional mappings try the fuzzy promo strategy first and then the
    /// listed strategy under the promo code. Returns `None` when neither
    /// finds a row; callers fall back to `<set><number>`.
    pub async fn resolve_code(
        &self,
        mapping: &SetMapping,
        number: &str,
        name: &str,
        artist: &str,
        set_name: &str,
    ) -> Option<String> {
        if mapping.promotional {
            if let Some(code) = self.resolve_promo(&mapping.code, name, artist, set_name).await {
                return Some(code);
            }
        }
        self.resolve_listed(&mapping.code, number, name).await
    }

    /// Resolve through the set checklist of a regular set.
    pub async fn resolve_listed(&self, set_code: &str, number: &str, name: &str) -> Option<String> {
        let first_card = format!("{}/card?ref={}001", self.site_url, set_code);
        let page = self.pages.fetch_page(&first_card).await?;
        let Some(link) = parse_set_link(&page) else {
            debug!(set = set_code, "No set link on first card page");
            return None;
        };

        let checklist = format!("{}/{}", self.site_url, link.trim_start_matches('/'));
        let page = self.pages.fetch_page(&checklist).await?;
        let rows = parse_rows(&page);

        let code = select_listed(&rows, number, name).map(str::to_string);
        debug!(set = set_code, number, name, rows = rows.len(), code = ?code, "Listed lookup");
        code
    }

    /// Resolve through an aggregated promotional checklist.
    pub async fn resolve_promo(
        &self,
        promo_code: &str,
        name: &str,
        artist: &str,
        set_name: &str,
    ) -> Option<String> {
        let url = format!(
            "{}/set_checklist?set={}",
            self.site_url,
            promo_listing_id(promo_code)
        );
        let page = self.pages.fetch_page(&url).await?;
        let rows = parse_rows(&page);

        let candidates = score_promo_rows(&rows, name, artist, set_name);
        let best = best_candidate(&candidates).map(|c| c.code.clone());
        debug!(
            promo = promo_code,
            name,
            candidates = candidates.len(),
            code = ?best,
            "Promo lookup"
        );
        best
    }
}
