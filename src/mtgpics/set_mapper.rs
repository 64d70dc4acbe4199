//! Canonical set code -> scraped-source set code.
//!
//! Order of checks:
//!
//! 1. static override table
//! 2. known promotional listings (returned as-is)
//! 3. set name contains `Alchemy` -> `a22`
//! 4. set name contains `Judge Gift`, or mapped code `dci` -> `dci`
//! 5. Legacy/Vintage Championship -> `uni`
//! 6. `funny`/`promo` set types: keep the code if the site has a page for
//!    `<code>001`, otherwise fall back to the catch-all `pmo` listing
//! 7. everything else keeps the mapped code

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::fetch::PageFetcher;

/// Set codes the scraped source files under an aggregated promo listing.
pub const PROMO_SETS: &[&str] = &["pmo", "dci", "a22", "uni"];

/// Catch-all promotional listing.
pub const DEFAULT_PROMO_SET: &str = "pmo";

/// Result of mapping a canonical set code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetMapping {
    /// Set code on the scraped source.
    pub code: String,
    /// Whether the printing lives in an aggregated promotional listing.
    pub promotional: bool,
}

impl SetMapping {
    fn listed(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            promotional: false,
        }
    }

    fn promo(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            promotional: true,
        }
    }
}

/// Maps canonical set codes using the configured override table.
pub struct SetMapper<'a> {
    site_url: &'a str,
    replace: &'a HashMap<String, String>,
    extra_promo_sets: &'a [String],
}

impl<'a> SetMapper<'a> {
    pub fn new(
        site_url: &'a str,
        replace: &'a HashMap<String, String>,
        extra_promo_sets: &'a [String],
    ) -> Self {
        Self {
            site_url,
            replace,
            extra_promo_sets,
        }
    }

    fn is_promo_set(&self, code: &str) -> bool {
        PROMO_SETS.contains(&code) || self.extra_promo_sets.iter().any(|s| s == code)
    }

    /// Resolve the scraped-source set for a card.
    ///
    /// Only `funny`/`promo` set types touch the network, through a single
    /// existence probe.
    pub async fn resolve_set(
        &self,
        pages: &dyn PageFetcher,
        canonical_set: &str,
        set_name: &str,
        set_type: &str,
    ) -> SetMapping {
        let code = self
            .replace
            .get(canonical_set)
            .cloned()
            .unwrap_or_else(|| canonical_set.to_string());

        if self.is_promo_set(&code) {
            return SetMapping::promo(code);
        }
        if set_name.contains("Alchemy") {
            return SetMapping::promo("a22");
        }
        if set_name.contains("Judge Gift") || code == "dci" {
            return SetMapping::promo("dci");
        }
        if matches!(set_name, "Legacy Championship" | "Vintage Championship") {
            return SetMapping::promo("uni");
        }
        if matches!(set_type, "funny" | "promo") {
            let probe = format!(
                "{}/card?ref={}001",
                self.site_url.trim_end_matches('/'),
                code
            );
            if pages.fetch_page(&probe).await.is_some() {
                debug!(set = %code, "Promo-type set has its own listing");
                return SetMapping::listed(code);
            }
            debug!(set = %code, "Promo-type set not listed, using {}", DEFAULT_PROMO_SET);
            return SetMapping::promo(DEFAULT_PROMO_SET);
        }

        SetMapping::listed(code)
    }
}
