//! Scraped image source.
//!
//! The site addresses each printing by an opaque reference code. Finding it
//! takes up to three steps:
//!
//! 1. [`set_mapper`] -- canonical set code -> site set code (+ promo flag)
//! 2. [`resolver`] -- set code, number and name -> reference code
//! 3. [`faces`] -- art candidates on the card page -> front/back image URL
//!
//! [`listing`] holds the HTML parsing shared by all three.

pub mod faces;
pub mod listing;
pub mod resolver;
pub mod set_mapper;

use cardforged_common::FaceSide;
use tracing::debug;

use crate::card::CardPlan;
use crate::config::Config;
use crate::fetch::PageFetcher;

pub use faces::{pick_face, ImageCandidateSet};
pub use resolver::{MatchCandidate, ReferenceResolver};
pub use set_mapper::{SetMapper, SetMapping};

/// Result of one lookup pass for a card.
///
/// Shared by every face of the card: the reference code and the candidate
/// list are looked up once, then each face picks its own image.
#[derive(Debug, Clone, PartialEq)]
pub struct MtgpicsLookup {
    pub mapping: SetMapping,
    /// Resolved reference code, or the naive `<set><number>` guess.
    pub code: String,
    /// Whether `code` came from a checklist rather than the naive guess.
    pub resolved: bool,
    pub candidates: ImageCandidateSet,
}

impl MtgpicsLookup {
    /// Image URL for one face, if the card page offered a matching candidate.
    pub fn face_url(&self, side: FaceSide) -> Option<String> {
        pick_face(&self.candidates, side)
    }
}

/// The scraped source, bound to a configuration and a page fetcher.
pub struct MtgpicsSource<'a> {
    config: &'a Config,
    pages: &'a dyn PageFetcher,
}

impl<'a> MtgpicsSource<'a> {
    pub fn new(config: &'a Config, pages: &'a dyn PageFetcher) -> Self {
        Self { config, pages }
    }

    fn site_url(&self) -> &str {
        self.config.network.mtgpics_url.trim_end_matches('/')
    }

    /// Run the set mapping, code resolution and candidate scrape for a card.
    ///
    /// Never fails: a missing page leaves the candidate set empty.
    pub async fn lookup(&self, plan: &CardPlan) -> MtgpicsLookup {
        let site = self.site_url();
        let mapper = SetMapper::new(
            site,
            &self.config.sets.replace,
            &self.config.sets.extra_promo_sets,
        );
        let mapping = mapper
            .resolve_set(self.pages, &plan.set, &plan.set_name, &plan.set_type)
            .await;

        let resolver = ReferenceResolver::new(site, self.pages);
        let resolved = resolver
            .resolve_code(
                &mapping,
                &plan.number,
                &plan.lookup_name,
                &plan.lookup_artist,
                &plan.set_name,
            )
            .await;
        let (code, resolved) = match resolved {
            Some(code) => (code, true),
            None => (plan.naive_code(), false),
        };

        let candidates = match self.pages.fetch_page(&format!("{site}/card?ref={code}")).await {
            Some(html) => {
                ImageCandidateSet::from_sources(site, &listing::parse_image_sources(&html))
            }
            None => ImageCandidateSet::default(),
        };

        debug!(
            set = %mapping.code,
            promo = mapping.promotional,
            code = %code,
            resolved,
            candidates = candidates.len(),
            "Scraped-source lookup"
        );

        MtgpicsLookup {
            mapping,
            code,
            resolved,
            candidates,
        }
    }
}
