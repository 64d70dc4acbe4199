//! Front/back disambiguation among scraped art candidates.
//!
//! A card page lists every art thumbnail the site holds for a reference
//! code. Codes are the thumbnail basenames without extension; three-character
//! codes are numeric indexes (`085`), longer ones carry a suffix (`085b`).
//!
//! | candidates | front | back |
//! |---|---|---|
//! | 0 | none | none |
//! | 1 | the only one | none |
//! | 2 | first (sorted) | second (sorted) |
//! | >2, two or more indexes | first index | second index |
//! | >2, two or more suffixed | first suffixed | second suffixed |
//! | >2, otherwise | first suffixed (else index) | first index when a suffixed front exists |

use cardforged_common::paths::{url_basename, url_dirname, IMAGE_EXTENSION};
use cardforged_common::FaceSide;

/// Length of a numeric-index code.
const INDEX_CODE_LEN: usize = 3;

/// Path segment of art thumbnails, rewritten to the full-size segment.
const THUMB_SEGMENT: &str = "art_th";
const FULL_SEGMENT: &str = "art";

/// Scraped art candidates for one reference code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCandidateSet {
    /// Absolute directory URL of the full-size images, without trailing slash.
    pub base_url: String,
    /// Candidate codes in page order.
    pub codes: Vec<String>,
}

impl ImageCandidateSet {
    /// Build a candidate set from thumbnail `src` attributes.
    ///
    /// `site_url` is the site root the relative sources hang off.
    pub fn from_sources(site_url: &str, sources: &[String]) -> Self {
        let Some(first) = sources.first() else {
            return Self::default();
        };

        let dir = url_dirname(first).replace(THUMB_SEGMENT, FULL_SEGMENT);
        let base_url = format!(
            "{}/{}",
            site_url.trim_end_matches('/'),
            dir.trim_start_matches('/')
        );
        let suffix = format!(".{IMAGE_EXTENSION}");
        let codes = sources
            .iter()
            .map(|src| url_basename(src).replace(&suffix, ""))
            .collect();

        Self { base_url, codes }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    fn url_for(&self, code: &str) -> String {
        format!("{}/{}.{}", self.base_url, code, IMAGE_EXTENSION)
    }
}

/// Pick the image URL most likely showing the requested face.
pub fn pick_face(candidates: &ImageCandidateSet, side: FaceSide) -> Option<String> {
    pick_code(&candidates.codes, side).map(|code| candidates.url_for(code))
}

/// Pick the candidate code most likely showing the requested face.
pub fn pick_code(codes: &[String], side: FaceSide) -> Option<&str> {
    let want_back = side.is_back();

    match codes.len() {
        0 => None,
        1 => (!want_back).then(|| codes[0].as_str()),
        2 => {
            let mut sorted: Vec<&str> = codes.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            Some(sorted[usize::from(want_back)])
        }
        _ => {
            let mut sorted: Vec<&str> = codes.iter().map(String::as_str).collect();
            sorted.sort_unstable();

            let (indexes, suffixed): (Vec<&str>, Vec<&str>) = sorted
                .into_iter()
                .filter(|code| code.len() >= INDEX_CODE_LEN)
                .partition(|code| code.len() == INDEX_CODE_LEN);

            if indexes.len() > 1 {
                return Some(indexes[usize::from(want_back)]);
            }
            if suffixed.len() > 1 {
                return Some(suffixed[usize::from(want_back)]);
            }

            // At most one of each kind remains.
            match (suffixed.first(), indexes.first()) {
                (Some(front), back) => {
                    if want_back {
                        back.copied()
                    } else {
                        Some(*front)
                    }
                }
                (None, Some(only)) => (!want_back).then_some(*only),
                (None, None) => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn both(list: &[&str]) -> (Option<String>, Option<String>) {
        let c = codes(list);
        (
            pick_code(&c, FaceSide::Front).map(str::to_string),
            pick_code(&c, FaceSide::Back).map(str::to_string),
        )
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(both(&[]), (None, None));
        assert_eq!(pick_face(&ImageCandidateSet::default(), FaceSide::Front), None);
    }

    #[test]
    fn test_single_candidate_has_no_back() {
        assert_eq!(both(&["050"]), (Some("050".into()), None));
    }

    #[test]
    fn test_two_candidates_sorted() {
        assert_eq!(both(&["052", "050"]), (Some("050".into()), Some("052".into())));
    }

    #[test]
    fn test_many_candidates_prefer_indexes() {
        assert_eq!(
            both(&["101", "b", "050"]),
            (Some("050".into()), Some("101".into()))
        );
        assert_eq!(
            both(&["050", "050b", "050a", "101"]),
            (Some("050".into()), Some("101".into()))
        );
    }

    #[test]
    fn test_many_candidates_fall_back_to_suffixed() {
        assert_eq!(
            both(&["050d", "050a", "001"]),
            (Some("050a".into()), Some("050d".into()))
        );
    }

    #[test]
    fn test_degenerate_mixed_candidates() {
        // One index, one suffixed, one too short to classify.
        assert_eq!(
            both(&["050", "050b", "x"]),
            (Some("050b".into()), Some("050".into()))
        );
        // Only one usable code.
        assert_eq!(both(&["050", "x", "y"]), (Some("050".into()), None));
        // Nothing usable.
        assert_eq!(both(&["a", "b", "c"]), (None, None));
    }

    #[test]
    fn test_candidate_set_urls() {
        let sources = codes(&["pics/art_th/mh2/085.jpg", "pics/art_th/mh2/085b.jpg"]);
        let set = ImageCandidateSet::from_sources("https://www.mtgpics.com/", &sources);
        assert_eq!(set.base_url, "https://www.mtgpics.com/pics/art/mh2");
        assert_eq!(set.codes, codes(&["085", "085b"]));
        assert_eq!(
            pick_face(&set, FaceSide::Front).as_deref(),
            Some("https://www.mtgpics.com/pics/art/mh2/085.jpg")
        );
        assert_eq!(
            pick_face(&set, FaceSide::Back).as_deref(),
            Some("https://www.mtgpics.com/pics/art/mh2/085b.jpg")
        );
    }
}
