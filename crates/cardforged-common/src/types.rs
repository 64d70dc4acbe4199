//! Core type definitions shared by the resolver and the downloader.
//!
//! All enums are serialized in lowercase so they read naturally in JSON
//! output and configuration files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An external image provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// The scraped image site, addressed by opaque per-card reference codes.
    Mtgpics,
    /// The structured card API, used as the fallback source.
    Scryfall,
}

impl ImageSource {
    /// Short action tag used in console and failure-log messages.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Mtgpics => "MTGP",
            Self::Scryfall => "SCRY",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mtgpics => write!(f, "mtgpics"),
            Self::Scryfall => write!(f, "scryfall"),
        }
    }
}

/// One physical printed side of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceSide {
    Front,
    Back,
}

impl FaceSide {
    /// Face side for a zero-based face index.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::Front
        } else {
            Self::Back
        }
    }

    pub fn is_back(&self) -> bool {
        matches!(self, Self::Back)
    }
}

impl fmt::Display for FaceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}
