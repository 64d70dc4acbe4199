//! Rendering-variant classification for card records.
//!
//! This module decides which rendering of a card exists and how it is laid
//! out on disk. Classification is a pure function of the record.
//!
//! ## Kind rules (first match wins)
//!
//! 1. Type line contains `Planeswalker` and there is no face list -> Planeswalker
//! 2. Type line contains `Saga` and there is no face list -> Saga
//! 3. Keywords contain `Mutate` -> Mutate
//! 4. Type line contains `Land` and there is no face list -> Land
//!    (BasicLand when it contains `Basic Land`)
//! 5. Otherwise the declared layout, defaulting to Normal
//!
//! ## Path templates
//!
//! Independently of the kind, the destination subfolder is picked from the
//! token layout, a borderless border, a classic frame, or the first
//! recognised frame effect, in that order.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::CardRecord;

/// Layout-level card kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Normal,
    Token,
    Adventure,
    Flip,
    Split,
    Transform,
    ModalDfc,
    Reversible,
    /// Single-face for now; meld pairs are not rendered as two faces.
    Meld,
    Planeswalker,
    Saga,
    Land,
    BasicLand,
    Leveler,
    Mutate,
    Class,
    Planar,
}

/// How a kind maps a record onto physical faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceLayout {
    /// One face named after the record.
    Single,
    /// One face, saved under the first face's name (adventure, flip).
    SingleNamedByFront,
    /// Two faces, each with its own name, artist and image.
    Dual,
    /// Two named faces sharing the record's single image (split).
    DualSharedImage,
}

impl FaceLayout {
    pub fn face_count(&self) -> usize {
        match self {
            Self::Single | Self::SingleNamedByFront => 1,
            Self::Dual | Self::DualSharedImage => 2,
        }
    }
}

/// Per-kind behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTraits {
    pub faces: FaceLayout,
    /// The scraped source shows compound names with a single slash (`A / B`).
    pub single_slash: bool,
}

impl CardKind {
    /// Behaviour table indexed by kind.
    pub fn traits(&self) -> KindTraits {
        let (faces, single_slash) = match self {
            Self::Adventure | Self::Flip => (FaceLayout::SingleNamedByFront, true),
            Self::Split => (FaceLayout::DualSharedImage, true),
            Self::Transform | Self::ModalDfc | Self::Reversible => (FaceLayout::Dual, false),
            Self::Normal
            | Self::Token
            | Self::Meld
            | Self::Planeswalker
            | Self::Saga
            | Self::Land
            | Self::BasicLand
            | Self::Leveler
            | Self::Mutate
            | Self::Class
            | Self::Planar => (FaceLayout::Single, false),
        };
        KindTraits {
            faces,
            single_slash,
        }
    }

    /// Kind for a declared layout tag; unknown layouts render as Normal.
    pub fn from_layout(layout: &str) -> Self {
        match layout {
            "transform" => Self::Transform,
            "modal_dfc" => Self::ModalDfc,
            "adventure" => Self::Adventure,
            "leveler" => Self::Leveler,
            "saga" => Self::Saga,
            "planar" => Self::Planar,
            "meld" => Self::Meld,
            "class" => Self::Class,
            "split" => Self::Split,
            "flip" => Self::Flip,
            "token" => Self::Token,
            "reversible_card" => Self::Reversible,
            _ => Self::Normal,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "normal",
            Self::Token => "token",
            Self::Adventure => "adventure",
            Self::Flip => "flip",
            Self::Split => "split",
            Self::Transform => "transform",
            Self::ModalDfc => "modal_dfc",
            Self::Reversible => "reversible",
            Self::Meld => "meld",
            Self::Planeswalker => "planeswalker",
            Self::Saga => "saga",
            Self::Land => "land",
            Self::BasicLand => "basic_land",
            Self::Leveler => "leveler",
            Self::Mutate => "mutate",
            Self::Class => "class",
            Self::Planar => "planar",
        };
        write!(f, "{s}")
    }
}

/// Frame effects that get their own destination folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameEffect {
    Enchantment,
    Miracle,
    Colorshifted,
    ExtendedArt,
    Etched,
    Snow,
}

impl FrameEffect {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "enchantment" => Some(Self::Enchantment),
            "miracle" => Some(Self::Miracle),
            "colorshifted" => Some(Self::Colorshifted),
            "extendedart" => Some(Self::ExtendedArt),
            "etched" => Some(Self::Etched),
            "snow" => Some(Self::Snow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enchantment => "enchantment",
            Self::Miracle => "miracle",
            Self::Colorshifted => "colorshifted",
            Self::ExtendedArt => "extendedart",
            Self::Etched => "etched",
            Self::Snow => "snow",
        }
    }
}

/// Destination subfolder for a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathTemplate {
    Normal,
    Token,
    Borderless,
    Classic,
    Effect(FrameEffect),
}

impl PathTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Token => "token",
            Self::Borderless => "borderless",
            Self::Classic => "classic",
            Self::Effect(effect) => effect.as_str(),
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification output for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderingVariant {
    pub kind: CardKind,
    pub template: PathTemplate,
}

impl RenderingVariant {
    pub fn traits(&self) -> KindTraits {
        self.kind.traits()
    }

    pub fn face_count(&self) -> usize {
        self.traits().faces.face_count()
    }

    /// Subfolder for the front face.
    pub fn front_dir(&self) -> &'static str {
        self.template.as_str()
    }

    /// Subfolder for the back face, or `None` for single-face variants.
    ///
    /// Back faces currently share the front template's folder.
    pub fn back_dir(&self) -> Option<&'static str> {
        (self.face_count() > 1).then(|| self.template.as_str())
    }
}

/// Classify a card record into its rendering variant.
pub fn classify(record: &CardRecord) -> RenderingVariant {
    RenderingVariant {
        kind: classify_kind(record),
        template: path_template(record),
    }
}

fn classify_kind(record: &CardRecord) -> CardKind {
    let single = !record.has_faces();
    let type_line = record.type_line.as_str();

    if single && type_line.contains("Planeswalker") {
        return CardKind::Planeswalker;
    }
    if single && type_line.contains("Saga") {
        return CardKind::Saga;
    }
    if record.keywords.iter().any(|k| k == "Mutate") {
        return CardKind::Mutate;
    }
    if single && type_line.contains("Land") {
        if type_line.contains("Basic Land") {
            return CardKind::BasicLand;
        }
        return CardKind::Land;
    }

    CardKind::from_layout(&record.layout)
}

fn path_template(record: &CardRecord) -> PathTemplate {
    if record.layout == "token" {
        return PathTemplate::Token;
    }
    if record.border_color == "borderless" {
        return PathTemplate::Borderless;
    }
    if matches!(record.frame.as_str(), "1993" | "1995") {
        return PathTemplate::Classic;
    }

    record
        .frame_effects
        .iter()
        .find_map(|tag| FrameEffect::from_tag(tag))
        .map(PathTemplate::Effect)
        .unwrap_or(PathTemplate::Normal)
}
