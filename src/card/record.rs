//! Card records as delivered by the structured card API.
//!
//! Only the fields the classifier, resolver, and downloader consume are
//! modelled; everything else in the API payload is ignored. Every field is
//! optional on the wire so partial records (deck exports, hand-written JSON)
//! still deserialize.

use serde::{Deserialize, Serialize};

/// Image URLs published for a card or a card face.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_crop: Option<String>,
}

impl ImageUris {
    /// Pick the full card image or the art crop.
    pub fn pick(&self, full: bool) -> Option<&str> {
        let url = if full { &self.large } else { &self.art_crop };
        url.as_deref().filter(|u| !u.is_empty())
    }
}

/// One physical face (or named half) of a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

/// An immutable card metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub set_type: String,
    #[serde(default, alias = "cn")]
    pub collector_number: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub frame: String,
    #[serde(default)]
    pub layout: String,
    #[serde(default)]
    pub border_color: String,
    #[serde(default)]
    pub frame_effects: Vec<String>,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_faces: Option<Vec<FaceData>>,
}

impl CardRecord {
    /// Whether the record carries a face list at all (even an empty one).
    pub fn has_faces(&self) -> bool {
        self.card_faces.is_some()
    }

    /// Face at `index`, if the record has that many faces.
    pub fn face(&self, index: usize) -> Option<&FaceData> {
        self.card_faces.as_ref().and_then(|faces| faces.get(index))
    }

    /// Display label used in logs: `Name (SET) number`.
    pub fn label(&self) -> String {
        label_for(&self.name, &self.set, &self.collector_number)
    }
}

/// Build a `Name (SET) number` label.
pub fn label_for(name: &str, set: &str, number: &str) -> String {
    format!("{} ({}) {}", name, set.to_uppercase(), number)
}
