//! Per-record resolution pass.
//!
//! A [`CardPlan`] is computed once per record and holds every derived value
//! the downloader needs: lookup name and artist for the scraped source, and
//! for each face its saved name, artist, label, destination subfolder and
//! fallback image URL. Nothing here touches the network or the filesystem.

use cardforged_common::{Error, FaceSide, Result};
use deunicode::deunicode;
use serde::Serialize;

use super::classifier::{classify, FaceLayout, RenderingVariant};
use super::record::{label_for, CardRecord};

/// Everything needed to fetch one face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacePlan {
    pub side: FaceSide,
    /// Name used for the destination filename.
    pub name: String,
    pub artist: String,
    /// `Name (SET) number` label for logs and results.
    pub label: String,
    /// Destination subfolder under each source root.
    pub dir: &'static str,
    /// Image URL on the card API, if published.
    pub fallback_url: Option<String>,
}

/// Derived values for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardPlan {
    pub variant: RenderingVariant,
    pub set: String,
    pub set_name: String,
    pub set_type: String,
    pub number: String,
    /// Card name as the scraped source lists it.
    pub lookup_name: String,
    pub lookup_artist: String,
    /// Faces in download order (front first).
    pub faces: Vec<FacePlan>,
}

impl CardPlan {
    /// Resolve a record into a plan.
    ///
    /// `full_image` selects the full card image over the art crop for the
    /// fallback URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] when the variant needs face data the
    /// record does not carry.
    pub fn from_record(record: &CardRecord, full_image: bool) -> Result<Self> {
        let variant = classify(record);
        let traits = variant.traits();
        let record_url = record
            .image_uris
            .as_ref()
            .and_then(|uris| uris.pick(full_image))
            .map(str::to_string);

        let faces = match traits.faces {
            FaceLayout::Single => vec![FacePlan {
                side: FaceSide::Front,
                name: record.name.clone(),
                artist: deunicode(&record.artist),
                label: record.label(),
                dir: variant.front_dir(),
                fallback_url: record_url,
            }],
            FaceLayout::SingleNamedByFront => vec![FacePlan {
                side: FaceSide::Front,
                name: face_name(record, 0)?,
                artist: deunicode(&record.artist),
                label: record.label(),
                dir: variant.front_dir(),
                fallback_url: record_url,
            }],
            FaceLayout::Dual | FaceLayout::DualSharedImage => {
                let shared = traits.faces == FaceLayout::DualSharedImage;
                let mut faces = Vec::with_capacity(2);
                for index in 0..2 {
                    let side = FaceSide::from_index(index);
                    let name = face_name(record, index)?;
                    let fallback_url = if shared {
                        record_url.clone()
                    } else {
                        record
                            .face(index)
                            .and_then(|face| face.image_uris.as_ref())
                            .and_then(|uris| uris.pick(full_image))
                            .map(str::to_string)
                    };
                    faces.push(FacePlan {
                        side,
                        label: label_for(&name, &record.set, &record.collector_number),
                        artist: face_artist(record, index),
                        dir: match side {
                            FaceSide::Front => variant.front_dir(),
                            FaceSide::Back => variant.back_dir().unwrap_or(variant.front_dir()),
                        },
                        name,
                        fallback_url,
                    });
                }
                faces
            }
        };

        let lookup_name = match traits.faces {
            FaceLayout::Dual => faces[0].name.clone(),
            _ if traits.single_slash => record.name.replace("//", "/"),
            _ => record.name.clone(),
        };
        let lookup_artist = faces[0].artist.clone();

        Ok(Self {
            variant,
            set: record.set.clone(),
            set_name: record.set_name.clone(),
            set_type: record.set_type.clone(),
            number: record.collector_number.clone(),
            lookup_name,
            lookup_artist,
            faces,
        })
    }

    /// Reference code guessed from the canonical set and collector number.
    pub fn naive_code(&self) -> String {
        format!("{}{}", self.set, self.number)
    }
}

fn face_name(record: &CardRecord, index: usize) -> Result<String> {
    record
        .face(index)
        .and_then(|face| face.name.clone())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::malformed(&record.name, format!("card_faces[{index}].name")))
}

fn face_artist(record: &CardRecord, index: usize) -> String {
    record
        .face(index)
        .and_then(|face| face.artist.clone())
        .unwrap_or_else(|| record.artist.clone())
}
