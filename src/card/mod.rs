//! Card records and their classification.
//!
//! - [`record`] -- serde model of card records from the card API.
//! - [`classifier`] -- rendering-variant classification.
//! - [`plan`] -- one resolution pass per record producing per-face values.

pub mod classifier;
pub mod plan;
pub mod record;

pub use classifier::{classify, CardKind, FaceLayout, FrameEffect, PathTemplate, RenderingVariant};
pub use plan::{CardPlan, FacePlan};
pub use record::{CardRecord, FaceData, ImageUris};
