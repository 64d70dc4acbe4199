//! Cardforged-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across cardforged:
//!
//! - **Error Handling**: The resolution/download error taxonomy and result alias
//! - **Core Types**: Enums for image sources and card face sides
//! - **Path Utilities**: Image extension helpers and archive entry naming
//!
//! # Examples
//!
//! ```
//! use cardforged_common::{Error, FaceSide, ImageSource, Result};
//! use cardforged_common::paths::with_image_extension;
//!
//! let source = ImageSource::Mtgpics;
//! assert_eq!(source.to_string(), "mtgpics");
//! assert!(FaceSide::Back.is_back());
//!
//! assert_eq!(with_image_extension("Damnation"), "Damnation.jpg");
//!
//! fn example() -> Result<()> {
//!     Err(Error::no_match("Damnation (MH2) 85"))
//! }
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
