//! Cardforged - card art downloader
//!
//! Resolves which rendering of a card a record describes, finds the matching
//! art on the scraped image source, and falls back to the card API.
//!
//! The library crate exposes the core functionality for integration testing.

pub mod archive;
pub mod card;
pub mod config;
pub mod download;
pub mod fetch;
pub mod lists;
pub mod mtgpics;
pub mod naming;
