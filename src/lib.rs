//! imgfx - command-line image transformation pipeline
//!
//! Decodes one image, applies the flag-selected transforms from
//! `pixel-filters` in order, and writes the result.
//! This library exposes modules for integration testing.

pub mod error;
pub mod logging;
pub mod models;
pub mod rendering;
pub mod services;
