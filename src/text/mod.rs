//! Text normalization applied to comments before feature extraction.

pub mod clean;

pub use clean::{CleanStep, TextCleaner, clean_text};
