//! Supported resource file formats.
//!
//! Only ARB bundles are handled today; the module keeps the per-format layout so the
//! file-level helpers in [`crate::codec`] stay format-agnostic.

pub mod arb;

pub use arb::Format as ArbFormat;

/// Extension (without the dot) every accepted resource file carries.
pub const RESOURCE_EXTENSION: &str = "arb";

/// Filename prefix given to every translated output.
pub const OUTPUT_PREFIX: &str = "translated_";
