//! Brand theme model and color derivation.
//!
//! This crate validates color tokens, derives HSL triples and legible
//! foreground colors, and turns a client's display name into a slug.

pub mod color;
pub mod identity;
pub mod theme;

pub use color::{
    contrast_foreground, parse_hex, to_hsl, validate_color, Hsl, Rgb, BLACK, UNKNOWN, WHITE,
};
pub use identity::{slugify, ClientIdentity, IdentityError};
pub use theme::{Slot, Swatch, Theme};
