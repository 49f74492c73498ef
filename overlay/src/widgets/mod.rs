//! Reusable drawing widgets for the overlay
//!
//! Each widget renders to a [`crate::surface::TextSurface`].

mod shadowed_label;

pub use shadowed_label::ShadowedLabel;
