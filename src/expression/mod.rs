//! Expression catalog
//!
//! This module provides:
//! - The built-in table of named facial expressions
//! - Lookup, blend and intensity scaling over partial weight maps
//! - Preset categories, intensity levels and mood pools

pub mod catalog;
pub mod data;
pub mod presets;

pub use catalog::{Expression, ExpressionCatalog};
pub use presets::{Intensity, Mood};
