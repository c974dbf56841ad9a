//! Block identifiers and legacy name compatibility.
//!
//! Block types are named by namespaced string identifiers such as
//! `minecraft:stone`. Saves written by older game versions use names that
//! were later renamed; [`LegacyRemap`] maps those to their current spelling
//! before any texture lookup happens.

mod id;
mod legacy;

pub use id::BlockId;
pub use legacy::{LegacyRemap, LegacyTable};
