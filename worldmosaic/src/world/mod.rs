//! World save access.
//!
//! The rendering core reads worlds through two narrow traits:
//!
//! - [`WorldStore`] answers whether a chunk exists and hands out its blocks
//! - [`BlockGrid`] exposes one chunk's block volume, one cell at a time
//!
//! Two implementations ship with the crate: [`MemoryWorld`] for tests and
//! embedding, and [`AnvilStore`] which reads Java-edition region files.

mod anvil;
mod memory;
mod types;

pub use anvil::AnvilStore;
pub use memory::{DenseChunk, MemoryWorld};
pub use types::{BlockGrid, GridError, StoreError, WorldStore};
