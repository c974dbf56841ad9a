//! Mosaic assembly
//!
//! Renders every chunk of a square region in parallel and composites the
//! tiles into one canvas once all of them have finished.

mod assembler;
mod progress;
mod types;

pub use assembler::{MosaicAssembler, MosaicConfig, MAX_SCALE};
pub use progress::{NoProgress, ProgressObserver};
pub use types::{ChunkFailure, ChunkResult, ChunkStatus, Mosaic, MosaicError, MosaicStats};
