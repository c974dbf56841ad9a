//! Progress reporting for mosaic assembly.

use crate::coord::ChunkCoord;

use super::types::ChunkStatus;

/// Receives one notification per finished chunk.
///
/// Called from worker threads in completion order. Observability only: the
/// rendered output never depends on what an observer does.
pub trait ProgressObserver: Send + Sync {
    fn chunk_finished(&self, coord: ChunkCoord, status: ChunkStatus);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn chunk_finished(&self, _coord: ChunkCoord, _status: ChunkStatus) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(ChunkCoord, ChunkStatus) + Send + Sync,
{
    fn chunk_finished(&self, coord: ChunkCoord, status: ChunkStatus) {
        self(coord, status)
    }
}
