//! Terminal progress bar for mosaic assembly.

use indicatif::{ProgressBar, ProgressStyle};
use worldmosaic::coord::ChunkCoord;
use worldmosaic::orchestrator::{ChunkStatus, ProgressObserver};

/// Progress observer drawing an `indicatif` bar of finished chunks.
pub struct ChunkProgressBar {
    bar: ProgressBar,
}

impl ChunkProgressBar {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template(
            "{percent:>3}% [{bar:40.cyan/blue}] {pos}/{len} chunks ({per_sec}, {eta})",
        ) {
            bar.set_style(style.progress_chars("=>_"));
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ChunkProgressBar {
    fn chunk_finished(&self, _coord: ChunkCoord, _status: ChunkStatus) {
        self.bar.inc(1);
    }
}
