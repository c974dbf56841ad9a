//! Parallel mosaic assembler.

use std::sync::Arc;
use std::time::Instant;

use image::{imageops, RgbaImage};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::coord::{region_offsets, ChunkCoord, LocalOffset, TILE_SIZE};
use crate::tile::{ChunkGenerator, BACKGROUND};

use super::progress::{NoProgress, ProgressObserver};
use super::types::{ChunkFailure, ChunkResult, Mosaic, MosaicError, MosaicStats};

/// Largest accepted scale: a 32768×32768 pixel canvas.
pub const MAX_SCALE: u32 = 2048;

/// Settings for mosaic assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Worker threads; 0 uses one per CPU.
    pub threads: usize,
    /// Fail the whole mosaic if any chunk fails.
    pub strict: bool,
}

impl MosaicConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Assembles chunk tiles into a square mosaic.
///
/// Every chunk of the region is generated as an independent task on a
/// dedicated rayon pool. Results are collected in full before the canvas is
/// touched, and only the calling thread writes to the canvas, one tile per
/// `(i*16, j*16)` slot.
pub struct MosaicAssembler {
    generator: Arc<dyn ChunkGenerator>,
    config: MosaicConfig,
}

impl MosaicAssembler {
    pub fn new(generator: Arc<dyn ChunkGenerator>, config: MosaicConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Render the `scale`×`scale` chunk region whose top-left chunk is `origin`.
    pub fn assemble(&self, origin: ChunkCoord, scale: u32) -> Result<Mosaic, MosaicError> {
        self.assemble_with_progress(origin, scale, &NoProgress)
    }

    /// Like [`assemble`](Self::assemble), notifying `progress` as each chunk finishes.
    ///
    /// # Errors
    ///
    /// - [`MosaicError::InvalidScale`] if `scale` is 0 or above [`MAX_SCALE`]
    /// - [`MosaicError::CoordinateOverflow`] if the region leaves the `i32` range
    /// - [`MosaicError::ThreadPool`] if the worker pool cannot be built
    /// - [`MosaicError::PartialFailure`] in strict mode, if any chunk failed
    pub fn assemble_with_progress(
        &self,
        origin: ChunkCoord,
        scale: u32,
        progress: &dyn ProgressObserver,
    ) -> Result<Mosaic, MosaicError> {
        if scale == 0 || scale > MAX_SCALE {
            return Err(MosaicError::InvalidScale { scale });
        }

        let jobs: Vec<(LocalOffset, ChunkCoord)> = region_offsets(scale)
            .map(|offset| {
                origin
                    .offset(offset)
                    .map(|coord| (offset, coord))
                    .ok_or(MosaicError::CoordinateOverflow { origin, scale })
            })
            .collect::<Result<_, _>>()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("mosaic-worker-{}", i))
            .build()
            .map_err(|e| MosaicError::ThreadPool(e.to_string()))?;

        info!(
            origin = %origin,
            scale,
            chunks = jobs.len(),
            threads = pool.current_num_threads(),
            "Assembling mosaic"
        );

        let start = Instant::now();

        // collect() is the barrier: every chunk has finished once it returns.
        let results: Vec<ChunkResult> = pool.install(|| {
            jobs.par_iter()
                .map(|&(offset, coord)| {
                    let result = ChunkResult {
                        offset,
                        coord,
                        outcome: self.generator.generate(coord),
                    };
                    progress.chunk_finished(coord, result.status());
                    result
                })
                .collect()
        });

        let side = scale * TILE_SIZE;
        let mut canvas = RgbaImage::from_pixel(side, side, BACKGROUND);
        let mut stats = MosaicStats {
            total: results.len(),
            ..Default::default()
        };
        let mut failures = Vec::new();

        for result in results {
            match result.outcome {
                Ok(Some(tile)) => {
                    let (px, py) = result.offset.pixel_origin();
                    imageops::replace(&mut canvas, tile.image(), i64::from(px), i64::from(py));
                    stats.rendered += 1;
                }
                Ok(None) => {
                    debug!(chunk = %result.coord, "Chunk not present");
                    stats.absent += 1;
                }
                Err(error) => {
                    warn!(
                        chunk_x = result.coord.x,
                        chunk_z = result.coord.z,
                        error = %error,
                        "Chunk failed to render, leaving it blank"
                    );
                    failures.push(ChunkFailure {
                        offset: result.offset,
                        coord: result.coord,
                        error,
                    });
                }
            }
        }

        stats.failed = failures.len();
        stats.elapsed_secs = start.elapsed().as_secs_f64();

        info!(
            rendered = stats.rendered,
            absent = stats.absent,
            failed = stats.failed,
            elapsed_secs = stats.elapsed_secs,
            "Mosaic assembled"
        );

        if self.config.strict && !failures.is_empty() {
            return Err(MosaicError::PartialFailure {
                total: stats.total,
                failures,
            });
        }

        Ok(Mosaic {
            canvas,
            stats,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::ChunkStatus;
    use crate::tile::{GenerateError, Tile};
    use crate::world::StoreError;
    use image::Rgba;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    enum Cell {
        Color(Rgba<u8>),
        Fail,
    }

    /// Generator returning solid tiles for configured coordinates.
    #[derive(Default)]
    struct MockChunkGenerator {
        cells: HashMap<ChunkCoord, Cell>,
        calls: AtomicUsize,
    }

    impl MockChunkGenerator {
        fn with(mut self, x: i32, z: i32, cell: Cell) -> Self {
            self.cells.insert(ChunkCoord::new(x, z), cell);
            self
        }
    }

    impl ChunkGenerator for MockChunkGenerator {
        fn generate(&self, coord: ChunkCoord) -> Result<Option<Tile>, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.cells.get(&coord) {
                Some(Cell::Color(color)) => Ok(Some(Tile::filled(*color))),
                Some(Cell::Fail) => Err(GenerateError::Store(StoreError::ChunkDecode {
                    coord,
                    reason: "corrupt".to_string(),
                })),
                None => Ok(None),
            }
        }
    }

    fn assembler(generator: MockChunkGenerator, config: MosaicConfig) -> MosaicAssembler {
        MosaicAssembler::new(Arc::new(generator), config)
    }

    fn quadrant_is(canvas: &RgbaImage, qx: u32, qz: u32, color: Rgba<u8>) -> bool {
        (0..16).all(|dx| (0..16).all(|dz| *canvas.get_pixel(qx * 16 + dx, qz * 16 + dz) == color))
    }

    #[test]
    fn test_mosaic_placement() {
        let generator = MockChunkGenerator::default()
            .with(0, 0, Cell::Color(RED))
            .with(1, 1, Cell::Color(BLUE));
        let mosaic = assembler(generator, MosaicConfig::default())
            .assemble(ChunkCoord::new(0, 0), 2)
            .unwrap();

        assert_eq!(mosaic.canvas.dimensions(), (32, 32));
        assert!(quadrant_is(&mosaic.canvas, 0, 0, RED));
        assert!(quadrant_is(&mosaic.canvas, 1, 1, BLUE));
        assert!(quadrant_is(&mosaic.canvas, 1, 0, BACKGROUND));
        assert!(quadrant_is(&mosaic.canvas, 0, 1, BACKGROUND));
        assert_eq!(mosaic.stats.rendered, 2);
        assert_eq!(mosaic.stats.absent, 2);
        assert!(mosaic.is_complete());
    }

    #[test]
    fn test_origin_offsets_coordinates() {
        let generator = MockChunkGenerator::default().with(-9, 4, Cell::Color(RED));
        let mosaic = assembler(generator, MosaicConfig::default())
            .assemble(ChunkCoord::new(-10, 3), 2)
            .unwrap();

        // (-9, 4) is offset (1, 1) from (-10, 3)
        assert!(quadrant_is(&mosaic.canvas, 1, 1, RED));
        assert!(quadrant_is(&mosaic.canvas, 0, 0, BACKGROUND));
    }

    #[test]
    fn test_every_chunk_attempted_once() {
        let generator = Arc::new(MockChunkGenerator::default());
        let assembler = MosaicAssembler::new(generator.clone(), MosaicConfig::default().with_threads(3));
        let mosaic = assembler.assemble(ChunkCoord::new(0, 0), 5).unwrap();

        assert_eq!(generator.calls.load(Ordering::SeqCst), 25);
        assert_eq!(mosaic.stats.total, 25);
        assert_eq!(mosaic.stats.absent, 25);
        assert!(mosaic.canvas.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_failure_reported_not_fatal() {
        let generator = MockChunkGenerator::default()
            .with(0, 0, Cell::Color(RED))
            .with(1, 0, Cell::Fail)
            .with(0, 1, Cell::Color(BLUE));
        let mosaic = assembler(generator, MosaicConfig::default())
            .assemble(ChunkCoord::new(0, 0), 2)
            .unwrap();

        assert_eq!(mosaic.stats.rendered, 2);
        assert_eq!(mosaic.stats.failed, 1);
        assert_eq!(mosaic.failures.len(), 1);
        assert_eq!(mosaic.failures[0].coord, ChunkCoord::new(1, 0));
        assert_eq!(mosaic.failures[0].offset, LocalOffset::new(1, 0));
        assert!(quadrant_is(&mosaic.canvas, 1, 0, BACKGROUND));
        assert!(quadrant_is(&mosaic.canvas, 0, 1, BLUE));
        assert!(!mosaic.is_complete());
    }

    #[test]
    fn test_strict_mode_fails_on_any_failure() {
        let generator = MockChunkGenerator::default()
            .with(0, 0, Cell::Color(RED))
            .with(1, 1, Cell::Fail);
        let result = assembler(generator, MosaicConfig::default().with_strict(true))
            .assemble(ChunkCoord::new(0, 0), 2);

        match result {
            Err(MosaicError::PartialFailure { total, failures }) => {
                assert_eq!(total, 4);
                assert_eq!(failures.len(), 1);
            }
            other => panic!("expected partial failure, got {:?}", other.map(|m| m.stats)),
        }
    }

    #[test]
    fn test_strict_mode_passes_when_clean() {
        let generator = MockChunkGenerator::default().with(0, 0, Cell::Color(RED));
        let mosaic = assembler(generator, MosaicConfig::default().with_strict(true))
            .assemble(ChunkCoord::new(0, 0), 1)
            .unwrap();
        assert!(quadrant_is(&mosaic.canvas, 0, 0, RED));
    }

    #[test]
    fn test_invalid_scale() {
        let a = assembler(MockChunkGenerator::default(), MosaicConfig::default());
        assert!(matches!(
            a.assemble(ChunkCoord::new(0, 0), 0),
            Err(MosaicError::InvalidScale { scale: 0 })
        ));
        assert!(matches!(
            a.assemble(ChunkCoord::new(0, 0), MAX_SCALE + 1),
            Err(MosaicError::InvalidScale { .. })
        ));
    }

    #[test]
    fn test_coordinate_overflow() {
        let generator = MockChunkGenerator::default();
        let result = assembler(generator, MosaicConfig::default())
            .assemble(ChunkCoord::new(i32::MAX, 0), 2);
        assert!(matches!(result, Err(MosaicError::CoordinateOverflow { .. })));
    }

    #[test]
    fn test_progress_sees_every_chunk() {
        let generator = MockChunkGenerator::default()
            .with(0, 0, Cell::Color(RED))
            .with(2, 2, Cell::Fail);
        let seen: Mutex<Vec<(ChunkCoord, ChunkStatus)>> = Mutex::new(Vec::new());
        let observer = |coord: ChunkCoord, status: ChunkStatus| seen.lock().push((coord, status));

        assembler(generator, MosaicConfig::default())
            .assemble_with_progress(ChunkCoord::new(0, 0), 3, &observer)
            .unwrap();

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 9);
        assert!(seen.contains(&(ChunkCoord::new(0, 0), ChunkStatus::Rendered)));
        assert!(seen.contains(&(ChunkCoord::new(2, 2), ChunkStatus::Failed)));
        assert_eq!(
            seen.iter().filter(|(_, s)| *s == ChunkStatus::Absent).count(),
            7
        );
    }

    #[test]
    fn test_encode_round_trip_dimensions() {
        let generator = MockChunkGenerator::default().with(0, 0, Cell::Color(RED));
        let mosaic = assembler(generator, MosaicConfig::default())
            .assemble(ChunkCoord::new(0, 0), 3)
            .unwrap();

        let bytes = mosaic.encode(&crate::codec::PngCodec).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (48, 48));
        assert_eq!(decoded.get_pixel(0, 0), &RED);
    }
}
