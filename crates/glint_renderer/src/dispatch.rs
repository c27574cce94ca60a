//! Row-based parallel dispatch.
//!
//! Image rows are handed to a fixed set of workers in guided chunks: each
//! request takes a share of whatever is left, so chunks start large and
//! shrink towards single rows near the end. A chunk is a disjoint `&mut`
//! slice of the output buffer, so workers write pixels without any locking;
//! only the hand-out of the next chunk is serialized.

use std::sync::{Mutex, PoisonError};

use crate::random::Xorshift32;

/// A run of whole image rows owned by one worker.
#[derive(Debug)]
pub struct RowChunk<'a> {
    /// Index of the first row in the chunk, counted from the top
    pub first_row: u32,
    /// Packed pixels of the chunk's rows
    pub pixels: &'a mut [u32],
}

impl<'a> RowChunk<'a> {
    /// Number of rows in the chunk.
    pub fn row_count(&self, width: usize) -> usize {
        self.pixels.len() / width
    }

    /// Split into `(row_index, row_pixels)` pairs.
    pub fn into_rows(self, width: usize) -> impl Iterator<Item = (u32, &'a mut [u32])> {
        let first_row = self.first_row;
        let pixels: &'a mut [u32] = self.pixels;
        pixels
            .chunks_exact_mut(width)
            .enumerate()
            .map(move |(i, row)| (first_row + i as u32, row))
    }
}

/// Per-worker bookkeeping returned by [`RowDispatcher::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub worker: usize,
    pub chunks: usize,
    pub rows: usize,
}

/// Rows not yet handed out.
struct Pending<'a> {
    next_row: u32,
    pixels: &'a mut [u32],
}

/// Hands out disjoint row chunks of a pixel buffer.
pub struct RowDispatcher<'a> {
    width: usize,
    workers: usize,
    pending: Mutex<Pending<'a>>,
}

impl<'a> RowDispatcher<'a> {
    /// Dispatch the rows of `pixels` (row-major, `width` pixels per row)
    /// across `workers` workers.
    pub fn new(pixels: &'a mut [u32], width: usize, workers: usize) -> Self {
        Self {
            width,
            workers: workers.max(1),
            pending: Mutex::new(Pending {
                next_row: 0,
                pixels,
            }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Take the next chunk, or `None` once every row has been handed out.
    pub fn next_chunk(&self) -> Option<RowChunk<'a>> {
        if self.width == 0 {
            return None;
        }

        // The guarded section never panics, but don't cascade a poisoned lock
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let remaining_rows = pending.pixels.len() / self.width;
        if remaining_rows == 0 {
            return None;
        }

        let rows = guided_chunk_rows(remaining_rows, self.workers);
        let tail = std::mem::take(&mut pending.pixels);
        let (head, rest) = tail.split_at_mut(rows * self.width);
        pending.pixels = rest;

        let first_row = pending.next_row;
        pending.next_row += rows as u32;

        Some(RowChunk {
            first_row,
            pixels: head,
        })
    }

    /// Run `render_row` over every row on `pool`.
    ///
    /// Spawns exactly `workers` tasks; task `i` owns
    /// `Xorshift32::for_worker(i)` for its whole lifetime and pulls chunks
    /// until none are left.
    pub fn run<F>(&self, pool: &rayon::ThreadPool, render_row: F) -> Vec<WorkerStats>
    where
        F: Fn(u32, &mut [u32], &mut Xorshift32) + Sync,
    {
        let mut stats = vec![WorkerStats::default(); self.workers];
        let render_row = &render_row;

        pool.scope(|scope| {
            for (worker, slot) in stats.iter_mut().enumerate() {
                scope.spawn(move |_| {
                    let mut rng = Xorshift32::for_worker(worker);
                    slot.worker = worker;

                    while let Some(chunk) = self.next_chunk() {
                        slot.chunks += 1;
                        for (row, pixels) in chunk.into_rows(self.width) {
                            render_row(row, pixels, &mut rng);
                            slot.rows += 1;
                        }
                    }
                });
            }
        });

        stats
    }
}

/// Guided chunk size: half of an even share of what is left, at least one row.
pub fn guided_chunk_rows(remaining_rows: usize, workers: usize) -> usize {
    let share = remaining_rows.div_ceil(2 * workers.max(1));
    share.clamp(1, remaining_rows.max(1))
}
