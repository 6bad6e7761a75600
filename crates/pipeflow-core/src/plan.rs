//! Stage planning surfaces: `StageKind` and `Footprint`.
//!
//! Streaming stages hold one element (or one token buffer) at a time.
//! Materializing stages drain some or all of their input before the first
//! element is produced, and keep the drained rows alive for as long as the
//! resulting stream lives. Callers can compare footprints before choosing a
//! stage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKind {
    /// Pulls upstream on demand; constant extra memory.
    Streaming,
    /// Drains (part of) its input inside the stage constructor.
    Materializing,
    /// Consumes the stream and ends the chain.
    Terminal,
}

/// Coarse memory model for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub kind: StageKind,
    /// Estimated bytes retained per drained row.
    pub bytes_per_row: u64,
    /// Fixed overhead (buffers, hash tables) regardless of row count.
    pub overhead_bytes: u64,
}

impl Footprint {
    pub fn streaming() -> Self {
        Self {
            kind: StageKind::Streaming,
            bytes_per_row: 0,
            overhead_bytes: 0,
        }
    }

    pub fn materializing(bytes_per_row: u64, overhead_bytes: u64) -> Self {
        Self {
            kind: StageKind::Materializing,
            bytes_per_row,
            overhead_bytes,
        }
    }

    pub fn terminal(bytes_per_row: u64) -> Self {
        Self {
            kind: StageKind::Terminal,
            bytes_per_row,
            overhead_bytes: 0,
        }
    }

    pub fn is_materializing(&self) -> bool {
        self.kind == StageKind::Materializing
    }

    /// Estimate total live bytes once `rows` rows have been drained.
    pub fn estimate_live(&self, rows: u64) -> u64 {
        self.overhead_bytes
            .saturating_add(self.bytes_per_row.saturating_mul(rows))
    }
}

/// Size of `T` as a footprint row weight.
pub fn row_bytes<T>() -> u64 {
    std::mem::size_of::<T>() as u64
}
