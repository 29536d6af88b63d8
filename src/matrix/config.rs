//! Configuration for the sparse engine

use std::sync::TryLockError;
use tracing::debug;

use crate::scalar::Real;

/// Factor by which nonzero capacity grows when a row edit overflows it
pub const NNZ_GROWTH_FACTOR: usize = 2;

/// How operations that need a dense scratch buffer obtain one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScratchMode {
    /// Allocate a fresh buffer per call; safe for concurrent and recursive use
    #[default]
    Reentrant,
    /// Reuse one process-wide buffer per precision
    ///
    /// If the buffer is busy (another thread, or a recursive call on this
    /// one) the call falls back to a private buffer instead of blocking.
    Shared,
}

/// Configuration for the sparse engine
#[derive(Debug, Clone, Default)]
pub struct SparseConfig {
    /// Scratch buffer policy
    pub scratch_mode: ScratchMode,
}

impl SparseConfig {
    /// Config that allocates scratch space per call
    pub fn reentrant() -> Self {
        Self {
            scratch_mode: ScratchMode::Reentrant,
        }
    }

    /// Config that reuses the process-wide scratch buffer
    pub fn shared() -> Self {
        Self {
            scratch_mode: ScratchMode::Shared,
        }
    }

    /// Whether index checks were compiled in (`strict-bounds` feature)
    pub fn strict_bounds() -> bool {
        cfg!(feature = "strict-bounds")
    }

    /// Runs `f` with a zero-filled scratch buffer of length `len`
    pub(crate) fn with_scratch<T: Real, R>(&self, len: usize, f: impl FnOnce(&mut [T]) -> R) -> R {
        match self.scratch_mode {
            ScratchMode::Reentrant => {
                let mut buf = vec![T::zero(); len];
                f(buf.as_mut_slice())
            }
            ScratchMode::Shared => {
                let mut guard = match T::shared_scratch().try_lock() {
                    Ok(guard) => guard,
                    Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                    Err(TryLockError::WouldBlock) => {
                        debug!(len, "shared scratch busy, using a private buffer");
                        let mut buf = vec![T::zero(); len];
                        return f(buf.as_mut_slice());
                    }
                };
                guard.clear();
                guard.resize(len, T::zero());
                f(guard.as_mut_slice())
            }
        }
    }
}
