//! # Store Error Types
//!
//! Error types for loading and saving the machine record file.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  decode(text) ──► StoreError::Corrupt { line, reason }                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  restore / MachineStore::load ← logs at WARN, falls back to defaults    │
//! │                                                                         │
//! │  std::fs write ──► StoreError::Io                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MachineStore::save ← returned to the caller                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Record file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record text does not describe a consistent machine.
    ///
    /// ## When This Occurs
    /// - Header or coin line missing
    /// - Wrong number of fields, or a field that is not a number
    /// - Coins in the till don't add up to the recorded total
    /// - More items than the machine can hold
    ///
    /// `line` is 1-based.
    #[error("Corrupt record at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    /// Reading or writing the record file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a Corrupt error for a 1-based line number.
    pub fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            line,
            reason: reason.into(),
        }
    }

    /// Checks whether this error came from bad record content.
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
