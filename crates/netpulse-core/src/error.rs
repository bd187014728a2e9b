// ── Core error types ──
//
// Errors raised by registry and intake operations. Lookup misses on the
// state container are silent no-ops and never produce an error.

use thiserror::Error;

use crate::model::DeviceId;

/// Unified error type for the core crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    // ── Intake errors ────────────────────────────────────────────────
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    // ── Registry errors ──────────────────────────────────────────────
    #[error("Device already registered: {id}")]
    DuplicateDevice { id: DeviceId },
}
