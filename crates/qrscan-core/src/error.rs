// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for qrscan.

use thiserror::Error;

/// Top-level error type for all qrscan operations.
#[derive(Debug, Error)]
pub enum QrScanError {
    // -- Image errors --
    #[error("failed to open image {path}: {reason}")]
    ImageLoad { path: String, reason: String },

    #[error("failed to decode image bytes: {0}")]
    ImageDecode(String),

    // -- Symbol decoding --
    #[error("symbol decoder failed: {0}")]
    Decode(String),

    // -- Configuration --
    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, QrScanError>;
