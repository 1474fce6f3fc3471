// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — preprocessing fallbacks, symbol decoding, payload
// post-processing and the reader that sequences them.

pub mod decoder;
pub mod enhance;
pub mod payload;
pub mod reader;

pub use decoder::{RqrrDecoder, SymbolDecoder};
pub use reader::{ImageQrReader, read_qr_code};
