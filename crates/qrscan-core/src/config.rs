// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration.

use serde::{Deserialize, Serialize};

use crate::error::{QrScanError, Result};
use crate::types::DecodeStage;

/// Tunables for the preprocessing fallback chain.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Side length of the square Gaussian blur kernel (odd, >= 3).
    pub blur_kernel_size: u32,
    /// Neighbourhood size for adaptive thresholding (odd, >= 3).
    pub adaptive_block_size: u32,
    /// Constant subtracted from the weighted neighbourhood mean.
    pub adaptive_c: i32,
    /// Decode non-UTF-8 payloads as Latin-1. When off, such payloads are
    /// rendered as an escaped byte literal instead.
    pub latin1_fallback: bool,
    /// Stages to attempt, in order.
    pub stages: Vec<DecodeStage>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            adaptive_block_size: 11,
            adaptive_c: 2,
            latin1_fallback: true,
            stages: DecodeStage::ALL.to_vec(),
        }
    }
}

impl ScanConfig {
    /// Check the kernel sizes and stage list.
    pub fn validate(&self) -> Result<()> {
        check_window("blur_kernel_size", self.blur_kernel_size)?;
        check_window("adaptive_block_size", self.adaptive_block_size)?;
        if self.stages.is_empty() {
            return Err(QrScanError::InvalidConfig(
                "stages must name at least one decode stage".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}

fn check_window(name: &str, size: u32) -> Result<()> {
    if size < 3 || size % 2 == 0 {
        return Err(QrScanError::InvalidConfig(format!(
            "{name} must be odd and at least 3, got {size}"
        )));
    }
    Ok(())
}
