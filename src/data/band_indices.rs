use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// Zero-based positions of the spectral bands inside a raster band stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandIndices {
    pub red: usize,
    pub green: usize,
    pub blue: usize,
    pub nir: usize,
}

// WorldView-style 8 band ordering.
impl Default for BandIndices {
    fn default() -> Self {
        Self {
            red: 4,
            green: 2,
            blue: 1,
            nir: 7,
        }
    }
}

impl BandIndices {
    pub fn validate(&self, band_count: usize) -> Result<(), ConfigError> {
        for (band, index) in [("red", self.red), ("green", self.green), ("blue", self.blue), ("nir", self.nir)] {
            if index >= band_count {
                return Err(ConfigError::BandOutOfRange { band, index, count: band_count });
            }
        }
        Ok(())
    }
}
