use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_OCTAVES: u32 = 3;
pub const DEFAULT_PERSISTENCE: f64 = 1.0;
pub const DEFAULT_LACUNARITY: f64 = 2.0;
pub const DEFAULT_EXPONENT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("octaves must be at least 1")]
    ZeroOctaves,
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

// Settings for one fBm generation pass.
// Absent fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParameters {
    pub octaves: u32,      // number of noise layers summed
    pub persistence: f64,  // amplitude decays by 2^-persistence per octave
    pub lacunarity: f64,   // frequency multiplier per octave
    pub exponent: f64,     // power curve applied after normalization
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            exponent: DEFAULT_EXPONENT,
        }
    }
}

impl NoiseParameters {
    pub fn new(
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
        exponent: f64,
    ) -> Result<Self, ParamsError> {
        let params = Self {
            octaves,
            persistence,
            lacunarity,
            exponent,
        };
        params.validate()?;
        Ok(params)
    }

    // Degenerate but finite values (e.g. lacunarity = 0) are accepted.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.octaves == 0 {
            return Err(ParamsError::ZeroOctaves);
        }
        for (name, value) in [
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("exponent", self.exponent),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite { name, value });
            }
        }
        Ok(())
    }

    // Per-octave amplitude decay factor G = 2^-persistence
    #[inline]
    pub fn gain(&self) -> f64 {
        2f64.powf(-self.persistence)
    }
}
