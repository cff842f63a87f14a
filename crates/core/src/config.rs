//! Conversion settings

use serde::{Deserialize, Serialize};
use shakmaty::CastlingMode;

/// How castling rights in FENs and castling move tokens are read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastlingConvention {
    #[default]
    Standard,
    Chess960,
}

impl CastlingConvention {
    pub fn mode(&self) -> CastlingMode {
        match self {
            CastlingConvention::Standard => CastlingMode::Standard,
            CastlingConvention::Chess960 => CastlingMode::Chess960,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub castling: CastlingConvention,
    /// Treat an early stop as an error instead of returning the partial position
    pub strict: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chess960(mut self) -> Self {
        self.castling = CastlingConvention::Chess960;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.castling, CastlingConvention::Standard);
        assert!(!config.strict);
        assert_eq!(config.castling.mode(), CastlingMode::Standard);
    }

    #[test]
    fn test_builder() {
        let config = Config::new().chess960().strict();
        assert_eq!(config.castling.mode(), CastlingMode::Chess960);
        assert!(config.strict);
    }
}
