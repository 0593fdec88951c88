//! Per-file failure type used by the pipeline.

use thiserror::Error;

use crate::codec::CodecError;
use crate::report::LogLevel;
use crate::transforms::fog::FogError;
use crate::transforms::heightmap::DimensionMismatch;

/// Why a single file could not be tuned.
#[derive(Debug, Error)]
pub enum TuneError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Fog(#[from] FogError),

    #[error("Dimension mismatch: {0}")]
    Dimensions(#[from] DimensionMismatch),
}

impl TuneError {
    /// Stable error code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            TuneError::Codec(e) => e.code(),
            TuneError::Fog(e) => e.code(),
            TuneError::Dimensions(_) => "TUNE_001",
        }
    }

    /// Severity of the log line this failure produces.
    ///
    /// Disk failures are errors; unusable content (undecodable images,
    /// malformed JSON, mismatched pairs) only skips the file.
    pub fn level(&self) -> LogLevel {
        match self {
            TuneError::Codec(CodecError::Io(_)) | TuneError::Fog(FogError::Io(_)) => {
                LogLevel::Error
            }
            _ => LogLevel::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let io = TuneError::from(CodecError::Io(std::io::Error::other("disk")));
        assert_eq!(io.level(), LogLevel::Error);
        assert_eq!(io.code(), "CODEC_001");

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let fog = TuneError::from(FogError::Json(json));
        assert_eq!(fog.level(), LogLevel::Warning);

        let dims = TuneError::from(DimensionMismatch {
            color: (1, 1),
            heightmap: (2, 2),
        });
        assert_eq!(dims.level(), LogLevel::Warning);
        assert_eq!(dims.code(), "TUNE_001");
    }
}
