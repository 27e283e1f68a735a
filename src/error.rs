//! Central error handling for glyph3d
//!
//! Provides a unified TextMeshError enum covering configuration, font and
//! geometry failures. Geometry-local problems (missing glyphs, degenerate
//! contours) are recovered where they occur; the rest propagate with `?`.

/// Centralized error type for all text mesh operations
#[derive(thiserror::Error, Debug)]
pub enum TextMeshError {
    #[error("Font does not contain a definition for '{0}'")]
    MissingGlyph(char),

    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    #[error("Unknown bevel style: {0}")]
    InvalidBevelStyle(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Tessellation error: {0}")]
    Tessellation(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl TextMeshError {
    /// Short category label used when logging
    pub fn category(&self) -> &'static str {
        match self {
            TextMeshError::MissingGlyph(_) => "Glyph",
            TextMeshError::FontUnavailable(_) => "Font",
            TextMeshError::InvalidBevelStyle(_) => "Config",
            TextMeshError::InvalidParameter(_) => "Config",
            TextMeshError::Tessellation(_) => "Geometry",
            TextMeshError::Config(_) => "Config",
        }
    }

    /// True for failures that only affect a single glyph or contour
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TextMeshError::MissingGlyph(_))
    }

    pub fn font_unavailable<T: ToString>(msg: T) -> Self {
        TextMeshError::FontUnavailable(msg.to_string())
    }

    pub fn invalid_parameter<T: ToString>(msg: T) -> Self {
        TextMeshError::InvalidParameter(msg.to_string())
    }

    pub fn tessellation<T: ToString>(msg: T) -> Self {
        TextMeshError::Tessellation(msg.to_string())
    }
}

/// Result type alias for text mesh operations
pub type TextMeshResult<T> = Result<T, TextMeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_glyph_is_recoverable() {
        let err = TextMeshError::MissingGlyph('x');
        assert!(err.is_recoverable());
        assert_eq!(err.category(), "Glyph");
        assert_eq!(
            err.to_string(),
            "Font does not contain a definition for 'x'"
        );
    }

    #[test]
    fn configuration_errors_are_fatal() {
        assert!(!TextMeshError::InvalidBevelStyle("wavy".into()).is_recoverable());
        assert!(!TextMeshError::font_unavailable("fetch failed").is_recoverable());
    }
}
