//! Recorder configuration.

use serde::{Deserialize, Serialize};

/// Configuration shared by every element a recording document creates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Separator written after every assembled statement.
    pub line_terminator: String,
    /// Refuse `getContext` for a type other than the one first bound.
    /// When disabled, the bound context is returned for any recognized type.
    pub lock_context_type: bool,
    /// Give `img` elements ids and track their `src` for assembly.
    pub record_images: bool,
    /// Initial width of recorded canvases.
    pub canvas_width: u32,
    /// Initial height of recorded canvases.
    pub canvas_height: u32,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            line_terminator: "\r\n".to_string(),
            lock_context_type: true,
            record_images: true,
            canvas_width: 300,
            canvas_height: 150,
        }
    }
}

impl RecorderConfig {
    /// Parse a JSON configuration; missing keys take their defaults.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set the statement terminator.
    pub fn with_line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Enable or disable the context type lock.
    pub fn with_context_type_lock(mut self, lock: bool) -> Self {
        self.lock_context_type = lock;
        self
    }

    /// Enable or disable `img` recording.
    pub fn with_image_recording(mut self, record: bool) -> Self {
        self.record_images = record;
        self
    }

    /// Set the initial canvas extent.
    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecorderConfig::default();
        assert_eq!(config.line_terminator, "\r\n");
        assert!(config.lock_context_type);
        assert!(config.record_images);
        assert_eq!((config.canvas_width, config.canvas_height), (300, 150));
    }

    #[test]
    fn test_from_json_partial() {
        let config = RecorderConfig::from_json(r#"{ "line_terminator": "\n", "canvas_width": 64 }"#).unwrap();
        assert_eq!(config.line_terminator, "\n");
        assert_eq!(config.canvas_width, 64);
        assert_eq!(config.canvas_height, 150);
        assert!(config.lock_context_type);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = RecorderConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::RecordError::InvalidConfig(_)));
    }

    #[test]
    fn test_builders() {
        let config = RecorderConfig::default()
            .with_line_terminator("\n")
            .with_context_type_lock(false)
            .with_image_recording(false)
            .with_canvas_size(10, 20);
        assert_eq!(config.line_terminator, "\n");
        assert!(!config.lock_context_type);
        assert!(!config.record_images);
        assert_eq!((config.canvas_width, config.canvas_height), (10, 20));
    }
}
