//! fOS Canvas Recorder
//!
//! Test doubles for `<canvas>` drawing contexts. Nothing is rasterized:
//! every mutating call on a 2D or WebGL context is transcribed into a
//! JavaScript statement, and the statements of every canvas reachable from a
//! document can be assembled, dependency first, into one replayable script.
//!
//! Features:
//! - Recording CanvasRenderingContext2D with cached property state
//! - Recording WebGL 1.0 context with symbolic enum arguments
//! - Named handles (gradients, patterns, buffers, programs, …) sharing the
//!   owning context's operation log
//! - Element factory interception for `canvas` and `img`
//! - Dependency-ordered script assembly
//!
//! ```ignore
//! use fos_canvas_recorder::{install_recorder, CanvasRenderingContext2d, FixedPitchMeasurer};
//!
//! let mut document = install_recorder(fos_dom::Document::default(), FixedPitchMeasurer::default());
//! let element = document.create_element("canvas");
//! document.host_mut().append(*element.node())?;
//!
//! let ctx = element.as_canvas().unwrap().get_context_2d().unwrap();
//! ctx.fill_rect(0.0, 0.0, 10.0, 10.0);
//!
//! let script = document.assemble_script();
//! ```

/// Declares a keyword enum that renders as its canvas API string.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $($variant:ident => $keyword:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Canvas API keyword
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword,)+
                }
            }

            /// Parse a canvas API keyword
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                match keyword {
                    $($keyword => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod assembler;
pub mod compositing;
pub mod config;
pub mod context;
pub mod context2d;
pub mod document;
pub mod drawing;
pub mod element;
pub mod literal;
pub mod log;
pub mod style;
pub mod text;
pub mod webgl;

pub use assembler::assemble_script;
pub use compositing::CompositeOperation;
pub use config::RecorderConfig;
pub use context::{ContextKind, RecordedContext, RenderingContext};
pub use context2d::{CanvasRenderingContext2d, ContextAttributes, Recording2dContext};
pub use document::{install_recorder, install_recorder_with_config, HostDocument, RecordingDocument};
pub use drawing::{CanvasImageSource, ImageBitmap, ImageData};
pub use element::{
    Canvas, Element, ElementKind, Image, RecordedElement, SurfaceState, CANVAS_EXPORT_TAG,
    PLACEHOLDER_DATA_URL,
};
pub use literal::{number_arg, string_arg, Arg};
pub use log::{Handle, OpLog};
pub use style::{
    CanvasGradient, CanvasPattern, CanvasStyle, Direction, DomMatrix2dInit, FillRule,
    ImageSmoothingQuality, LineCap, LineJoin, PatternRepetition, TextAlign, TextBaseline,
};
pub use text::{FixedPitchMeasurer, TextMeasurer, TextMetrics, TextSize};
pub use webgl::{
    BufferSource, LoseContextExtension, RecordingWebGlContext, WebGlActiveInfo, WebGlBuffer,
    WebGlContextAttributes, WebGlFramebuffer, WebGlProgram, WebGlRenderbuffer,
    WebGlRenderingContext, WebGlShader, WebGlShaderPrecisionFormat, WebGlTexture,
    WebGlUniformLocation, GL_ENUM_NAMES,
};

/// Recorder error
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The call cannot be captured as a faithful statement.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Invalid recorder configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// Fail an unsupported operation without recording anything.
pub(crate) fn not_implemented<T>(operation: impl Into<String>) -> Result<T> {
    let operation = operation.into();
    tracing::warn!(%operation, "unsupported canvas operation");
    Err(RecordError::NotImplemented(operation))
}
