//! Rendering Contexts
//!
//! What the assembler needs from any bound context, and the value returned
//! by `getContext`.

use crate::context2d::Recording2dContext;
use crate::element::RecordedElement;
use crate::webgl::RecordingWebGlContext;

/// Context type accepted by `getContext`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    TwoD,
    WebGl,
}

impl ContextKind {
    /// Type string used by `getContext`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoD => "2d",
            Self::WebGl => "webgl",
        }
    }

    /// Recognized context types; anything else yields no context
    pub fn from_type(context_type: &str) -> Option<Self> {
        match context_type {
            "2d" => Some(Self::TwoD),
            "webgl" => Some(Self::WebGl),
            _ => None,
        }
    }

    /// Prefix of the context variable name (`_c0`, `_cgl0`)
    pub(crate) fn var_prefix(self) -> &'static str {
        match self {
            Self::TwoD => "_c",
            Self::WebGl => "_cgl",
        }
    }
}

/// A context whose calls are captured as statements
pub trait RecordedContext {
    fn kind(&self) -> ContextKind;

    /// Variable name of the context in the script
    fn var_name(&self) -> &str;

    /// All statements in call order
    fn statements(&self) -> Vec<String>;

    /// Statements joined with `separator`
    fn script(&self, separator: &str) -> String {
        self.statements().join(separator)
    }

    /// Elements this context draws from, in first-use order
    fn sources(&self) -> Vec<RecordedElement> {
        Vec::new()
    }
}

/// Context bound to a canvas
#[derive(Debug, Clone)]
pub enum RenderingContext {
    TwoD(Recording2dContext),
    WebGl(RecordingWebGlContext),
}

impl RenderingContext {
    pub fn as_2d(&self) -> Option<&Recording2dContext> {
        match self {
            Self::TwoD(ctx) => Some(ctx),
            Self::WebGl(_) => None,
        }
    }

    pub fn as_webgl(&self) -> Option<&RecordingWebGlContext> {
        match self {
            Self::WebGl(ctx) => Some(ctx),
            Self::TwoD(_) => None,
        }
    }

    pub fn into_2d(self) -> Option<Recording2dContext> {
        match self {
            Self::TwoD(ctx) => Some(ctx),
            Self::WebGl(_) => None,
        }
    }

    pub fn into_webgl(self) -> Option<RecordingWebGlContext> {
        match self {
            Self::WebGl(ctx) => Some(ctx),
            Self::TwoD(_) => None,
        }
    }

    pub fn as_recorded(&self) -> &dyn RecordedContext {
        match self {
            Self::TwoD(ctx) => ctx,
            Self::WebGl(ctx) => ctx,
        }
    }
}

impl RecordedContext for RenderingContext {
    fn kind(&self) -> ContextKind {
        self.as_recorded().kind()
    }

    fn var_name(&self) -> &str {
        self.as_recorded().var_name()
    }

    fn statements(&self) -> Vec<String> {
        self.as_recorded().statements()
    }

    fn sources(&self) -> Vec<RecordedElement> {
        self.as_recorded().sources()
    }
}
