//! Styles and keyword properties for the 2D context.

use serde::{Deserialize, Serialize};

use crate::literal::{self, json_number, Arg, ARG_SEPARATOR};
use crate::log::Handle;

keyword_enum! {
    /// Line cap
    pub enum LineCap (default Butt) {
        Butt => "butt",
        Round => "round",
        Square => "square",
    }
}

keyword_enum! {
    /// Line join
    pub enum LineJoin (default Miter) {
        Miter => "miter",
        Round => "round",
        Bevel => "bevel",
    }
}

keyword_enum! {
    /// Text alignment
    pub enum TextAlign (default Start) {
        Start => "start",
        End => "end",
        Left => "left",
        Right => "right",
        Center => "center",
    }
}

keyword_enum! {
    /// Text baseline
    pub enum TextBaseline (default Alphabetic) {
        Top => "top",
        Hanging => "hanging",
        Middle => "middle",
        Alphabetic => "alphabetic",
        Ideographic => "ideographic",
        Bottom => "bottom",
    }
}

keyword_enum! {
    /// Text direction
    pub enum Direction (default Ltr) {
        Ltr => "ltr",
        Rtl => "rtl",
        Inherit => "inherit",
    }
}

keyword_enum! {
    pub enum ImageSmoothingQuality (default Low) {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

keyword_enum! {
    /// Winding rule for fill and clip
    pub enum FillRule (default NonZero) {
        NonZero => "nonzero",
        EvenOdd => "evenodd",
    }
}

keyword_enum! {
    pub enum PatternRepetition (default Repeat) {
        Repeat => "repeat",
        RepeatX => "repeat-x",
        RepeatY => "repeat-y",
        NoRepeat => "no-repeat",
    }
}

/// Recorded gradient
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasGradient {
    handle: Handle,
}

impl CanvasGradient {
    pub(crate) fn new(handle: Handle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    /// Add a color stop
    pub fn add_color_stop(&self, offset: f64, color: &str) {
        let statement = literal::call(
            self.handle.name(),
            "addColorStop",
            &[offset.into(), color.into()],
            ARG_SEPARATOR,
        );
        self.handle.log().append(statement);
    }
}

/// Recorded pattern
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasPattern {
    handle: Handle,
}

impl CanvasPattern {
    pub(crate) fn new(handle: Handle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    /// Set the pattern matrix; `None` resets it to identity
    pub fn set_transform(&self, transform: Option<&DomMatrix2dInit>) {
        let args: Vec<Arg> = transform.map(|m| Arg::Json(m.to_json())).into_iter().collect();
        let statement = literal::call(self.handle.name(), "setTransform", &args, ARG_SEPARATOR);
        self.handle.log().append(statement);
    }
}

/// 2D affine matrix dictionary (`a b c d e f`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomMatrix2dInit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl DomMatrix2dInit {
    pub fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self { e: x, f: y, ..Self::identity() }
    }

    /// JSON object literal with JavaScript number formatting
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "a": json_number(self.a),
            "b": json_number(self.b),
            "c": json_number(self.c),
            "d": json_number(self.d),
            "e": json_number(self.e),
            "f": json_number(self.f),
        })
    }
}

impl Default for DomMatrix2dInit {
    fn default() -> Self {
        Self::identity()
    }
}

/// Fill or stroke style
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasStyle {
    Color(String),
    Gradient(CanvasGradient),
    Pattern(CanvasPattern),
}

impl CanvasStyle {
    /// Colors are quoted; gradients and patterns are referenced by name
    pub(crate) fn arg(&self) -> Arg {
        match self {
            Self::Color(color) => Arg::Str(color.clone()),
            Self::Gradient(gradient) => gradient.handle().arg(),
            Self::Pattern(pattern) => pattern.handle().arg(),
        }
    }

    pub fn as_color(&self) -> Option<&str> {
        match self {
            Self::Color(color) => Some(color),
            _ => None,
        }
    }
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self::Color("#000000".to_string())
    }
}

impl From<&str> for CanvasStyle {
    fn from(color: &str) -> Self {
        Self::Color(color.to_string())
    }
}

impl From<String> for CanvasStyle {
    fn from(color: String) -> Self {
        Self::Color(color)
    }
}

impl From<CanvasGradient> for CanvasStyle {
    fn from(gradient: CanvasGradient) -> Self {
        Self::Gradient(gradient)
    }
}

impl From<&CanvasGradient> for CanvasStyle {
    fn from(gradient: &CanvasGradient) -> Self {
        Self::Gradient(gradient.clone())
    }
}

impl From<CanvasPattern> for CanvasStyle {
    fn from(pattern: CanvasPattern) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<&CanvasPattern> for CanvasStyle {
    fn from(pattern: &CanvasPattern) -> Self {
        Self::Pattern(pattern.clone())
    }
}
