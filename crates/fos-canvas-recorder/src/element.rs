//! Recorded Elements
//!
//! `canvas` and `img` elements created through a recording document. Each
//! carries a synthetic id (`_cnvs<N>`, `_img<N>`) that doubles as its
//! variable name in the assembled script.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::RecorderConfig;
use crate::context::{ContextKind, RecordedContext, RenderingContext};
use crate::context2d::Recording2dContext;
use crate::drawing::CanvasImageSource;
use crate::literal::{self, Arg};
use crate::log::OpLog;
use crate::text::TextMeasurer;
use crate::webgl::RecordingWebGlContext;
use crate::{not_implemented, Result};

/// 1x1 transparent GIF returned by `toDataURL`
pub const PLACEHOLDER_DATA_URL: &str =
    "data:image/gif;base64,R0lGODlhAQABAAD/ACwAAAAAAQABAAACADs=";

/// Prefix tagging a data URL with the canvas that produced it
pub const CANVAS_EXPORT_TAG: &str = "recorded-canvas:";

/// Canvas state shared with the bound context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    pub width: u32,
    pub height: u32,
    /// Fallback text accumulated by `fillText`/`strokeText`
    pub text_content: String,
}

impl SurfaceState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            text_content: String::new(),
        }
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        if !self.text_content.is_empty() {
            self.text_content.push(' ');
        }
        self.text_content.push_str(text);
    }

    /// Whether the rectangle covers the whole surface
    pub(crate) fn is_covered_by(&self, x: f64, y: f64, w: f64, h: f64) -> bool {
        x <= 0.0 && y <= 0.0 && w >= f64::from(self.width) && h >= f64::from(self.height)
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// Recorded `<canvas>` element
#[derive(Clone)]
pub struct Canvas {
    inner: Rc<CanvasInner>,
}

struct CanvasInner {
    index: usize,
    id: String,
    surface: Rc<RefCell<SurfaceState>>,
    context: RefCell<Option<RenderingContext>>,
    measurer: Rc<dyn TextMeasurer>,
    config: Rc<RecorderConfig>,
}

impl Canvas {
    pub(crate) fn new(index: usize, measurer: Rc<dyn TextMeasurer>, config: Rc<RecorderConfig>) -> Self {
        let surface = SurfaceState::new(config.canvas_width, config.canvas_height);
        Self {
            inner: Rc::new(CanvasInner {
                index,
                id: format!("_cnvs{index}"),
                surface: Rc::new(RefCell::new(surface)),
                context: RefCell::new(None),
                measurer,
                config,
            }),
        }
    }

    /// Creation index within the document
    pub fn index(&self) -> usize {
        self.inner.index
    }

    /// Synthetic id, `_cnvs<N>`
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn width(&self) -> u32 {
        self.inner.surface.borrow().width
    }

    pub fn height(&self) -> u32 {
        self.inner.surface.borrow().height
    }

    pub fn set_width(&self, width: u32) {
        self.inner.surface.borrow_mut().width = width;
    }

    pub fn set_height(&self, height: u32) {
        self.inner.surface.borrow_mut().height = height;
    }

    /// Text drawn so far, space separated
    pub fn text_content(&self) -> String {
        self.inner.surface.borrow().text_content.clone()
    }

    /// Get (or bind) a context.
    ///
    /// The first recognized type binds; later requests for the same type
    /// return the same context. A different type yields `None` while
    /// `lock_context_type` is set.
    pub fn get_context(&self, context_type: &str) -> Option<RenderingContext> {
        let kind = ContextKind::from_type(context_type)?;

        if let Some(bound) = self.inner.context.borrow().as_ref() {
            if bound.kind() == kind || !self.inner.config.lock_context_type {
                return Some(bound.clone());
            }
            tracing::debug!(
                canvas = %self.inner.id,
                requested = kind.as_str(),
                bound = bound.kind().as_str(),
                "getContext refused"
            );
            return None;
        }

        let var_name = format!("{}{}", kind.var_prefix(), self.inner.index);
        let surface = self.inner.surface.clone();
        let context = match kind {
            ContextKind::TwoD => RenderingContext::TwoD(Recording2dContext::new(
                var_name,
                self.inner.id.clone(),
                surface,
                self.inner.measurer.clone(),
            )),
            ContextKind::WebGl => {
                RenderingContext::WebGl(RecordingWebGlContext::new(var_name, surface))
            }
        };

        tracing::debug!(canvas = %self.inner.id, context = context.var_name(), "context bound");
        *self.inner.context.borrow_mut() = Some(context.clone());
        Some(context)
    }

    /// `getContext('2d')`
    pub fn get_context_2d(&self) -> Option<Recording2dContext> {
        self.get_context(ContextKind::TwoD.as_str())?.into_2d()
    }

    /// `getContext('webgl')`
    pub fn get_context_webgl(&self) -> Option<RecordingWebGlContext> {
        self.get_context(ContextKind::WebGl.as_str())?.into_webgl()
    }

    /// Bound context, without binding one
    pub fn context(&self) -> Option<RenderingContext> {
        self.inner.context.borrow().clone()
    }

    /// Placeholder data URL, tagged with this canvas when images are recorded
    pub fn to_data_url(&self) -> String {
        if self.inner.config.record_images {
            format!("{CANVAS_EXPORT_TAG}{};{PLACEHOLDER_DATA_URL}", self.inner.index)
        } else {
            PLACEHOLDER_DATA_URL.to_string()
        }
    }

    pub fn to_blob(&self) -> Result<()> {
        not_implemented("toBlob")
    }
}

impl PartialEq for Canvas {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("id", &self.inner.id)
            .field("surface", &self.inner.surface.borrow())
            .field("context", &self.inner.context.borrow().as_ref().map(|c| c.var_name().to_string()))
            .finish()
    }
}

// ============================================================================
// Image
// ============================================================================

/// Recorded `<img>` element
#[derive(Clone)]
pub struct Image {
    inner: Rc<ImageInner>,
}

struct ImageInner {
    index: usize,
    id: String,
    log: OpLog,
    src: RefCell<String>,
    sources: RefCell<Vec<Canvas>>,
    onload: RefCell<Option<Box<dyn FnMut()>>>,
    canvases: Weak<RefCell<Vec<Canvas>>>,
}

impl Image {
    pub(crate) fn new(index: usize, canvases: Weak<RefCell<Vec<Canvas>>>) -> Self {
        Self {
            inner: Rc::new(ImageInner {
                index,
                id: format!("_img{index}"),
                log: OpLog::new(),
                src: RefCell::new(String::new()),
                sources: RefCell::new(Vec::new()),
                onload: RefCell::new(None),
                canvases,
            }),
        }
    }

    pub fn index(&self) -> usize {
        self.inner.index
    }

    /// Synthetic id, `_img<N>`
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Last assigned `src`
    pub fn src(&self) -> String {
        self.inner.src.borrow().clone()
    }

    /// Assign `src` and fire `onload`.
    ///
    /// A data URL exported by a recorded canvas becomes a dependency on that
    /// canvas and is replayed as `<canvas>.toDataURL()`.
    pub fn set_src(&self, src: &str) {
        let value = match self.resolve_canvas(src) {
            Some(canvas) => {
                let value = Arg::reference(format!("{}.toDataURL()", canvas.id()));
                let mut sources = self.inner.sources.borrow_mut();
                if !sources.contains(&canvas) {
                    sources.push(canvas);
                }
                value
            }
            None => Arg::from(src),
        };

        self.inner.log.append(literal::assign(&self.inner.id, "src", &value));
        *self.inner.src.borrow_mut() = src.to_string();
        self.fire_onload();
    }

    /// Register the load callback. Fires at once if `src` is already set.
    pub fn set_onload(&self, callback: impl FnMut() + 'static) {
        *self.inner.onload.borrow_mut() = Some(Box::new(callback));
        if !self.inner.src.borrow().is_empty() {
            self.fire_onload();
        }
    }

    fn fire_onload(&self) {
        let callback = self.inner.onload.borrow_mut().take();
        if let Some(mut callback) = callback {
            callback();
            let mut slot = self.inner.onload.borrow_mut();
            // the callback may have registered a replacement
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }

    fn resolve_canvas(&self, src: &str) -> Option<Canvas> {
        let (index, _) = src.strip_prefix(CANVAS_EXPORT_TAG)?.split_once(';')?;
        let index: usize = index.parse().ok()?;
        let canvases = self.inner.canvases.upgrade()?;
        let canvases = canvases.borrow();
        canvases.iter().find(|c| c.index() == index).cloned()
    }

    /// Canvases whose exports were assigned to `src`
    pub fn sources(&self) -> Vec<Canvas> {
        self.inner.sources.borrow().clone()
    }

    pub fn statements(&self) -> Vec<String> {
        self.inner.log.statements()
    }

    /// Recorded statements joined with `separator`
    pub fn script(&self, separator: &str) -> String {
        self.inner.log.join(separator)
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.inner.id)
            .field("src", &self.inner.src.borrow())
            .field("statements", &self.inner.log.len())
            .finish()
    }
}

// ============================================================================
// Element wrappers
// ============================================================================

/// Canvas or image with a synthetic id
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedElement {
    Canvas(Canvas),
    Image(Image),
}

impl RecordedElement {
    pub fn id(&self) -> &str {
        match self {
            Self::Canvas(canvas) => canvas.id(),
            Self::Image(image) => image.id(),
        }
    }

    /// Tag used when the element has to be created in the replay
    pub fn local_name(&self) -> &'static str {
        match self {
            Self::Canvas(_) => "canvas",
            Self::Image(_) => "img",
        }
    }
}

/// What a created element was recognized as
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Canvas(Canvas),
    Image(Image),
    Other,
}

/// Host node paired with its recorder, if any
#[derive(Debug, Clone)]
pub struct Element<N> {
    node: N,
    kind: ElementKind,
}

impl<N> Element<N> {
    pub(crate) fn new(node: N, kind: ElementKind) -> Self {
        Self { node, kind }
    }

    /// Host node
    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn as_canvas(&self) -> Option<&Canvas> {
        match &self.kind {
            ElementKind::Canvas(canvas) => Some(canvas),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match &self.kind {
            ElementKind::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Synthetic id of recorded elements
    pub fn id(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Canvas(canvas) => Some(canvas.id()),
            ElementKind::Image(image) => Some(image.id()),
            ElementKind::Other => None,
        }
    }

    pub fn into_node(self) -> N {
        self.node
    }
}

impl CanvasImageSource for Canvas {
    fn recorded_element(&self) -> Option<RecordedElement> {
        Some(RecordedElement::Canvas(self.clone()))
    }
}

impl CanvasImageSource for Image {
    fn recorded_element(&self) -> Option<RecordedElement> {
        Some(RecordedElement::Image(self.clone()))
    }
}

impl CanvasImageSource for RecordedElement {
    fn recorded_element(&self) -> Option<RecordedElement> {
        Some(self.clone())
    }
}

impl<N> CanvasImageSource for Element<N> {
    fn recorded_element(&self) -> Option<RecordedElement> {
        match &self.kind {
            ElementKind::Canvas(canvas) => canvas.recorded_element(),
            ElementKind::Image(image) => image.recorded_element(),
            ElementKind::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FixedPitchMeasurer;

    fn canvas_with(index: usize, config: RecorderConfig) -> Canvas {
        Canvas::new(index, Rc::new(FixedPitchMeasurer::default()), Rc::new(config))
    }

    #[test]
    fn test_canvas_ids_and_extent() {
        let canvas = canvas_with(3, RecorderConfig::default());
        assert_eq!(canvas.id(), "_cnvs3");
        assert_eq!((canvas.width(), canvas.height()), (300, 150));
        canvas.set_width(64);
        assert_eq!(canvas.width(), 64);
    }

    #[test]
    fn test_get_context_is_idempotent_and_locked() {
        let canvas = canvas_with(0, RecorderConfig::default());
        assert!(canvas.context().is_none());

        let first = canvas.get_context_2d().unwrap();
        let second = canvas.get_context_2d().unwrap();
        assert_eq!(first.var_name(), "_c0");
        assert!(first.same_context(&second));
        assert!(canvas.get_context("webgl").is_none());
        assert!(canvas.get_context("bitmaprenderer").is_none());
    }

    #[test]
    fn test_unlocked_returns_bound_context() {
        let canvas = canvas_with(1, RecorderConfig::default().with_context_type_lock(false));
        canvas.get_context_webgl().unwrap();
        let again = canvas.get_context("2d").unwrap();
        assert_eq!(again.kind(), ContextKind::WebGl);
        assert_eq!(again.var_name(), "_cgl1");
    }

    #[test]
    fn test_unrecognized_type_binds_nothing() {
        let canvas = canvas_with(0, RecorderConfig::default());
        assert!(canvas.get_context("webgl2").is_none());
        assert!(canvas.get_context_webgl().is_some());
    }

    #[test]
    fn test_data_url() {
        let canvas = canvas_with(2, RecorderConfig::default());
        assert_eq!(canvas.to_data_url(), format!("recorded-canvas:2;{PLACEHOLDER_DATA_URL}"));

        let plain = canvas_with(2, RecorderConfig::default().with_image_recording(false));
        assert_eq!(plain.to_data_url(), PLACEHOLDER_DATA_URL);
        assert!(plain.to_blob().is_err());
    }

    #[test]
    fn test_surface_text_accumulates() {
        let mut surface = SurfaceState::new(10, 10);
        surface.append_text("a");
        surface.append_text("b");
        assert_eq!(surface.text_content, "a b");
        assert!(surface.is_covered_by(0.0, -1.0, 10.0, 12.0));
        assert!(!surface.is_covered_by(1.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_image_src_resolves_canvas_export() {
        let canvases = Rc::new(RefCell::new(vec![canvas_with(3, RecorderConfig::default())]));
        let image = Image::new(0, Rc::downgrade(&canvases));

        let exported = canvases.borrow()[0].to_data_url();
        image.set_src(&exported);
        image.set_src("https://example.com/it's.png");

        assert_eq!(image.src(), "https://example.com/it's.png");
        assert_eq!(image.sources().len(), 1);
        assert_eq!(
            image.statements(),
            vec![
                "_img0.src=_cnvs3.toDataURL();",
                r"_img0.src='https://example.com/it\'s.png';",
            ]
        );
    }

    #[test]
    fn test_onload_fires_after_src_and_on_late_registration() {
        let image = Image::new(0, Weak::new());
        let fired = Rc::new(RefCell::new(0));

        let counter = fired.clone();
        image.set_onload(move || *counter.borrow_mut() += 1);
        assert_eq!(*fired.borrow(), 0);

        image.set_src("a.png");
        image.set_src("b.png");
        assert_eq!(*fired.borrow(), 2);

        let late = Image::new(1, Weak::new());
        late.set_src("c.png");
        let counter = fired.clone();
        late.set_onload(move || *counter.borrow_mut() += 10);
        assert_eq!(*fired.borrow(), 12);
    }

    #[test]
    fn test_unknown_export_index_is_a_plain_src() {
        let image = Image::new(0, Weak::new());
        image.set_src("recorded-canvas:9;data:x");
        assert!(image.sources().is_empty());
        assert_eq!(image.statements(), vec!["_img0.src='recorded-canvas:9;data:x';"]);
    }
}
