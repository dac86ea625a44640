//! Canvas 2D Rendering Context
//!
//! Recording CanvasRenderingContext2D. Mutating calls append one statement
//! to the context's log; properties keep their last written value so reads
//! never record anything.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::compositing::CompositeOperation;
use crate::context::{ContextKind, RecordedContext};
use crate::drawing::{image_arg, CanvasImageSource, ImageData};
use crate::element::{RecordedElement, SurfaceState};
use crate::literal::{self, Arg, ARG_SEPARATOR};
use crate::log::{Handle, HandleNamer, OpLog};
use crate::style::{
    CanvasGradient, CanvasPattern, CanvasStyle, Direction, DomMatrix2dInit, FillRule,
    ImageSmoothingQuality, LineCap, LineJoin, PatternRepetition, TextAlign, TextBaseline,
};
use crate::text::{TextMeasurer, TextMetrics};
use crate::{not_implemented, Result};

/// The CanvasRenderingContext2D API
pub trait CanvasRenderingContext2d {
    // State

    fn save(&self);
    fn restore(&self);

    // Rectangles

    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&self, x: f64, y: f64, width: f64, height: f64);

    // Text

    fn fill_text(&self, text: &str, x: f64, y: f64);
    fn fill_text_max(&self, text: &str, x: f64, y: f64, max_width: f64);
    fn stroke_text(&self, text: &str, x: f64, y: f64);
    fn stroke_text_max(&self, text: &str, x: f64, y: f64, max_width: f64);
    fn measure_text(&self, text: &str) -> TextMetrics;

    // Line styles

    fn line_width(&self) -> f64;
    fn set_line_width(&self, value: f64);
    fn line_cap(&self) -> LineCap;
    fn set_line_cap(&self, value: LineCap);
    fn line_join(&self) -> LineJoin;
    fn set_line_join(&self, value: LineJoin);
    fn miter_limit(&self) -> f64;
    fn set_miter_limit(&self, value: f64);
    fn line_dash(&self) -> Vec<f64>;
    fn set_line_dash(&self, segments: &[f64]);
    fn line_dash_offset(&self) -> f64;
    fn set_line_dash_offset(&self, value: f64);

    // Text styles

    fn font(&self) -> String;
    fn set_font(&self, value: &str);
    fn text_align(&self) -> TextAlign;
    fn set_text_align(&self, value: TextAlign);
    fn text_baseline(&self) -> TextBaseline;
    fn set_text_baseline(&self, value: TextBaseline);
    fn direction(&self) -> Direction;
    fn set_direction(&self, value: Direction);

    // Fill and stroke styles

    fn fill_style(&self) -> CanvasStyle;
    fn set_fill_style(&self, value: impl Into<CanvasStyle>);
    fn stroke_style(&self) -> CanvasStyle;
    fn set_stroke_style(&self, value: impl Into<CanvasStyle>);

    // Gradients and patterns

    fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> CanvasGradient;
    fn create_radial_gradient(
        &self,
        x0: f64,
        y0: f64,
        r0: f64,
        x1: f64,
        y1: f64,
        r1: f64,
    ) -> CanvasGradient;
    fn create_conic_gradient(&self, start_angle: f64, x: f64, y: f64) -> Result<CanvasGradient>;
    fn create_pattern(
        &self,
        image: &dyn CanvasImageSource,
        repetition: Option<PatternRepetition>,
    ) -> Result<CanvasPattern>;

    // Shadows

    fn shadow_blur(&self) -> f64;
    fn set_shadow_blur(&self, value: f64);
    fn shadow_color(&self) -> String;
    fn set_shadow_color(&self, value: &str);
    fn shadow_offset_x(&self) -> f64;
    fn set_shadow_offset_x(&self, value: f64);
    fn shadow_offset_y(&self) -> f64;
    fn set_shadow_offset_y(&self, value: f64);

    // Paths

    fn begin_path(&self);
    fn close_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    fn bezier_curve_to(&self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn arc(&self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn arc_with_anticlockwise(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );
    fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64);
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
    );
    #[allow(clippy::too_many_arguments)]
    fn ellipse_with_anticlockwise(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );
    fn rect(&self, x: f64, y: f64, width: f64, height: f64);

    // Drawing paths

    fn fill(&self);
    fn fill_with_rule(&self, rule: FillRule);
    fn stroke(&self);
    fn clip(&self);
    fn clip_with_rule(&self, rule: FillRule);
    fn draw_focus_if_needed(&self, element_id: &str);
    fn scroll_path_into_view(&self);
    fn is_point_in_path(&self, x: f64, y: f64) -> Result<bool>;
    fn is_point_in_stroke(&self, x: f64, y: f64) -> Result<bool>;

    // Transformations

    fn rotate(&self, angle: f64);
    fn scale(&self, x: f64, y: f64);
    fn translate(&self, x: f64, y: f64);
    fn transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
    fn set_transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
    fn set_transform_matrix(&self, matrix: &DomMatrix2dInit) -> Result<()>;
    fn reset_transform(&self);
    fn get_transform(&self) -> Result<DomMatrix2dInit>;

    // Compositing

    fn global_alpha(&self) -> f64;
    fn set_global_alpha(&self, value: f64);
    fn global_composite_operation(&self) -> CompositeOperation;
    fn set_global_composite_operation(&self, value: CompositeOperation);

    // Images

    fn draw_image(&self, image: &dyn CanvasImageSource, dx: f64, dy: f64) -> Result<()>;
    fn draw_image_scaled(
        &self,
        image: &dyn CanvasImageSource,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> Result<()>;
    #[allow(clippy::too_many_arguments)]
    fn draw_image_full(
        &self,
        image: &dyn CanvasImageSource,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> Result<()>;
    fn image_smoothing_enabled(&self) -> bool;
    fn set_image_smoothing_enabled(&self, value: bool);
    fn image_smoothing_quality(&self) -> ImageSmoothingQuality;
    fn set_image_smoothing_quality(&self, value: ImageSmoothingQuality);

    // Pixel manipulation

    fn create_image_data(&self, width: u32, height: u32) -> Result<ImageData>;
    fn get_image_data(&self, sx: f64, sy: f64, sw: f64, sh: f64) -> Result<ImageData>;
    fn put_image_data(&self, image: &ImageData, dx: f64, dy: f64);
    #[allow(clippy::too_many_arguments)]
    fn put_image_data_dirty(
        &self,
        image: &ImageData,
        dx: f64,
        dy: f64,
        dirty_x: f64,
        dirty_y: f64,
        dirty_width: f64,
        dirty_height: f64,
    );

    // Filters

    fn filter(&self) -> String;
    fn set_filter(&self, value: &str);

    fn get_context_attributes(&self) -> Result<ContextAttributes>;
}

/// `getContextAttributes()` dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct ContextAttributes {
    pub alpha: bool,
    pub color_space: String,
    pub desynchronized: bool,
    pub will_read_frequently: bool,
}

/// Property values as last written
#[derive(Debug, Clone)]
struct DrawingState {
    line_width: f64,
    line_cap: LineCap,
    line_join: LineJoin,
    miter_limit: f64,
    line_dash: Vec<f64>,
    line_dash_offset: f64,
    font: String,
    text_align: TextAlign,
    text_baseline: TextBaseline,
    direction: Direction,
    fill_style: CanvasStyle,
    stroke_style: CanvasStyle,
    shadow_blur: f64,
    shadow_color: String,
    shadow_offset_x: f64,
    shadow_offset_y: f64,
    global_alpha: f64,
    global_composite_operation: CompositeOperation,
    image_smoothing_enabled: bool,
    image_smoothing_quality: ImageSmoothingQuality,
    filter: String,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            font: "10px sans-serif".to_string(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            direction: Direction::default(),
            fill_style: CanvasStyle::default(),
            stroke_style: CanvasStyle::default(),
            shadow_blur: 0.0,
            shadow_color: "rgba(0, 0, 0, 0)".to_string(),
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            global_alpha: 1.0,
            global_composite_operation: CompositeOperation::default(),
            image_smoothing_enabled: true,
            image_smoothing_quality: ImageSmoothingQuality::default(),
            filter: "none".to_string(),
        }
    }
}

/// Recording 2D context bound to one canvas
#[derive(Clone)]
pub struct Recording2dContext {
    inner: Rc<Context2dInner>,
}

struct Context2dInner {
    var_name: String,
    canvas_id: String,
    log: OpLog,
    namer: HandleNamer,
    surface: Rc<RefCell<SurfaceState>>,
    measurer: Rc<dyn TextMeasurer>,
    state: RefCell<DrawingState>,
    sources: RefCell<Vec<RecordedElement>>,
}

/// Generates a cached property getter and its recording setter.
macro_rules! number_property {
    ($get:ident, $set:ident, $js:literal) => {
        fn $get(&self) -> f64 {
            self.inner.state.borrow().$get
        }

        fn $set(&self, value: f64) {
            self.record_assign($js, value.into());
            self.inner.state.borrow_mut().$get = value;
        }
    };
}

macro_rules! keyword_property {
    ($get:ident, $set:ident, $ty:ty, $js:literal) => {
        fn $get(&self) -> $ty {
            self.inner.state.borrow().$get
        }

        fn $set(&self, value: $ty) {
            self.record_assign($js, value.as_str().into());
            self.inner.state.borrow_mut().$get = value;
        }
    };
}

macro_rules! string_property {
    ($get:ident, $set:ident, $js:literal) => {
        fn $get(&self) -> String {
            self.inner.state.borrow().$get.clone()
        }

        fn $set(&self, value: &str) {
            self.record_assign($js, value.into());
            self.inner.state.borrow_mut().$get = value.to_string();
        }
    };
}

impl Recording2dContext {
    pub(crate) fn new(
        var_name: String,
        canvas_id: String,
        surface: Rc<RefCell<SurfaceState>>,
        measurer: Rc<dyn TextMeasurer>,
    ) -> Self {
        Self {
            inner: Rc::new(Context2dInner {
                namer: HandleNamer::new(&var_name),
                var_name,
                canvas_id,
                log: OpLog::new(),
                surface,
                measurer,
                state: RefCell::new(DrawingState::default()),
                sources: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Id of the owning canvas
    pub fn canvas_id(&self) -> &str {
        &self.inner.canvas_id
    }

    /// Whether both values are the same bound context
    pub fn same_context(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn record(&self, method: &str, args: &[Arg]) {
        let statement = literal::call(&self.inner.var_name, method, args, ARG_SEPARATOR);
        self.inner.log.append(statement);
    }

    fn record_assign(&self, property: &str, value: Arg) {
        self.inner
            .log
            .append(literal::assign(&self.inner.var_name, property, &value));
    }

    /// `const <ctx>_<K> = <ctx>.<method>(args);`
    fn create_handle(&self, method: &str, args: &[Arg]) -> Handle {
        let name = self.inner.namer.next_name();
        let expr = literal::invocation(&self.inner.var_name, method, args, ARG_SEPARATOR);
        self.inner.log.append(literal::declare(&name, &expr));
        Handle::new(name, self.inner.log.clone())
    }

    /// Remember a drawn element so the assembler renders it first
    fn add_source(&self, element: &RecordedElement) {
        if element.id() == self.inner.canvas_id {
            return;
        }
        let mut sources = self.inner.sources.borrow_mut();
        if !sources.iter().any(|s| s.id() == element.id()) {
            tracing::debug!(context = %self.inner.var_name, source = element.id(), "dependency");
            sources.push(element.clone());
        }
    }

    fn draw_image_with(&self, image: &dyn CanvasImageSource, args: &[f64]) -> Result<()> {
        let element = image_arg("drawImage", image)?;
        self.add_source(&element);

        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(Arg::reference(element.id()));
        all.extend(args.iter().map(|&v| Arg::from(v)));
        self.record("drawImage", &all);
        Ok(())
    }

    fn record_text(&self, method: &str, text: &str, args: &[f64]) {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(Arg::from(text));
        all.extend(args.iter().map(|&v| Arg::from(v)));
        self.record(method, &all);
        self.inner.surface.borrow_mut().append_text(text);
    }

    fn record_numbers(&self, method: &str, args: &[f64]) {
        let args: Vec<Arg> = args.iter().map(|&v| Arg::from(v)).collect();
        self.record(method, &args);
    }
}

impl CanvasRenderingContext2d for Recording2dContext {
    // State

    fn save(&self) {
        self.record("save", &[]);
    }

    fn restore(&self) {
        self.record("restore", &[]);
    }

    // Rectangles

    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.record_numbers("clearRect", &[x, y, width, height]);
        let mut surface = self.inner.surface.borrow_mut();
        if surface.is_covered_by(x, y, width, height) {
            surface.text_content.clear();
        }
    }

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.record_numbers("fillRect", &[x, y, width, height]);
    }

    fn stroke_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.record_numbers("strokeRect", &[x, y, width, height]);
    }

    // Text

    fn fill_text(&self, text: &str, x: f64, y: f64) {
        self.record_text("fillText", text, &[x, y]);
    }

    fn fill_text_max(&self, text: &str, x: f64, y: f64, max_width: f64) {
        self.record_text("fillText", text, &[x, y, max_width]);
    }

    fn stroke_text(&self, text: &str, x: f64, y: f64) {
        self.record_text("strokeText", text, &[x, y]);
    }

    fn stroke_text_max(&self, text: &str, x: f64, y: f64, max_width: f64) {
        self.record_text("strokeText", text, &[x, y, max_width]);
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        let font = self.inner.state.borrow().font.clone();
        TextMetrics::from_size(self.inner.measurer.measure(&font, text))
    }

    // Line styles

    number_property!(line_width, set_line_width, "lineWidth");
    keyword_property!(line_cap, set_line_cap, LineCap, "lineCap");
    keyword_property!(line_join, set_line_join, LineJoin, "lineJoin");
    number_property!(miter_limit, set_miter_limit, "miterLimit");

    fn line_dash(&self) -> Vec<f64> {
        self.inner.state.borrow().line_dash.clone()
    }

    fn set_line_dash(&self, segments: &[f64]) {
        self.record("setLineDash", &[segments.into()]);
        self.inner.state.borrow_mut().line_dash = segments.to_vec();
    }

    number_property!(line_dash_offset, set_line_dash_offset, "lineDashOffset");

    // Text styles

    string_property!(font, set_font, "font");
    keyword_property!(text_align, set_text_align, TextAlign, "textAlign");
    keyword_property!(text_baseline, set_text_baseline, TextBaseline, "textBaseline");
    keyword_property!(direction, set_direction, Direction, "direction");

    // Fill and stroke styles

    fn fill_style(&self) -> CanvasStyle {
        self.inner.state.borrow().fill_style.clone()
    }

    fn set_fill_style(&self, value: impl Into<CanvasStyle>) {
        let value = value.into();
        self.record_assign("fillStyle", value.arg());
        self.inner.state.borrow_mut().fill_style = value;
    }

    fn stroke_style(&self) -> CanvasStyle {
        self.inner.state.borrow().stroke_style.clone()
    }

    fn set_stroke_style(&self, value: impl Into<CanvasStyle>) {
        let value = value.into();
        self.record_assign("strokeStyle", value.arg());
        self.inner.state.borrow_mut().stroke_style = value;
    }

    // Gradients and patterns

    fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> CanvasGradient {
        let args = [x0.into(), y0.into(), x1.into(), y1.into()];
        CanvasGradient::new(self.create_handle("createLinearGradient", &args))
    }

    fn create_radial_gradient(
        &self,
        x0: f64,
        y0: f64,
        r0: f64,
        x1: f64,
        y1: f64,
        r1: f64,
    ) -> CanvasGradient {
        let args = [x0.into(), y0.into(), r0.into(), x1.into(), y1.into(), r1.into()];
        CanvasGradient::new(self.create_handle("createRadialGradient", &args))
    }

    fn create_conic_gradient(&self, _start_angle: f64, _x: f64, _y: f64) -> Result<CanvasGradient> {
        not_implemented("createConicGradient")
    }

    fn create_pattern(
        &self,
        image: &dyn CanvasImageSource,
        repetition: Option<PatternRepetition>,
    ) -> Result<CanvasPattern> {
        let element = image_arg("createPattern", image)?;
        self.add_source(&element);

        let repetition = repetition.map_or(Arg::Null, |r| r.as_str().into());
        let handle = self.create_handle("createPattern", &[Arg::reference(element.id()), repetition]);
        Ok(CanvasPattern::new(handle))
    }

    // Shadows

    number_property!(shadow_blur, set_shadow_blur, "shadowBlur");
    string_property!(shadow_color, set_shadow_color, "shadowColor");
    number_property!(shadow_offset_x, set_shadow_offset_x, "shadowOffsetX");
    number_property!(shadow_offset_y, set_shadow_offset_y, "shadowOffsetY");

    // Paths

    fn begin_path(&self) {
        self.record("beginPath", &[]);
    }

    fn close_path(&self) {
        self.record("closePath", &[]);
    }

    fn move_to(&self, x: f64, y: f64) {
        self.record_numbers("moveTo", &[x, y]);
    }

    fn line_to(&self, x: f64, y: f64) {
        self.record_numbers("lineTo", &[x, y]);
    }

    fn bezier_curve_to(&self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.record_numbers("bezierCurveTo", &[cp1x, cp1y, cp2x, cp2y, x, y]);
    }

    fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.record_numbers("quadraticCurveTo", &[cpx, cpy, x, y]);
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.record_numbers("arc", &[x, y, radius, start_angle, end_angle]);
    }

    fn arc_with_anticlockwise(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        let args = [
            x.into(),
            y.into(),
            radius.into(),
            start_angle.into(),
            end_angle.into(),
            anticlockwise.into(),
        ];
        self.record("arc", &args);
    }

    fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) {
        self.record_numbers("arcTo", &[x1, y1, x2, y2, radius]);
    }

    fn ellipse(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
    ) {
        self.record_numbers(
            "ellipse",
            &[x, y, radius_x, radius_y, rotation, start_angle, end_angle],
        );
    }

    fn ellipse_with_anticlockwise(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        let args = [
            x.into(),
            y.into(),
            radius_x.into(),
            radius_y.into(),
            rotation.into(),
            start_angle.into(),
            end_angle.into(),
            anticlockwise.into(),
        ];
        self.record("ellipse", &args);
    }

    fn rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.record_numbers("rect", &[x, y, width, height]);
    }

    // Drawing paths

    fn fill(&self) {
        self.record("fill", &[]);
    }

    fn fill_with_rule(&self, rule: FillRule) {
        self.record("fill", &[rule.as_str().into()]);
    }

    fn stroke(&self) {
        self.record("stroke", &[]);
    }

    fn clip(&self) {
        self.record("clip", &[]);
    }

    fn clip_with_rule(&self, rule: FillRule) {
        self.record("clip", &[rule.as_str().into()]);
    }

    fn draw_focus_if_needed(&self, element_id: &str) {
        let element = format!("document.getElementById({})", literal::string_arg(element_id));
        self.record("drawFocusIfNeeded", &[Arg::reference(element)]);
    }

    fn scroll_path_into_view(&self) {
        self.record("scrollPathIntoView", &[]);
    }

    fn is_point_in_path(&self, _x: f64, _y: f64) -> Result<bool> {
        not_implemented("isPointInPath")
    }

    fn is_point_in_stroke(&self, _x: f64, _y: f64) -> Result<bool> {
        not_implemented("isPointInStroke")
    }

    // Transformations

    fn rotate(&self, angle: f64) {
        self.record_numbers("rotate", &[angle]);
    }

    fn scale(&self, x: f64, y: f64) {
        self.record_numbers("scale", &[x, y]);
    }

    fn translate(&self, x: f64, y: f64) {
        self.record_numbers("translate", &[x, y]);
    }

    fn transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.record_numbers("transform", &[a, b, c, d, e, f]);
    }

    fn set_transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.record_numbers("setTransform", &[a, b, c, d, e, f]);
    }

    fn set_transform_matrix(&self, _matrix: &DomMatrix2dInit) -> Result<()> {
        not_implemented("setTransform({...})")
    }

    fn reset_transform(&self) {
        self.record("resetTransform", &[]);
    }

    fn get_transform(&self) -> Result<DomMatrix2dInit> {
        not_implemented("getTransform")
    }

    // Compositing

    number_property!(global_alpha, set_global_alpha, "globalAlpha");
    keyword_property!(
        global_composite_operation,
        set_global_composite_operation,
        CompositeOperation,
        "globalCompositeOperation"
    );

    // Images

    fn draw_image(&self, image: &dyn CanvasImageSource, dx: f64, dy: f64) -> Result<()> {
        self.draw_image_with(image, &[dx, dy])
    }

    fn draw_image_scaled(
        &self,
        image: &dyn CanvasImageSource,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> Result<()> {
        self.draw_image_with(image, &[dx, dy, dw, dh])
    }

    fn draw_image_full(
        &self,
        image: &dyn CanvasImageSource,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> Result<()> {
        self.draw_image_with(image, &[sx, sy, sw, sh, dx, dy, dw, dh])
    }

    fn image_smoothing_enabled(&self) -> bool {
        self.inner.state.borrow().image_smoothing_enabled
    }

    fn set_image_smoothing_enabled(&self, value: bool) {
        self.record_assign("imageSmoothingEnabled", value.into());
        self.inner.state.borrow_mut().image_smoothing_enabled = value;
    }

    keyword_property!(
        image_smoothing_quality,
        set_image_smoothing_quality,
        ImageSmoothingQuality,
        "imageSmoothingQuality"
    );

    // Pixel manipulation

    fn create_image_data(&self, _width: u32, _height: u32) -> Result<ImageData> {
        not_implemented("createImageData")
    }

    fn get_image_data(&self, _sx: f64, _sy: f64, _sw: f64, _sh: f64) -> Result<ImageData> {
        not_implemented("getImageData")
    }

    fn put_image_data(&self, image: &ImageData, dx: f64, dy: f64) {
        self.record("putImageData", &[Arg::reference(image.literal()), dx.into(), dy.into()]);
    }

    fn put_image_data_dirty(
        &self,
        image: &ImageData,
        dx: f64,
        dy: f64,
        dirty_x: f64,
        dirty_y: f64,
        dirty_width: f64,
        dirty_height: f64,
    ) {
        let args = [
            Arg::reference(image.literal()),
            dx.into(),
            dy.into(),
            dirty_x.into(),
            dirty_y.into(),
            dirty_width.into(),
            dirty_height.into(),
        ];
        self.record("putImageData", &args);
    }

    // Filters

    string_property!(filter, set_filter, "filter");

    fn get_context_attributes(&self) -> Result<ContextAttributes> {
        not_implemented("getContextAttributes")
    }
}

impl RecordedContext for Recording2dContext {
    fn kind(&self) -> ContextKind {
        ContextKind::TwoD
    }

    fn var_name(&self) -> &str {
        &self.inner.var_name
    }

    fn statements(&self) -> Vec<String> {
        self.inner.log.statements()
    }

    fn sources(&self) -> Vec<RecordedElement> {
        self.inner.sources.borrow().clone()
    }
}

impl fmt::Debug for Recording2dContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recording2dContext")
            .field("var_name", &self.inner.var_name)
            .field("canvas_id", &self.inner.canvas_id)
            .field("statements", &self.inner.log.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::ImageBitmap;
    use crate::text::{FixedPitchMeasurer, TextSize};
    use crate::RecordError;

    fn context() -> Recording2dContext {
        Recording2dContext::new(
            "_c0".to_string(),
            "_cnvs0".to_string(),
            Rc::new(RefCell::new(SurfaceState::new(300, 150))),
            Rc::new(FixedPitchMeasurer::default()),
        )
    }

    #[test]
    fn test_calls_record_in_order() {
        let ctx = context();
        ctx.begin_path();
        ctx.move_to(1.0, 2.5);
        ctx.arc_with_anticlockwise(0.0, 0.0, 5.0, 0.0, 3.0, true);
        ctx.fill_with_rule(FillRule::EvenOdd);
        ctx.save();
        assert_eq!(
            ctx.statements(),
            vec![
                "_c0.beginPath();",
                "_c0.moveTo(1,2.5);",
                "_c0.arc(0,0,5,0,3,true);",
                "_c0.fill('evenodd');",
                "_c0.save();",
            ]
        );
    }

    #[test]
    fn test_property_reads_do_not_record() {
        let ctx = context();
        assert_eq!(ctx.line_width(), 1.0);
        assert_eq!(ctx.font(), "10px sans-serif");
        assert_eq!(ctx.shadow_color(), "rgba(0, 0, 0, 0)");
        assert_eq!(ctx.filter(), "none");
        assert!(ctx.image_smoothing_enabled());
        assert!(ctx.statements().is_empty());

        ctx.set_line_width(3.0);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_font("bold 12px serif");
        ctx.set_global_composite_operation(CompositeOperation::Multiply);
        assert_eq!(ctx.line_width(), 3.0);
        assert_eq!(ctx.line_width(), 3.0);
        assert_eq!(ctx.line_cap(), LineCap::Round);
        assert_eq!(
            ctx.statements(),
            vec![
                "_c0.lineWidth=3;",
                "_c0.lineCap='round';",
                "_c0.font='bold 12px serif';",
                "_c0.globalCompositeOperation='multiply';",
            ]
        );
    }

    #[test]
    fn test_line_dash_is_copied() {
        let ctx = context();
        ctx.set_line_dash(&[4.0, 2.0]);
        let mut dash = ctx.line_dash();
        dash.push(9.0);
        assert_eq!(ctx.line_dash(), vec![4.0, 2.0]);
        assert_eq!(ctx.statements(), vec!["_c0.setLineDash([4,2]);"]);
    }

    #[test]
    fn test_gradient_handles_share_the_log() {
        let ctx = context();
        let linear = ctx.create_linear_gradient(0.0, 0.0, 1.0, 1.0);
        linear.add_color_stop(0.0, "red");
        let radial = ctx.create_radial_gradient(0.0, 0.0, 1.0, 2.0, 2.0, 3.0);
        ctx.set_fill_style(&linear);
        ctx.set_stroke_style("blue");

        assert_eq!(linear.name(), "_c0_0");
        assert_eq!(radial.name(), "_c0_1");
        assert_eq!(ctx.fill_style(), CanvasStyle::Gradient(linear.clone()));
        assert_eq!(
            ctx.statements(),
            vec![
                "const _c0_0 = _c0.createLinearGradient(0,0,1,1);",
                "_c0_0.addColorStop(0,'red');",
                "const _c0_1 = _c0.createRadialGradient(0,0,1,2,2,3);",
                "_c0.fillStyle=_c0_0;",
                "_c0.strokeStyle='blue';",
            ]
        );
    }

    #[test]
    fn test_text_accumulates_and_full_clear_resets() {
        let surface = Rc::new(RefCell::new(SurfaceState::new(100, 50)));
        let ctx = Recording2dContext::new(
            "_c0".to_string(),
            "_cnvs0".to_string(),
            surface.clone(),
            Rc::new(FixedPitchMeasurer::default()),
        );

        ctx.fill_text("Hello", 0.0, 10.0);
        ctx.stroke_text_max("World", 0.0, 20.0, 80.0);
        assert_eq!(surface.borrow().text_content, "Hello World");

        ctx.clear_rect(10.0, 0.0, 100.0, 50.0);
        assert_eq!(surface.borrow().text_content, "Hello World");

        ctx.clear_rect(0.0, 0.0, 100.0, 50.0);
        assert_eq!(surface.borrow().text_content, "");
        assert_eq!(ctx.statements()[1], "_c0.strokeText('World',0,20,80);");
    }

    #[test]
    fn test_measure_text_uses_current_font() {
        let measure = |font: &str, text: &str| {
            let advance = if font.starts_with("20px") { 20.0 } else { 10.0 };
            TextSize {
                width: advance * text.len() as f64,
                height: 12.0,
                descent: 3.0,
            }
        };
        let ctx = Recording2dContext::new(
            "_c0".to_string(),
            "_cnvs0".to_string(),
            Rc::new(RefCell::new(SurfaceState::new(300, 150))),
            Rc::new(measure),
        );

        assert_eq!(ctx.measure_text("ab").width, 20.0);
        ctx.set_font("20px serif");
        let metrics = ctx.measure_text("ab");
        assert_eq!(metrics.width, 40.0);
        assert_eq!(metrics.actual_bounding_box_right, 41.0);
        assert_eq!(metrics.actual_bounding_box_ascent, 9.0);
        assert_eq!(ctx.statements(), vec!["_c0.font='20px serif';"]);
    }

    #[test]
    fn test_unsupported_calls_record_nothing() {
        let ctx = context();
        assert!(ctx.create_conic_gradient(0.0, 1.0, 1.0).is_err());
        assert!(ctx.is_point_in_path(1.0, 1.0).is_err());
        assert!(ctx.is_point_in_stroke(1.0, 1.0).is_err());
        assert!(ctx.get_transform().is_err());
        assert!(ctx.set_transform_matrix(&DomMatrix2dInit::identity()).is_err());
        assert!(ctx.create_image_data(1, 1).is_err());
        assert!(ctx.get_image_data(0.0, 0.0, 1.0, 1.0).is_err());
        assert!(ctx.get_context_attributes().is_err());

        let err = ctx.draw_image(&ImageBitmap::new(1, 1), 0.0, 0.0).unwrap_err();
        assert!(matches!(err, RecordError::NotImplemented(ref op) if op == "drawImage(\"ImageBitmap\")"));
        assert!(ctx.create_pattern(&ImageBitmap::new(1, 1), None).is_err());
        assert!(ctx.statements().is_empty());
    }

    #[test]
    fn test_put_image_data_and_focus() {
        let ctx = context();
        ctx.put_image_data(&ImageData::new(4, 2), 1.0, 1.0);
        ctx.draw_focus_if_needed("button");
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 5.0, 5.0);
        assert_eq!(
            ctx.statements(),
            vec![
                "_c0.putImageData({data:[],width:4,height:2},1,1);",
                "_c0.drawFocusIfNeeded(document.getElementById('button'));",
                "_c0.setTransform(1,0,0,1,5,5);",
            ]
        );
    }
}
