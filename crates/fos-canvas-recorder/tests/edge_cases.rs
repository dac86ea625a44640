//! Edge case tests for fos-canvas-recorder
//!
//! Context binding, unsupported operations, literal formatting and idle
//! surfaces.

use fos_canvas_recorder::*;
use fos_dom::Document;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn document_with(config: RecorderConfig) -> RecordingDocument<Document> {
    init_tracing();
    install_recorder_with_config(Document::default(), FixedPitchMeasurer::default(), config)
}

fn attached_canvas(doc: &mut RecordingDocument<Document>) -> Canvas {
    let element = doc.create_element("canvas");
    doc.host_mut().append(*element.node()).unwrap();
    element.as_canvas().unwrap().clone()
}

// ============================================================================
// CONTEXT BINDING TESTS
// ============================================================================

#[test]
fn test_context_type_is_locked() {
    let mut doc = document_with(RecorderConfig::default());
    let canvas = attached_canvas(&mut doc);

    let first = canvas.get_context_2d().unwrap();
    let again = canvas.get_context_2d().unwrap();
    assert!(first.same_context(&again));
    assert!(canvas.get_context("webgl").is_none());
    assert!(canvas.get_context("experimental-webgl").is_none());
}

#[test]
fn test_unlocked_context_returns_bound_context() {
    let mut doc = document_with(RecorderConfig::default().with_context_type_lock(false));
    let canvas = attached_canvas(&mut doc);

    canvas.get_context_webgl().unwrap();
    let context = canvas.get_context("2d").unwrap();
    assert_eq!(context.kind(), ContextKind::WebGl);
    assert_eq!(context.var_name(), "_cgl0");
}

#[test]
fn test_unknown_context_type() {
    let mut doc = document_with(RecorderConfig::default());
    let canvas = attached_canvas(&mut doc);

    assert!(canvas.get_context("bitmaprenderer").is_none());
    assert!(canvas.context().is_none());
    // an unknown type does not bind, so a later request still succeeds
    assert!(canvas.get_context_webgl().is_some());
}

#[test]
fn test_context_names_follow_canvas_index() {
    let mut doc = document_with(RecorderConfig::default());
    let a = attached_canvas(&mut doc);
    let b = attached_canvas(&mut doc);

    assert_eq!(b.get_context_webgl().unwrap().var_name(), "_cgl1");
    assert_eq!(a.get_context_2d().unwrap().var_name(), "_c0");
}

// ============================================================================
// UNSUPPORTED OPERATION TESTS
// ============================================================================

#[test]
fn test_unsupported_2d_calls_record_nothing() {
    let mut doc = document_with(RecorderConfig::default());
    let canvas = attached_canvas(&mut doc);
    let ctx = canvas.get_context_2d().unwrap();

    let err = ctx.get_image_data(0.0, 0.0, 1.0, 1.0).unwrap_err();
    assert_eq!(err.to_string(), "Not implemented: getImageData");
    assert!(ctx.is_point_in_path(0.0, 0.0).is_err());
    assert!(ctx.create_conic_gradient(0.0, 0.0, 0.0).is_err());
    assert!(ctx.get_transform().is_err());
    assert!(canvas.to_blob().is_err());

    assert!(ctx.statements().is_empty());
    assert_eq!(doc.assemble_script(), "");
}

#[test]
fn test_image_bitmap_cannot_be_drawn() {
    let mut doc = document_with(RecorderConfig::default());
    let ctx = attached_canvas(&mut doc).get_context_2d().unwrap();

    let bitmap = ImageBitmap { width: 4, height: 4 };
    let err = ctx.draw_image(&bitmap, 0.0, 0.0).unwrap_err();
    assert!(matches!(err, RecordError::NotImplemented(ref op) if op == "drawImage(\"ImageBitmap\")"));
    assert!(ctx.create_pattern(&bitmap, None).is_err());
    assert!(ctx.statements().is_empty());
    assert!(ctx.sources().is_empty());
}

#[test]
fn test_plain_element_cannot_be_drawn() {
    let mut doc = document_with(RecorderConfig::default());
    let ctx = attached_canvas(&mut doc).get_context_2d().unwrap();
    let div = doc.create_element("div");

    assert!(ctx.draw_image(&div, 0.0, 0.0).is_err());
    assert!(ctx.statements().is_empty());
}

#[test]
fn test_unsupported_webgl_calls_record_nothing() {
    let mut doc = document_with(RecorderConfig::default());
    let gl = attached_canvas(&mut doc).get_context_webgl().unwrap();
    let blend = gl.constant("ONE").unwrap();

    assert!(gl.blend_func(blend, blend).is_err());
    assert!(gl.get_error().is_err());
    assert!(gl.get_extension("OES_texture_float").is_none());
    assert!(gl.statements().is_empty());
}

// ============================================================================
// LITERAL FORMATTING TESTS
// ============================================================================

#[test]
fn test_text_escaping() {
    let mut doc = document_with(RecorderConfig::default());
    let ctx = attached_canvas(&mut doc).get_context_2d().unwrap();

    ctx.fill_text("a\\b", 0.0, 0.0);
    ctx.stroke_text("line\nbreak", 0.0, 0.0);
    ctx.set_font("12px 'Open Sans'");

    assert_eq!(
        ctx.statements(),
        vec![
            r"_c0.fillText('a\\b',0,0);",
            r"_c0.strokeText('line\nbreak',0,0);",
            r"_c0.font='12px \'Open Sans\'';",
        ]
    );
}

#[test]
fn test_number_formatting() {
    let mut doc = document_with(RecorderConfig::default());
    let ctx = attached_canvas(&mut doc).get_context_2d().unwrap();

    ctx.move_to(-0.0, 1.5);
    ctx.line_to(f64::NAN, f64::INFINITY);
    ctx.set_line_dash(&[4.0, 2.0]);

    assert_eq!(
        ctx.statements(),
        vec![
            "_c0.moveTo(0,1.5);",
            "_c0.lineTo(NaN,Infinity);",
            "_c0.setLineDash([4,2]);",
        ]
    );
}

#[test]
fn test_keyword_properties_round_trip() {
    let mut doc = document_with(RecorderConfig::default());
    let ctx = attached_canvas(&mut doc).get_context_2d().unwrap();

    assert_eq!(ctx.line_cap(), LineCap::Butt);
    ctx.set_line_cap(LineCap::Round);
    ctx.set_text_align(TextAlign::Center);
    ctx.set_global_composite_operation(CompositeOperation::Multiply);

    assert_eq!(ctx.line_cap(), LineCap::Round);
    assert_eq!(ctx.text_align(), TextAlign::Center);
    assert_eq!(
        ctx.statements(),
        vec![
            "_c0.lineCap='round';",
            "_c0.textAlign='center';",
            "_c0.globalCompositeOperation='multiply';",
        ]
    );
}

#[test]
fn test_webgl_unknown_enum_is_numeric() {
    let mut doc = document_with(RecorderConfig::default());
    let gl = attached_canvas(&mut doc).get_context_webgl().unwrap();

    gl.enable(0xDEAD);
    gl.clear(16640);
    assert_eq!(gl.statements(), vec!["_cgl0.enable(57005);", "_cgl0.clear(16640);"]);
}

#[test]
fn test_webgl_clear_frame_replays_by_name() {
    let mut doc = document_with(RecorderConfig::default());
    let gl = attached_canvas(&mut doc).get_context_webgl().unwrap();

    gl.clear_color(0.0, 0.0, 0.0, 1.0);
    gl.clear(gl.constant("COLOR_BUFFER_BIT").unwrap());

    assert_eq!(
        doc.assemble_script(),
        "const _cnvs0=document.getElementById('_cnvs0');\r\n\
         const _cgl0=_cnvs0.getContext('webgl');\r\n\
         _cgl0.clearColor(0,0,0,1);\r\n\
         _cgl0.clear(_cgl0.COLOR_BUFFER_BIT);\r\n"
    );
}

// ============================================================================
// SURFACE STATE TESTS
// ============================================================================

#[test]
fn test_text_content_tracks_drawn_text() {
    let mut doc = document_with(RecorderConfig::default());
    let canvas = attached_canvas(&mut doc);
    let ctx = canvas.get_context_2d().unwrap();

    ctx.fill_text("Hello", 0.0, 0.0);
    ctx.stroke_text("world", 0.0, 10.0);
    assert_eq!(canvas.text_content(), "Hello world");

    ctx.clear_rect(10.0, 10.0, 5.0, 5.0);
    assert_eq!(canvas.text_content(), "Hello world");

    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    assert_eq!(canvas.text_content(), "");
}

#[test]
fn test_measure_text_uses_current_font() {
    let mut doc = document_with(RecorderConfig::default());
    let ctx = attached_canvas(&mut doc).get_context_2d().unwrap();

    let small = ctx.measure_text("abcd");
    ctx.set_font("20px monospace");
    let large = ctx.measure_text("abcd");

    assert!((large.width - small.width * 2.0).abs() < 1e-9);
    assert!(large.font_bounding_box_ascent > small.font_bounding_box_ascent);
}

#[test]
fn test_resized_canvas_reports_drawing_buffer() {
    let mut doc = document_with(RecorderConfig::default().with_canvas_size(64, 32));
    let canvas = attached_canvas(&mut doc);
    let gl = canvas.get_context_webgl().unwrap();

    assert_eq!((gl.drawing_buffer_width(), gl.drawing_buffer_height()), (64, 32));
    canvas.set_width(128);
    assert_eq!(gl.drawing_buffer_width(), 128);
}

// ============================================================================
// IDLE SURFACE TESTS
// ============================================================================

#[test]
fn test_idle_canvases_are_skipped() {
    let mut doc = document_with(RecorderConfig::default());
    let no_context = attached_canvas(&mut doc);
    let no_calls = attached_canvas(&mut doc);
    let busy = attached_canvas(&mut doc);

    let _ = no_context;
    no_calls.get_context_webgl().unwrap();
    busy.get_context_2d().unwrap().stroke();

    assert_eq!(
        doc.assemble_script(),
        "const _cnvs2=document.getElementById('_cnvs2');\r\n\
         const _c2=_cnvs2.getContext('2d');\r\n\
         _c2.stroke();\r\n"
    );
}

#[test]
fn test_idle_dependency_is_declared_only() {
    let mut doc = document_with(RecorderConfig::default());
    let blank = doc.create_element("canvas").as_canvas().unwrap().clone();
    let ctx = attached_canvas(&mut doc).get_context_2d().unwrap();
    ctx.draw_image(&blank, 0.0, 0.0).unwrap();

    assert_eq!(
        doc.assemble_script(),
        "const _cnvs0=document.createElement('canvas');\r\n\
         const _cnvs1=document.getElementById('_cnvs1');\r\n\
         const _c1=_cnvs1.getContext('2d');\r\n\
         _c1.drawImage(_cnvs0,0,0);\r\n"
    );
}

// ============================================================================
// IMAGE TESTS
// ============================================================================

#[test]
fn test_plain_image_source_is_quoted() {
    let mut doc = document_with(RecorderConfig::default());
    let img = doc.create_element("img");
    doc.host_mut().append(*img.node()).unwrap();
    let image = img.as_image().unwrap();

    image.set_src("sprite.png");
    assert_eq!(image.src(), "sprite.png");
    assert!(image.sources().is_empty());
    assert_eq!(
        doc.assemble_script(),
        "const _img0=document.getElementById('_img0');\r\n_img0.src='sprite.png';\r\n"
    );
}

#[test]
fn test_export_without_image_recording_is_placeholder() {
    let mut doc = document_with(RecorderConfig::default().with_image_recording(false));
    let canvas = attached_canvas(&mut doc);

    assert_eq!(canvas.to_data_url(), PLACEHOLDER_DATA_URL);
    assert_eq!(doc.create_element("img").kind(), &ElementKind::Other);
}

#[test]
fn test_onload_fires_when_src_already_set() {
    let mut doc = document_with(RecorderConfig::default());
    let image = doc.create_element("img").as_image().unwrap().clone();
    image.set_src("a.png");

    let count = std::rc::Rc::new(std::cell::Cell::new(0));
    let seen = count.clone();
    image.set_onload(move || seen.set(seen.get() + 1));
    assert_eq!(count.get(), 1);

    image.set_src("b.png");
    assert_eq!(count.get(), 2);
}
