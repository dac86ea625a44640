//! WebGL Rendering Context
//!
//! Recording WebGLRenderingContext. Object creation mints named handles,
//! enum arguments are written symbolically and queries answer permissively.
//! Calls carrying GPU state that cannot be replayed from a statement fail
//! with `NotImplemented("webgl.<call>")`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::enums::EnumTable;
use super::extensions::LoseContextExtension;
use super::handles::{
    BufferSource, WebGlActiveInfo, WebGlBuffer, WebGlContextAttributes, WebGlFramebuffer,
    WebGlProgram, WebGlRenderbuffer, WebGlShader, WebGlShaderPrecisionFormat, WebGlTexture,
    WebGlUniformLocation,
};
use super::{GLbitfield, GLboolean, GLclampf, GLenum, GLfloat, GLint, GLintptr, GLsizei, GLuint};
use crate::context::{ContextKind, RecordedContext};
use crate::element::SurfaceState;
use crate::literal::{self, Arg, ARG_SEPARATOR, ARG_SEPARATOR_SPACED};
use crate::log::{Handle, HandleNamer, OpLog};
use crate::{not_implemented, Result};

fn unsupported<T>(call: &str) -> Result<T> {
    not_implemented(format!("webgl.{call}"))
}

/// The WebGLRenderingContext API
///
/// Calls with default bodies are not reproducible from a statement and
/// fail without recording.
pub trait WebGlRenderingContext {
    // Constants

    /// Value of a symbolic constant (`ARRAY_BUFFER`, `TRIANGLES`, …)
    fn constant(&self, name: &str) -> Option<GLenum>;
    /// Name of a constant value
    fn constant_name(&self, value: GLenum) -> Option<&'static str>;

    // Drawing buffer

    fn drawing_buffer_width(&self) -> GLsizei;
    fn drawing_buffer_height(&self) -> GLsizei;

    // Object creation

    fn create_buffer(&self) -> WebGlBuffer;
    fn create_framebuffer(&self) -> WebGlFramebuffer;
    fn create_program(&self) -> WebGlProgram;
    fn create_renderbuffer(&self) -> WebGlRenderbuffer;
    fn create_shader(&self, shader_type: GLenum) -> WebGlShader;
    fn create_texture(&self) -> WebGlTexture;
    fn get_uniform_location(&self, program: &WebGlProgram, name: &str) -> WebGlUniformLocation;

    // Object deletion

    fn delete_buffer(&self, buffer: &WebGlBuffer);
    fn delete_framebuffer(&self, framebuffer: &WebGlFramebuffer);
    fn delete_program(&self, program: &WebGlProgram);
    fn delete_renderbuffer(&self, renderbuffer: &WebGlRenderbuffer);
    fn delete_shader(&self, shader: &WebGlShader);
    fn delete_texture(&self, texture: &WebGlTexture);

    // Binding

    fn active_texture(&self, texture: GLenum);
    fn bind_buffer(&self, target: GLenum, buffer: Option<&WebGlBuffer>);
    fn bind_framebuffer(&self, target: GLenum, framebuffer: Option<&WebGlFramebuffer>);
    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: Option<&WebGlRenderbuffer>);
    fn bind_texture(&self, target: GLenum, texture: Option<&WebGlTexture>);

    // Buffers

    fn buffer_data(&self, target: GLenum, data: BufferSource<'_>, usage: GLenum);
    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: BufferSource<'_>);

    // Clearing

    fn clear(&self, mask: GLbitfield);
    fn clear_color(&self, red: GLclampf, green: GLclampf, blue: GLclampf, alpha: GLclampf);
    fn clear_depth(&self, depth: GLclampf);
    fn clear_stencil(&self, s: GLint);
    fn color_mask(&self, red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean);

    // Shaders and programs

    fn shader_source(&self, shader: &WebGlShader, source: &str);
    fn compile_shader(&self, shader: &WebGlShader);
    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader);
    fn detach_shader(&self, program: &WebGlProgram, shader: &WebGlShader);
    fn link_program(&self, program: &WebGlProgram);
    fn use_program(&self, program: Option<&WebGlProgram>);
    fn validate_program(&self, program: &WebGlProgram);

    // Capabilities

    fn enable(&self, cap: GLenum);
    fn disable(&self, cap: GLenum);

    // Vertex attributes

    fn enable_vertex_attrib_array(&self, index: GLuint);
    fn disable_vertex_attrib_array(&self, index: GLuint);
    fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        data_type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        offset: GLintptr,
    );
    fn vertex_attrib1f(&self, index: GLuint, x: GLfloat);
    fn vertex_attrib2f(&self, index: GLuint, x: GLfloat, y: GLfloat);
    fn vertex_attrib3f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat);
    fn vertex_attrib4f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat);
    fn vertex_attrib1fv(&self, index: GLuint, values: &[GLfloat]);
    fn vertex_attrib2fv(&self, index: GLuint, values: &[GLfloat]);
    fn vertex_attrib3fv(&self, index: GLuint, values: &[GLfloat]);
    fn vertex_attrib4fv(&self, index: GLuint, values: &[GLfloat]);

    // Uniforms

    fn get_uniform(&self, program: &WebGlProgram, location: &WebGlUniformLocation);
    fn uniform1f(&self, location: &WebGlUniformLocation, x: GLfloat);
    fn uniform2f(&self, location: &WebGlUniformLocation, x: GLfloat, y: GLfloat);
    fn uniform3f(&self, location: &WebGlUniformLocation, x: GLfloat, y: GLfloat, z: GLfloat);
    fn uniform4f(
        &self,
        location: &WebGlUniformLocation,
        x: GLfloat,
        y: GLfloat,
        z: GLfloat,
        w: GLfloat,
    );
    fn uniform1i(&self, location: &WebGlUniformLocation, x: GLint);
    fn uniform2i(&self, location: &WebGlUniformLocation, x: GLint, y: GLint);
    fn uniform3i(&self, location: &WebGlUniformLocation, x: GLint, y: GLint, z: GLint);
    fn uniform4i(&self, location: &WebGlUniformLocation, x: GLint, y: GLint, z: GLint, w: GLint);
    fn uniform1fv(&self, location: &WebGlUniformLocation, values: &[GLfloat]);
    fn uniform2fv(&self, location: &WebGlUniformLocation, values: &[GLfloat]);
    fn uniform3fv(&self, location: &WebGlUniformLocation, values: &[GLfloat]);
    fn uniform4fv(&self, location: &WebGlUniformLocation, values: &[GLfloat]);
    fn uniform1iv(&self, location: &WebGlUniformLocation, values: &[GLint]);
    fn uniform2iv(&self, location: &WebGlUniformLocation, values: &[GLint]);
    fn uniform3iv(&self, location: &WebGlUniformLocation, values: &[GLint]);
    fn uniform4iv(&self, location: &WebGlUniformLocation, values: &[GLint]);
    fn uniform_matrix2fv(&self, location: &WebGlUniformLocation, transpose: bool, values: &[GLfloat]);
    fn uniform_matrix3fv(&self, location: &WebGlUniformLocation, transpose: bool, values: &[GLfloat]);
    fn uniform_matrix4fv(&self, location: &WebGlUniformLocation, transpose: bool, values: &[GLfloat]);

    // Drawing

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);
    fn draw_elements(&self, mode: GLenum, count: GLsizei, index_type: GLenum, offset: GLintptr);
    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    fn finish(&self);
    fn flush(&self);

    // Queries

    fn get_parameter(&self, pname: GLenum) -> bool;
    fn get_buffer_parameter(&self, target: GLenum, pname: GLenum) -> bool;
    fn get_framebuffer_attachment_parameter(
        &self,
        target: GLenum,
        attachment: GLenum,
        pname: GLenum,
    ) -> bool;
    fn get_program_parameter(&self, program: &WebGlProgram, pname: GLenum) -> bool;
    fn get_renderbuffer_parameter(&self, target: GLenum, pname: GLenum) -> bool;
    fn get_shader_parameter(&self, shader: &WebGlShader, pname: GLenum) -> bool;
    fn get_tex_parameter(&self, target: GLenum, pname: GLenum) -> bool;
    fn is_enabled(&self, cap: GLenum) -> bool;
    fn get_supported_extensions(&self) -> Vec<String>;
    fn get_extension(&self, name: &str) -> Option<LoseContextExtension>;

    // Unsupported

    fn bind_attrib_location(&self, _program: &WebGlProgram, _index: GLuint, _name: &str) -> Result<()> {
        unsupported("bindAttribLocation")
    }
    fn blend_color(&self, _red: GLclampf, _green: GLclampf, _blue: GLclampf, _alpha: GLclampf) -> Result<()> {
        unsupported("blendColor")
    }
    fn blend_equation(&self, _mode: GLenum) -> Result<()> {
        unsupported("blendEquation")
    }
    fn blend_equation_separate(&self, _mode_rgb: GLenum, _mode_alpha: GLenum) -> Result<()> {
        unsupported("blendEquationSeparate")
    }
    fn blend_func(&self, _sfactor: GLenum, _dfactor: GLenum) -> Result<()> {
        unsupported("blendFunc")
    }
    fn blend_func_separate(
        &self,
        _src_rgb: GLenum,
        _dst_rgb: GLenum,
        _src_alpha: GLenum,
        _dst_alpha: GLenum,
    ) -> Result<()> {
        unsupported("blendFuncSeparate")
    }
    fn check_framebuffer_status(&self, _target: GLenum) -> Result<GLenum> {
        unsupported("checkFramebufferStatus")
    }
    #[allow(clippy::too_many_arguments)]
    fn copy_tex_image_2d(
        &self,
        _target: GLenum,
        _level: GLint,
        _internal_format: GLenum,
        _x: GLint,
        _y: GLint,
        _width: GLsizei,
        _height: GLsizei,
        _border: GLint,
    ) -> Result<()> {
        unsupported("copyTexImage2D")
    }
    #[allow(clippy::too_many_arguments)]
    fn copy_tex_sub_image_2d(
        &self,
        _target: GLenum,
        _level: GLint,
        _xoffset: GLint,
        _yoffset: GLint,
        _x: GLint,
        _y: GLint,
        _width: GLsizei,
        _height: GLsizei,
    ) -> Result<()> {
        unsupported("copyTexSubImage2D")
    }
    #[allow(clippy::too_many_arguments)]
    fn compressed_tex_image_2d(
        &self,
        _target: GLenum,
        _level: GLint,
        _internal_format: GLenum,
        _width: GLsizei,
        _height: GLsizei,
        _border: GLint,
        _data: &[u8],
    ) -> Result<()> {
        unsupported("compressedTexImage2D")
    }
    #[allow(clippy::too_many_arguments)]
    fn compressed_tex_sub_image_2d(
        &self,
        _target: GLenum,
        _level: GLint,
        _xoffset: GLint,
        _yoffset: GLint,
        _width: GLsizei,
        _height: GLsizei,
        _format: GLenum,
        _data: &[u8],
    ) -> Result<()> {
        unsupported("compressedTexSubImage2D")
    }
    fn cull_face(&self, _mode: GLenum) -> Result<()> {
        unsupported("cullFace")
    }
    fn depth_func(&self, _func: GLenum) -> Result<()> {
        unsupported("depthFunc")
    }
    fn depth_mask(&self, _flag: GLboolean) -> Result<()> {
        unsupported("depthMask")
    }
    fn depth_range(&self, _z_near: GLclampf, _z_far: GLclampf) -> Result<()> {
        unsupported("depthRange")
    }
    fn framebuffer_renderbuffer(
        &self,
        _target: GLenum,
        _attachment: GLenum,
        _renderbuffer_target: GLenum,
        _renderbuffer: Option<&WebGlRenderbuffer>,
    ) -> Result<()> {
        unsupported("framebufferRenderbuffer")
    }
    fn framebuffer_texture_2d(
        &self,
        _target: GLenum,
        _attachment: GLenum,
        _tex_target: GLenum,
        _texture: Option<&WebGlTexture>,
        _level: GLint,
    ) -> Result<()> {
        unsupported("framebufferTexture2D")
    }
    fn front_face(&self, _mode: GLenum) -> Result<()> {
        unsupported("frontFace")
    }
    fn generate_mipmap(&self, _target: GLenum) -> Result<()> {
        unsupported("generateMipmap")
    }
    fn get_active_attrib(&self, _program: &WebGlProgram, _index: GLuint) -> Result<WebGlActiveInfo> {
        unsupported("getActiveAttrib")
    }
    fn get_active_uniform(&self, _program: &WebGlProgram, _index: GLuint) -> Result<WebGlActiveInfo> {
        unsupported("getActiveUniform")
    }
    fn get_attached_shaders(&self, _program: &WebGlProgram) -> Result<Vec<WebGlShader>> {
        unsupported("getAttachedShaders")
    }
    fn get_attrib_location(&self, _program: &WebGlProgram, _name: &str) -> Result<GLint> {
        unsupported("getAttribLocation")
    }
    fn get_context_attributes(&self) -> Result<WebGlContextAttributes> {
        unsupported("getContextAttributes")
    }
    fn get_error(&self) -> Result<GLenum> {
        unsupported("getError")
    }
    fn get_program_info_log(&self, _program: &WebGlProgram) -> Result<String> {
        unsupported("getProgramInfoLog")
    }
    fn get_shader_info_log(&self, _shader: &WebGlShader) -> Result<String> {
        unsupported("getShaderInfoLog")
    }
    fn get_shader_precision_format(
        &self,
        _shader_type: GLenum,
        _precision_type: GLenum,
    ) -> Result<WebGlShaderPrecisionFormat> {
        unsupported("getShaderPrecisionFormat")
    }
    fn get_shader_source(&self, _shader: &WebGlShader) -> Result<String> {
        unsupported("getShaderSource")
    }
    fn get_vertex_attrib(&self, _index: GLuint, _pname: GLenum) -> Result<bool> {
        unsupported("getVertexAttrib")
    }
    fn get_vertex_attrib_offset(&self, _index: GLuint, _pname: GLenum) -> Result<GLintptr> {
        unsupported("getVertexAttribOffset")
    }
    fn hint(&self, _target: GLenum, _mode: GLenum) -> Result<()> {
        unsupported("hint")
    }
    fn is_buffer(&self, _buffer: Option<&WebGlBuffer>) -> Result<bool> {
        unsupported("isBuffer")
    }
    fn is_context_lost(&self) -> Result<bool> {
        unsupported("isContextLost")
    }
    fn is_framebuffer(&self, _framebuffer: Option<&WebGlFramebuffer>) -> Result<bool> {
        unsupported("isFramebuffer")
    }
    fn is_program(&self, _program: Option<&WebGlProgram>) -> Result<bool> {
        unsupported("isProgram")
    }
    fn is_renderbuffer(&self, _renderbuffer: Option<&WebGlRenderbuffer>) -> Result<bool> {
        unsupported("isRenderbuffer")
    }
    fn is_shader(&self, _shader: Option<&WebGlShader>) -> Result<bool> {
        unsupported("isShader")
    }
    fn is_texture(&self, _texture: Option<&WebGlTexture>) -> Result<bool> {
        unsupported("isTexture")
    }
    fn line_width(&self, _width: GLfloat) -> Result<()> {
        unsupported("lineWidth")
    }
    fn pixel_storei(&self, _pname: GLenum, _param: GLint) -> Result<()> {
        unsupported("pixelStorei")
    }
    fn polygon_offset(&self, _factor: GLfloat, _units: GLfloat) -> Result<()> {
        unsupported("polygonOffset")
    }
    #[allow(clippy::too_many_arguments)]
    fn read_pixels(
        &self,
        _x: GLint,
        _y: GLint,
        _width: GLsizei,
        _height: GLsizei,
        _format: GLenum,
        _data_type: GLenum,
        _pixels: &mut [u8],
    ) -> Result<()> {
        unsupported("readPixels")
    }
    fn renderbuffer_storage(
        &self,
        _target: GLenum,
        _internal_format: GLenum,
        _width: GLsizei,
        _height: GLsizei,
    ) -> Result<()> {
        unsupported("renderbufferStorage")
    }
    fn sample_coverage(&self, _value: GLclampf, _invert: GLboolean) -> Result<()> {
        unsupported("sampleCoverage")
    }
    fn scissor(&self, _x: GLint, _y: GLint, _width: GLsizei, _height: GLsizei) -> Result<()> {
        unsupported("scissor")
    }
    fn stencil_func(&self, _func: GLenum, _reference: GLint, _mask: GLuint) -> Result<()> {
        unsupported("stencilFunc")
    }
    fn stencil_func_separate(
        &self,
        _face: GLenum,
        _func: GLenum,
        _reference: GLint,
        _mask: GLuint,
    ) -> Result<()> {
        unsupported("stencilFuncSeparate")
    }
    fn stencil_mask(&self, _mask: GLuint) -> Result<()> {
        unsupported("stencilMask")
    }
    fn stencil_mask_separate(&self, _face: GLenum, _mask: GLuint) -> Result<()> {
        unsupported("stencilMaskSeparate")
    }
    fn stencil_op(&self, _fail: GLenum, _zfail: GLenum, _zpass: GLenum) -> Result<()> {
        unsupported("stencilOp")
    }
    fn stencil_op_separate(
        &self,
        _face: GLenum,
        _fail: GLenum,
        _zfail: GLenum,
        _zpass: GLenum,
    ) -> Result<()> {
        unsupported("stencilOpSeparate")
    }
    #[allow(clippy::too_many_arguments)]
    fn tex_image_2d(
        &self,
        _target: GLenum,
        _level: GLint,
        _internal_format: GLint,
        _width: GLsizei,
        _height: GLsizei,
        _border: GLint,
        _format: GLenum,
        _data_type: GLenum,
        _pixels: Option<&[u8]>,
    ) -> Result<()> {
        unsupported("texImage2D")
    }
    #[allow(clippy::too_many_arguments)]
    fn tex_sub_image_2d(
        &self,
        _target: GLenum,
        _level: GLint,
        _xoffset: GLint,
        _yoffset: GLint,
        _width: GLsizei,
        _height: GLsizei,
        _format: GLenum,
        _data_type: GLenum,
        _pixels: Option<&[u8]>,
    ) -> Result<()> {
        unsupported("texSubImage2D")
    }
    fn tex_parameterf(&self, _target: GLenum, _pname: GLenum, _param: GLfloat) -> Result<()> {
        unsupported("texParameterf")
    }
    fn tex_parameteri(&self, _target: GLenum, _pname: GLenum, _param: GLint) -> Result<()> {
        unsupported("texParameteri")
    }
}

/// Recording WebGL context bound to one canvas
#[derive(Clone)]
pub struct RecordingWebGlContext {
    inner: Rc<WebGlInner>,
}

struct WebGlInner {
    var_name: String,
    log: OpLog,
    namer: HandleNamer,
    enums: EnumTable,
    surface: Rc<RefCell<SurfaceState>>,
}

impl RecordingWebGlContext {
    pub(crate) fn new(var_name: String, surface: Rc<RefCell<SurfaceState>>) -> Self {
        Self {
            inner: Rc::new(WebGlInner {
                namer: HandleNamer::new(&var_name),
                var_name,
                log: OpLog::new(),
                enums: EnumTable::new(),
                surface,
            }),
        }
    }

    /// Whether both values are the same bound context
    pub fn same_context(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Record a call taking handles or enum names: `<ctx>.m(a, b);`
    fn record(&self, method: &str, args: &[Arg]) {
        self.record_with(method, args, ARG_SEPARATOR_SPACED);
    }

    /// Record a call taking plain values: `<ctx>.m(a,b);`
    fn record_values(&self, method: &str, args: &[Arg]) {
        self.record_with(method, args, ARG_SEPARATOR);
    }

    fn record_with(&self, method: &str, args: &[Arg], separator: &str) {
        let statement = literal::call(&self.inner.var_name, method, args, separator);
        self.inner.log.append(statement);
    }

    /// `<ctx>.<NAME>`, or the raw value when it names no constant
    fn enum_arg(&self, value: GLenum) -> Arg {
        match self.inner.enums.name(value) {
            Some(name) => Arg::reference(format!("{}.{}", self.inner.var_name, name)),
            None => Arg::from(value),
        }
    }

    /// `const <ctx>_<K> = <ctx>.<method>(args);`
    fn create_handle(&self, method: &str, args: &[Arg]) -> Handle {
        let name = self.inner.namer.next_name();
        let expr = literal::invocation(&self.inner.var_name, method, args, ARG_SEPARATOR_SPACED);
        self.inner.log.append(literal::declare(&name, &expr));
        Handle::new(name, self.inner.log.clone())
    }

    fn record_floats(&self, method: &str, head: Arg, values: &[GLfloat]) {
        let mut args = vec![head];
        args.extend(values.iter().map(|&v| Arg::from(v)));
        self.record_values(method, &args);
    }

    fn record_ints(&self, method: &str, head: Arg, values: &[GLint]) {
        let mut args = vec![head];
        args.extend(values.iter().map(|&v| Arg::from(v)));
        self.record_values(method, &args);
    }

    /// `<ctx>.m(index, x,y,z);`
    fn record_attrib(&self, method: &str, index: GLuint, values: &[GLfloat]) {
        let values: Vec<Arg> = values.iter().map(|&v| Arg::from(v)).collect();
        let values = literal::join_args(&values, ARG_SEPARATOR);
        self.record(method, &[index.into(), Arg::reference(values)]);
    }

    /// Buffer bits by name when the mask is exactly one of them
    fn mask_arg(&self, mask: GLbitfield) -> Arg {
        const BUFFER_BITS: [&str; 3] = ["COLOR_BUFFER_BIT", "DEPTH_BUFFER_BIT", "STENCIL_BUFFER_BIT"];
        match self.inner.enums.name(mask) {
            Some(name) if BUFFER_BITS.contains(&name) => {
                Arg::reference(format!("{}.{}", self.inner.var_name, name))
            }
            _ => Arg::from(mask),
        }
    }
}

impl WebGlRenderingContext for RecordingWebGlContext {
    // Constants

    fn constant(&self, name: &str) -> Option<GLenum> {
        self.inner.enums.value(name)
    }

    fn constant_name(&self, value: GLenum) -> Option<&'static str> {
        self.inner.enums.name(value)
    }

    // Drawing buffer

    fn drawing_buffer_width(&self) -> GLsizei {
        self.inner.surface.borrow().width as GLsizei
    }

    fn drawing_buffer_height(&self) -> GLsizei {
        self.inner.surface.borrow().height as GLsizei
    }

    // Object creation

    fn create_buffer(&self) -> WebGlBuffer {
        WebGlBuffer::new(self.create_handle("createBuffer", &[]))
    }

    fn create_framebuffer(&self) -> WebGlFramebuffer {
        WebGlFramebuffer::new(self.create_handle("createFramebuffer", &[]))
    }

    fn create_program(&self) -> WebGlProgram {
        WebGlProgram::new(self.create_handle("createProgram", &[]))
    }

    fn create_renderbuffer(&self) -> WebGlRenderbuffer {
        WebGlRenderbuffer::new(self.create_handle("createRenderbuffer", &[]))
    }

    fn create_shader(&self, shader_type: GLenum) -> WebGlShader {
        let args = [self.enum_arg(shader_type)];
        WebGlShader::new(self.create_handle("createShader", &args))
    }

    fn create_texture(&self) -> WebGlTexture {
        WebGlTexture::new(self.create_handle("createTexture", &[]))
    }

    fn get_uniform_location(&self, program: &WebGlProgram, name: &str) -> WebGlUniformLocation {
        let args = [program.arg(), name.into()];
        WebGlUniformLocation::new(self.create_handle("getUniformLocation", &args))
    }

    // Object deletion

    fn delete_buffer(&self, buffer: &WebGlBuffer) {
        self.record("deleteBuffer", &[buffer.arg()]);
    }

    fn delete_framebuffer(&self, framebuffer: &WebGlFramebuffer) {
        self.record("deleteFramebuffer", &[framebuffer.arg()]);
    }

    fn delete_program(&self, program: &WebGlProgram) {
        self.record("deleteProgram", &[program.arg()]);
    }

    fn delete_renderbuffer(&self, renderbuffer: &WebGlRenderbuffer) {
        self.record("deleteRenderbuffer", &[renderbuffer.arg()]);
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        self.record("deleteShader", &[shader.arg()]);
    }

    fn delete_texture(&self, texture: &WebGlTexture) {
        self.record("deleteTexture", &[texture.arg()]);
    }

    // Binding

    fn active_texture(&self, texture: GLenum) {
        self.record("activeTexture", &[self.enum_arg(texture)]);
    }

    fn bind_buffer(&self, target: GLenum, buffer: Option<&WebGlBuffer>) {
        let args = [self.enum_arg(target), buffer.map_or(Arg::Null, WebGlBuffer::arg)];
        self.record("bindBuffer", &args);
    }

    fn bind_framebuffer(&self, target: GLenum, framebuffer: Option<&WebGlFramebuffer>) {
        let args = [self.enum_arg(target), framebuffer.map_or(Arg::Null, WebGlFramebuffer::arg)];
        self.record("bindFramebuffer", &args);
    }

    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: Option<&WebGlRenderbuffer>) {
        let args = [
            self.enum_arg(target),
            renderbuffer.map_or(Arg::Null, WebGlRenderbuffer::arg),
        ];
        self.record("bindRenderbuffer", &args);
    }

    fn bind_texture(&self, target: GLenum, texture: Option<&WebGlTexture>) {
        let args = [self.enum_arg(target), texture.map_or(Arg::Null, WebGlTexture::arg)];
        self.record("bindTexture", &args);
    }

    // Buffers

    fn buffer_data(&self, target: GLenum, data: BufferSource<'_>, usage: GLenum) {
        let args = [self.enum_arg(target), data.arg(), self.enum_arg(usage)];
        self.record_values("bufferData", &args);
    }

    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: BufferSource<'_>) {
        let args = [self.enum_arg(target), offset.into(), data.arg()];
        self.record_values("bufferSubData", &args);
    }

    // Clearing

    /// A combination of buffer bits cannot be split back into names, since
    /// table values are not bit flags; it is written as the raw number.
    fn clear(&self, mask: GLbitfield) {
        self.record_values("clear", &[self.mask_arg(mask)]);
    }

    fn clear_color(&self, red: GLclampf, green: GLclampf, blue: GLclampf, alpha: GLclampf) {
        let args = [red.into(), green.into(), blue.into(), alpha.into()];
        self.record_values("clearColor", &args);
    }

    fn clear_depth(&self, depth: GLclampf) {
        self.record_values("clearDepth", &[depth.into()]);
    }

    fn clear_stencil(&self, s: GLint) {
        self.record_values("clearStencil", &[s.into()]);
    }

    fn color_mask(&self, red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean) {
        let args = [red.into(), green.into(), blue.into(), alpha.into()];
        self.record_values("colorMask", &args);
    }

    // Shaders and programs

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        self.record_values("shaderSource", &[shader.arg(), source.into()]);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        self.record("compileShader", &[shader.arg()]);
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        self.record("attachShader", &[program.arg(), shader.arg()]);
    }

    fn detach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        self.record("detachShader", &[program.arg(), shader.arg()]);
    }

    fn link_program(&self, program: &WebGlProgram) {
        self.record("linkProgram", &[program.arg()]);
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        self.record("useProgram", &[program.map_or(Arg::Null, WebGlProgram::arg)]);
    }

    fn validate_program(&self, program: &WebGlProgram) {
        self.record("validateProgram", &[program.arg()]);
    }

    // Capabilities

    fn enable(&self, cap: GLenum) {
        self.record("enable", &[self.enum_arg(cap)]);
    }

    fn disable(&self, cap: GLenum) {
        self.record("disable", &[self.enum_arg(cap)]);
    }

    // Vertex attributes

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.record("enableVertexAttribArray", &[index.into()]);
    }

    fn disable_vertex_attrib_array(&self, index: GLuint) {
        self.record("disableVertexAttribArray", &[index.into()]);
    }

    fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        data_type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        let args = [
            index.into(),
            size.into(),
            self.enum_arg(data_type),
            normalized.into(),
            stride.into(),
            offset.into(),
        ];
        self.record_values("vertexAttribPointer", &args);
    }

    fn vertex_attrib1f(&self, index: GLuint, x: GLfloat) {
        self.record_attrib("vertexAttrib1f", index, &[x]);
    }

    fn vertex_attrib2f(&self, index: GLuint, x: GLfloat, y: GLfloat) {
        self.record_attrib("vertexAttrib2f", index, &[x, y]);
    }

    fn vertex_attrib3f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat) {
        self.record_attrib("vertexAttrib3f", index, &[x, y, z]);
    }

    fn vertex_attrib4f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
        self.record_attrib("vertexAttrib4f", index, &[x, y, z, w]);
    }

    fn vertex_attrib1fv(&self, index: GLuint, values: &[GLfloat]) {
        self.record("vertexAttrib1fv", &[index.into(), values.into()]);
    }

    fn vertex_attrib2fv(&self, index: GLuint, values: &[GLfloat]) {
        self.record("vertexAttrib2fv", &[index.into(), values.into()]);
    }

    fn vertex_attrib3fv(&self, index: GLuint, values: &[GLfloat]) {
        self.record("vertexAttrib3fv", &[index.into(), values.into()]);
    }

    fn vertex_attrib4fv(&self, index: GLuint, values: &[GLfloat]) {
        self.record("vertexAttrib4fv", &[index.into(), values.into()]);
    }

    // Uniforms

    fn get_uniform(&self, program: &WebGlProgram, location: &WebGlUniformLocation) {
        self.record("getUniform", &[program.arg(), location.arg()]);
    }

    fn uniform1f(&self, location: &WebGlUniformLocation, x: GLfloat) {
        self.record_floats("uniform1f", location.arg(), &[x]);
    }

    fn uniform2f(&self, location: &WebGlUniformLocation, x: GLfloat, y: GLfloat) {
        self.record_floats("uniform2f", location.arg(), &[x, y]);
    }

    fn uniform3f(&self, location: &WebGlUniformLocation, x: GLfloat, y: GLfloat, z: GLfloat) {
        self.record_floats("uniform3f", location.arg(), &[x, y, z]);
    }

    fn uniform4f(
        &self,
        location: &WebGlUniformLocation,
        x: GLfloat,
        y: GLfloat,
        z: GLfloat,
        w: GLfloat,
    ) {
        self.record_floats("uniform4f", location.arg(), &[x, y, z, w]);
    }

    fn uniform1i(&self, location: &WebGlUniformLocation, x: GLint) {
        self.record_ints("uniform1i", location.arg(), &[x]);
    }

    fn uniform2i(&self, location: &WebGlUniformLocation, x: GLint, y: GLint) {
        self.record_ints("uniform2i", location.arg(), &[x, y]);
    }

    fn uniform3i(&self, location: &WebGlUniformLocation, x: GLint, y: GLint, z: GLint) {
        self.record_ints("uniform3i", location.arg(), &[x, y, z]);
    }

    fn uniform4i(&self, location: &WebGlUniformLocation, x: GLint, y: GLint, z: GLint, w: GLint) {
        self.record_ints("uniform4i", location.arg(), &[x, y, z, w]);
    }

    fn uniform1fv(&self, location: &WebGlUniformLocation, values: &[GLfloat]) {
        self.record_values("uniform1fv", &[location.arg(), values.into()]);
    }

    fn uniform2fv(&self, location: &WebGlUniformLocation, values: &[GLfloat]) {
        self.record_values("uniform2fv", &[location.arg(), values.into()]);
    }

    fn uniform3fv(&self, location: &WebGlUniformLocation, values: &[GLfloat]) {
        self.record_values("uniform3fv", &[location.arg(), values.into()]);
    }

    fn uniform4fv(&self, location: &WebGlUniformLocation, values: &[GLfloat]) {
        self.record_values("uniform4fv", &[location.arg(), values.into()]);
    }

    fn uniform1iv(&self, location: &WebGlUniformLocation, values: &[GLint]) {
        self.record_values("uniform1iv", &[location.arg(), values.into()]);
    }

    fn uniform2iv(&self, location: &WebGlUniformLocation, values: &[GLint]) {
        self.record_values("uniform2iv", &[location.arg(), values.into()]);
    }

    fn uniform3iv(&self, location: &WebGlUniformLocation, values: &[GLint]) {
        self.record_values("uniform3iv", &[location.arg(), values.into()]);
    }

    fn uniform4iv(&self, location: &WebGlUniformLocation, values: &[GLint]) {
        self.record_values("uniform4iv", &[location.arg(), values.into()]);
    }

    fn uniform_matrix2fv(&self, location: &WebGlUniformLocation, transpose: bool, values: &[GLfloat]) {
        self.record_values("uniformMatrix2fv", &[location.arg(), transpose.into(), values.into()]);
    }

    fn uniform_matrix3fv(&self, location: &WebGlUniformLocation, transpose: bool, values: &[GLfloat]) {
        self.record_values("uniformMatrix3fv", &[location.arg(), transpose.into(), values.into()]);
    }

    fn uniform_matrix4fv(&self, location: &WebGlUniformLocation, transpose: bool, values: &[GLfloat]) {
        self.record_values("uniformMatrix4fv", &[location.arg(), transpose.into(), values.into()]);
    }

    // Drawing

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        let args = [self.enum_arg(mode), first.into(), count.into()];
        self.record("drawArrays", &args);
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, index_type: GLenum, offset: GLintptr) {
        let args = [
            self.enum_arg(mode),
            count.into(),
            self.enum_arg(index_type),
            offset.into(),
        ];
        self.record("drawElements", &args);
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record_values("viewport", &[x.into(), y.into(), width.into(), height.into()]);
    }

    fn finish(&self) {
        self.record("finish", &[]);
    }

    fn flush(&self) {
        self.record("flush", &[]);
    }

    // Queries

    fn get_parameter(&self, _pname: GLenum) -> bool {
        true
    }

    fn get_buffer_parameter(&self, _target: GLenum, _pname: GLenum) -> bool {
        true
    }

    fn get_framebuffer_attachment_parameter(
        &self,
        _target: GLenum,
        _attachment: GLenum,
        _pname: GLenum,
    ) -> bool {
        true
    }

    fn get_program_parameter(&self, _program: &WebGlProgram, _pname: GLenum) -> bool {
        true
    }

    fn get_renderbuffer_parameter(&self, _target: GLenum, _pname: GLenum) -> bool {
        true
    }

    fn get_shader_parameter(&self, _shader: &WebGlShader, _pname: GLenum) -> bool {
        true
    }

    fn get_tex_parameter(&self, _target: GLenum, _pname: GLenum) -> bool {
        true
    }

    fn is_enabled(&self, _cap: GLenum) -> bool {
        true
    }

    fn get_supported_extensions(&self) -> Vec<String> {
        Vec::new()
    }

    fn get_extension(&self, name: &str) -> Option<LoseContextExtension> {
        if name == LoseContextExtension::NAME {
            Some(LoseContextExtension::new(&self.inner.var_name, self.inner.log.clone()))
        } else {
            tracing::debug!(context = %self.inner.var_name, extension = name, "extension unavailable");
            None
        }
    }
}

impl RecordedContext for RecordingWebGlContext {
    fn kind(&self) -> ContextKind {
        ContextKind::WebGl
    }

    fn var_name(&self) -> &str {
        &self.inner.var_name
    }

    fn statements(&self) -> Vec<String> {
        self.inner.log.statements()
    }
}

impl fmt::Debug for RecordingWebGlContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingWebGlContext")
            .field("var_name", &self.inner.var_name)
            .field("statements", &self.inner.log.len())
            .finish()
    }
}
