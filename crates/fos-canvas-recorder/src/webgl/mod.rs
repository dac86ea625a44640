//! WebGL Module
//!
//! Recording WebGL 1.0 context.

pub mod context;
pub mod enums;
pub mod extensions;
pub mod handles;

pub use context::{RecordingWebGlContext, WebGlRenderingContext};
pub use enums::GL_ENUM_NAMES;
pub use extensions::LoseContextExtension;
pub use handles::{
    BufferSource, WebGlActiveInfo, WebGlBuffer, WebGlContextAttributes, WebGlFramebuffer,
    WebGlProgram, WebGlRenderbuffer, WebGlShader, WebGlShaderPrecisionFormat, WebGlTexture,
    WebGlUniformLocation,
};

pub type GLenum = u32;
pub type GLbitfield = u32;
pub type GLboolean = bool;
pub type GLint = i32;
pub type GLuint = u32;
pub type GLsizei = i32;
pub type GLintptr = i64;
pub type GLsizeiptr = i64;
pub type GLfloat = f32;
pub type GLclampf = f32;
