//! WebGL Objects
//!
//! Buffers, shaders, programs and friends exist only as names in the
//! owning context's log.

use crate::literal::{number_arg, widen, Arg};
use crate::log::Handle;

macro_rules! gl_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Handle);

        impl $name {
            pub(crate) fn new(handle: Handle) -> Self {
                Self(handle)
            }

            /// Variable name in the script
            pub fn name(&self) -> &str {
                self.0.name()
            }

            pub fn handle(&self) -> &Handle {
                &self.0
            }

            pub(crate) fn arg(&self) -> Arg {
                self.0.arg()
            }
        }
    };
}

gl_handle!(
    /// `createBuffer()` result
    WebGlBuffer
);
gl_handle!(
    /// `createFramebuffer()` result
    WebGlFramebuffer
);
gl_handle!(
    /// `createProgram()` result
    WebGlProgram
);
gl_handle!(
    /// `createRenderbuffer()` result
    WebGlRenderbuffer
);
gl_handle!(
    /// `createShader(type)` result
    WebGlShader
);
gl_handle!(
    /// `createTexture()` result
    WebGlTexture
);
gl_handle!(
    /// `getUniformLocation(program, name)` result
    WebGlUniformLocation
);

/// `getActiveAttrib`/`getActiveUniform` result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebGlActiveInfo {
    pub name: String,
    pub size: i32,
    pub type_: u32,
}

/// `getShaderPrecisionFormat` result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebGlShaderPrecisionFormat {
    pub range_min: i32,
    pub range_max: i32,
    pub precision: i32,
}

/// `getContextAttributes` result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebGlContextAttributes {
    pub alpha: bool,
    pub antialias: bool,
    pub depth: bool,
    pub premultiplied_alpha: bool,
    pub preserve_drawing_buffer: bool,
    pub stencil: bool,
}

/// `bufferData` payload: a byte size or a typed array
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferSource<'a> {
    Size(i64),
    Float32(&'a [f32]),
    Int32(&'a [i32]),
    Uint32(&'a [u32]),
    Int16(&'a [i16]),
    Uint16(&'a [u16]),
    Int8(&'a [i8]),
    Uint8(&'a [u8]),
}

impl BufferSource<'_> {
    /// `new Float32Array([..])`, or the bare size
    pub(crate) fn arg(&self) -> Arg {
        let (class, items) = match *self {
            Self::Size(size) => return Arg::Int(size),
            Self::Float32(v) => ("Float32Array", join(v.iter().map(|&x| number_arg(widen(x))))),
            Self::Int32(v) => ("Int32Array", join(v.iter().map(i32::to_string))),
            Self::Uint32(v) => ("Uint32Array", join(v.iter().map(u32::to_string))),
            Self::Int16(v) => ("Int16Array", join(v.iter().map(i16::to_string))),
            Self::Uint16(v) => ("Uint16Array", join(v.iter().map(u16::to_string))),
            Self::Int8(v) => ("Int8Array", join(v.iter().map(i8::to_string))),
            Self::Uint8(v) => ("Uint8Array", join(v.iter().map(u8::to_string))),
        };
        Arg::reference(format!("new {class}([{items}])"))
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}

impl<'a> From<&'a [f32]> for BufferSource<'a> {
    fn from(data: &'a [f32]) -> Self {
        Self::Float32(data)
    }
}

impl<'a> From<&'a [u16]> for BufferSource<'a> {
    fn from(data: &'a [u16]) -> Self {
        Self::Uint16(data)
    }
}

impl<'a> From<&'a [u8]> for BufferSource<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::Uint8(data)
    }
}

impl From<i64> for BufferSource<'_> {
    fn from(size: i64) -> Self {
        Self::Size(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::OpLog;

    #[test]
    fn test_buffer_source_literals() {
        let vertices = [0.0f32, 0.5, -0.1];
        assert_eq!(
            BufferSource::from(&vertices[..]).arg().to_string(),
            "new Float32Array([0,0.5,-0.1])"
        );
        assert_eq!(
            BufferSource::Uint16(&[0, 1, 2]).arg().to_string(),
            "new Uint16Array([0,1,2])"
        );
        assert_eq!(BufferSource::Size(64).arg().to_string(), "64");
    }

    #[test]
    fn test_handle_name() {
        let buffer = WebGlBuffer::new(Handle::new("_cgl0_0".to_string(), OpLog::new()));
        assert_eq!(buffer.name(), "_cgl0_0");
        assert_eq!(buffer.arg().to_string(), "_cgl0_0");
    }
}
