//! Image Sources
//!
//! Arguments accepted by `drawImage`, `createPattern` and `putImageData`.

use crate::element::RecordedElement;
use crate::{not_implemented, Result};

/// Anything that can be drawn onto a 2D context
pub trait CanvasImageSource {
    /// The recorded element behind this source, if it has a synthetic id
    fn recorded_element(&self) -> Option<RecordedElement>;

    /// Bitmaps have no element to reference in a replay script
    fn is_image_bitmap(&self) -> bool {
        false
    }
}

/// Decoded bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBitmap {
    pub width: u32,
    pub height: u32,
}

impl ImageBitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl CanvasImageSource for ImageBitmap {
    fn recorded_element(&self) -> Option<RecordedElement> {
        None
    }

    fn is_image_bitmap(&self) -> bool {
        true
    }
}

/// Pixel buffer passed to `putImageData`
///
/// Only the extent is recorded; pixel content is not reproduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageData {
    /// Create transparent black image data
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// `{data:[],width:W,height:H}`
    pub(crate) fn literal(&self) -> String {
        format!("{{data:[],width:{},height:{}}}", self.width, self.height)
    }
}

/// Resolve an image argument to the element it names.
///
/// Bitmaps and sources without a synthetic id fail with `NotImplemented`
/// naming `operation`.
pub(crate) fn image_arg(operation: &str, image: &dyn CanvasImageSource) -> Result<RecordedElement> {
    if image.is_image_bitmap() {
        return not_implemented(format!("{operation}(\"ImageBitmap\")"));
    }
    match image.recorded_element() {
        Some(element) => Ok(element),
        None => not_implemented(operation),
    }
}
