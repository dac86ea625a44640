//! Text Measurement
//!
//! `measureText` is answered without a replay step by an external
//! measurement function; only `(width, height, descent)` is asked of it.

/// Size reported by a [`TextMeasurer`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
    pub descent: f64,
}

/// Text measurement collaborator
pub trait TextMeasurer {
    fn measure(&self, font: &str, text: &str) -> TextSize;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &str) -> TextSize,
{
    fn measure(&self, font: &str, text: &str) -> TextSize {
        self(font, text)
    }
}

/// Text metrics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub actual_bounding_box_left: f64,
    pub actual_bounding_box_right: f64,
    pub font_bounding_box_ascent: f64,
    pub font_bounding_box_descent: f64,
    pub actual_bounding_box_ascent: f64,
    pub actual_bounding_box_descent: f64,
}

impl TextMetrics {
    /// Synthesize the bounding boxes from a measured size
    pub fn from_size(size: TextSize) -> Self {
        Self {
            width: size.width,
            actual_bounding_box_left: -1.0,
            actual_bounding_box_right: size.width + 1.0,
            font_bounding_box_ascent: size.height,
            font_bounding_box_descent: size.descent,
            actual_bounding_box_ascent: size.height - size.descent,
            actual_bounding_box_descent: size.descent,
        }
    }
}

/// Estimates every glyph with the same advance, scaled by the font size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitchMeasurer {
    /// Advance per character as a fraction of the font size
    pub advance_ratio: f64,
    /// Descent as a fraction of the font size
    pub descent_ratio: f64,
}

impl Default for FixedPitchMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            descent_ratio: 0.2,
        }
    }
}

impl FixedPitchMeasurer {
    const DEFAULT_FONT_SIZE: f64 = 10.0;

    /// Font size in px from a CSS font shorthand (`bold 12px serif`, `9pt Arial`)
    pub fn font_size(font: &str) -> f64 {
        for token in font.split_whitespace() {
            // `12px/1.5` carries a line height
            let token = token.split('/').next().unwrap_or(token);
            if let Some(px) = token.strip_suffix("px") {
                if let Ok(size) = px.parse::<f64>() {
                    return size;
                }
            } else if let Some(pt) = token.strip_suffix("pt") {
                if let Ok(size) = pt.parse::<f64>() {
                    return size * 4.0 / 3.0;
                }
            }
        }
        Self::DEFAULT_FONT_SIZE
    }
}

impl TextMeasurer for FixedPitchMeasurer {
    fn measure(&self, font: &str, text: &str) -> TextSize {
        let size = Self::font_size(font);
        TextSize {
            width: text.chars().count() as f64 * size * self.advance_ratio,
            height: size,
            descent: size * self.descent_ratio,
        }
    }
}
