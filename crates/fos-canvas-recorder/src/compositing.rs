//! Compositing Operations
//!
//! Global composite operations for Canvas 2D.

keyword_enum! {
    /// Composite operation
    pub enum CompositeOperation (default SourceOver) {
        SourceOver => "source-over",
        SourceIn => "source-in",
        SourceOut => "source-out",
        SourceAtop => "source-atop",
        DestinationOver => "destination-over",
        DestinationIn => "destination-in",
        DestinationOut => "destination-out",
        DestinationAtop => "destination-atop",
        Lighter => "lighter",
        Copy => "copy",
        Xor => "xor",
        Multiply => "multiply",
        Screen => "screen",
        Overlay => "overlay",
        Darken => "darken",
        Lighten => "lighten",
        ColorDodge => "color-dodge",
        ColorBurn => "color-burn",
        HardLight => "hard-light",
        SoftLight => "soft-light",
        Difference => "difference",
        Exclusion => "exclusion",
        Hue => "hue",
        Saturation => "saturation",
        Color => "color",
        Luminosity => "luminosity",
    }
}
