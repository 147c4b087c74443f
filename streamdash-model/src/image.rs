use std::fmt::Display;
use std::fmt::Formatter;

/// Named image variants a Jellyfin item can expose.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageVariant {
    Primary,  // Portrait poster
    Backdrop, // Wide landscape art
    Thumb,    // Landscape thumbnail
}

impl ImageVariant {
    /// Path segment used by the image endpoint (`/Images/{segment}`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            ImageVariant::Primary => "Primary",
            ImageVariant::Backdrop => "Backdrop",
            ImageVariant::Thumb => "Thumb",
        }
    }

    pub const fn is_landscape(&self) -> bool {
        matches!(self, ImageVariant::Backdrop | ImageVariant::Thumb)
    }
}

impl Display for ImageVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target box the image server scales and crops into.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillSize {
    pub width: u32,
    pub height: u32,
}

impl FillSize {
    /// 2:3 poster box
    pub const PORTRAIT: FillSize = FillSize::new(400, 600);
    /// 2:1 banner box shared by backdrops and thumbs
    pub const LANDSCAPE: FillSize = FillSize::new(800, 400);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Display for FillSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
