use crate::foundation::error::{LaminateError, LaminateResult};

/// Pixel dimensions shared by every image participating in a compile run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Per-slot layer opacity as a percentage in `[0, 100]`.
///
/// Opacity is per-slot, not per-image: every image drawn from a slot is
/// scaled by the slot's single value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Opacity(u8);

impl Opacity {
    /// Fully opaque (100%).
    pub const OPAQUE: Opacity = Opacity(100);

    /// Build an [`Opacity`] from a percentage, rejecting values above 100.
    pub fn new(percent: u8) -> LaminateResult<Self> {
        if percent > 100 {
            return Err(LaminateError::validation("opacity must be within 0..=100"));
        }
        Ok(Self(percent))
    }

    /// The raw percentage value.
    pub fn percent(self) -> u8 {
        self.0
    }

    /// The percentage as a `[0.0, 1.0]` multiplier.
    pub fn fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Closed set of supported output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PNG, alpha-capable.
    #[default]
    Png,
    /// JPEG, no alpha channel.
    Jpg,
    /// BMP, no alpha channel.
    Bmp,
    /// TIFF, alpha-capable.
    Tif,
}

impl OutputFormat {
    /// File extension for this format, including the leading separator.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpg => ".jpg",
            Self::Bmp => ".bmp",
            Self::Tif => ".tif",
        }
    }

    /// Whether the encoded file carries an alpha channel.
    ///
    /// Formats without one are flattened over an opaque white background
    /// before encoding.
    pub fn supports_alpha(self) -> bool {
        matches!(self, Self::Png | Self::Tif)
    }

    /// Parse a format from an extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "bmp" => Some(Self::Bmp),
            "tif" => Some(Self::Tif),
            _ => None,
        }
    }

    /// The `image` crate format used when encoding.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpg => image::ImageFormat::Jpeg,
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Tif => image::ImageFormat::Tiff,
        }
    }
}

/// Premultiplied RGBA8 pixel buffer (row-major, r/g/b already multiplied by a).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRgba8 {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl ImageRgba8 {
    /// A fully transparent canvas at `resolution`.
    pub fn transparent(resolution: Resolution) -> Self {
        let len = (resolution.width as usize) * (resolution.height as usize) * 4;
        Self {
            width: resolution.width,
            height: resolution.height,
            data: vec![0; len],
        }
    }

    /// Wrap raw premultiplied bytes, checking the buffer length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> LaminateResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| LaminateError::validation("image buffer size overflow"))?;
        if data.len() != expected {
            return Err(LaminateError::validation(
                "image buffer length must be width * height * 4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pixel dimensions of this buffer.
    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
