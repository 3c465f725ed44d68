use std::path::{Path, PathBuf};

use crate::compose::blend;
use crate::foundation::core::{ImageRgba8, OutputFormat};
use crate::foundation::error::{LaminateError, LaminateResult};

/// The deterministic output file name for group `index`.
pub fn output_file_name(index: usize, format: OutputFormat) -> String {
    format!("Combined_{index}{}", format.extension())
}

/// Encode and persist one composited group.
///
/// Alpha-capable targets receive the image as straight-alpha RGBA. Targets
/// without an alpha channel are first flattened over an opaque white
/// background with the same source-over rule, then written as RGB; the
/// format's encoder is never left to discard alpha on its own. An existing
/// file with the same name is overwritten.
pub fn write_composite(
    combined: &ImageRgba8,
    format: OutputFormat,
    output_directory: &Path,
    index: usize,
) -> LaminateResult<PathBuf> {
    let path = output_directory.join(output_file_name(index, format));

    if format.supports_alpha() {
        let mut data = combined.data.clone();
        blend::unpremultiply_rgba8_in_place(&mut data);
        image::save_buffer_with_format(
            &path,
            &data,
            combined.width,
            combined.height,
            image::ColorType::Rgba8,
            format.image_format(),
        )
        .map_err(|e| LaminateError::encode(format!("write '{}': {e}", path.display())))?;
    } else {
        let rgb = flatten_over_white(combined);
        image::save_buffer_with_format(
            &path,
            &rgb,
            combined.width,
            combined.height,
            image::ColorType::Rgb8,
            format.image_format(),
        )
        .map_err(|e| LaminateError::encode(format!("write '{}': {e}", path.display())))?;
    }

    Ok(path)
}

/// Source-over the premultiplied image onto opaque white, dropping alpha.
///
/// With a premultiplied source and an opaque white destination the per-pixel
/// rule collapses to `c + (255 - a)` per channel.
fn flatten_over_white(combined: &ImageRgba8) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(combined.data.len() / 4 * 3);
    for px in combined.data.chunks_exact(4) {
        let inv = 255 - px[3];
        for c in &px[..3] {
            rgb.push(c.saturating_add(inv));
        }
    }
    rgb
}

#[cfg(test)]
#[path = "../../tests/unit/encode/writer.rs"]
mod tests;
