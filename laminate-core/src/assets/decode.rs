use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{ImageRgba8, Resolution};
use crate::foundation::error::{LaminateError, LaminateResult};

/// Decode encoded image bytes into a premultiplied RGBA8 layer.
pub fn decode_layer(bytes: &[u8]) -> LaminateResult<ImageRgba8> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);

    ImageRgba8::from_raw(width, height, data)
}

/// Load and decode one resolved image file.
///
/// Any IO or decoder failure is surfaced as
/// [`LaminateError::UnreadableImage`] for that path.
pub fn load_layer(path: &Path) -> LaminateResult<ImageRgba8> {
    let bytes = std::fs::read(path).map_err(|e| LaminateError::unreadable(path, e))?;
    decode_layer(&bytes).map_err(|e| LaminateError::unreadable(path, format!("{e:#}")))
}

/// Read an image's pixel dimensions from its header without decoding pixels.
pub fn probe_resolution(path: &Path) -> LaminateResult<Resolution> {
    let (width, height) =
        image::image_dimensions(path).map_err(|e| LaminateError::unreadable(path, e))?;
    Ok(Resolution { width, height })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
