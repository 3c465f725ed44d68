use crate::compose::blend;
use crate::foundation::core::{ImageRgba8, Opacity};
use crate::foundation::error::{LaminateError, LaminateResult};

/// One contributing layer of an output group.
#[derive(Clone, Debug)]
pub struct StackLayer {
    /// Decoded premultiplied pixels for this layer.
    pub image: ImageRgba8,
    /// Opacity of the slot this layer was drawn from.
    pub opacity: Opacity,
}

/// Flatten the contributing layers of one output group.
///
/// `layers` is ordered top-first (the configured slot order). Painting runs
/// in reverse: the last layer goes down first and layer 0 is painted last,
/// so layer 0 occludes everything beneath it. This reversed iteration is the
/// stacking-order contract and must hold exactly.
///
/// A single layer yields that layer with its opacity applied; painting onto
/// the transparent canvas returns the opacity-scaled source unchanged.
pub fn composite_stack(layers: &[StackLayer]) -> LaminateResult<ImageRgba8> {
    let Some(first) = layers.first() else {
        return Err(LaminateError::validation(
            "composite_stack expects at least one layer",
        ));
    };
    let resolution = first.image.resolution();
    let mut combined = ImageRgba8::transparent(resolution);

    for layer in layers.iter().rev() {
        if layer.image.resolution() != resolution {
            return Err(LaminateError::validation(format!(
                "layer resolution {} does not match group resolution {resolution}",
                layer.image.resolution()
            )));
        }
        blend::over_in_place(&mut combined.data, &layer.image.data, layer.opacity.fraction())?;
    }

    Ok(combined)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/stack.rs"]
mod tests;
