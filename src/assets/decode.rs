use std::path::Path;

use crate::assets::source::{SourceImage, premultiply_rgba8_in_place};
use crate::foundation::error::{WalliError, WalliResult};

/// Decode encoded image bytes into a premultiplied [`SourceImage`].
///
/// Bytes that are not a recognised raster format are rejected before decoding is attempted.
pub fn decode_source_image(bytes: &[u8]) -> WalliResult<SourceImage> {
    let format = image::guess_format(bytes)
        .map_err(|_| WalliError::decode("file is not a recognised image format"))?;
    let dyn_img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| WalliError::decode(format!("decode {format:?} image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    tracing::debug!(width, height, ?format, "decoded source image");
    SourceImage::from_premul_rgba8(width, height, rgba8_premul)
}

/// Read and decode an image file.
pub fn decode_source_image_path(path: impl AsRef<Path>) -> WalliResult<SourceImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| WalliError::decode(format!("read image '{}': {e}", path.display())))?;
    decode_source_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
