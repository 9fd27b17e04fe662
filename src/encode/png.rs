use std::io::Cursor;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{WalliError, WalliResult};

/// Convert premultiplied RGBA8 to straight alpha in place. Fully transparent pixels become zero.
pub(crate) fn unpremultiply_rgba8(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            let v = (u16::from(*c) * 255 + a / 2) / a;
            *c = v.min(255) as u8;
        }
    }
}

/// Encode straight-alpha RGBA8 pixels as a PNG file in memory.
pub fn encode_png(size: PixelSize, straight_rgba: Vec<u8>) -> WalliResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(size.width, size.height, straight_rgba).ok_or_else(
        || WalliError::serialization(format!("pixel buffer does not match {size}")),
    )?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| WalliError::serialization(format!("png encode failed: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
