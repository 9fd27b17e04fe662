use crate::encode::png::unpremultiply_rgba8;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{WalliError, WalliResult};

/// A raster surface of known pixel size the compositor can draw into.
///
/// The compositor overwrites every pixel on each render and owns the target exclusively for
/// the duration of the call.
pub trait RenderTarget {
    /// Pixel dimensions of the surface.
    fn pixel_size(&self) -> PixelSize;

    /// Backing premultiplied RGBA8 pixmap.
    fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap;
}

/// Owned premultiplied RGBA8 surface.
pub struct Surface {
    size: PixelSize,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface").field("size", &self.size).finish()
    }
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(size: PixelSize) -> WalliResult<Self> {
        if size.is_empty() {
            return Err(WalliError::render(format!(
                "cannot allocate empty surface {size}"
            )));
        }
        let (w, h) = size.to_u16()?;
        Ok(Self {
            size,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Pixel dimensions.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn premul_rgba8(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied RGBA8 value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let d = self.premul_rgba8();
        Some([d[idx], d[idx + 1], d[idx + 2], d[idx + 3]])
    }

    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.premul_rgba8().to_vec();
        unpremultiply_rgba8(&mut out);
        out
    }
}

impl RenderTarget for Surface {
    fn pixel_size(&self) -> PixelSize {
        self.size
    }

    fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/target.rs"]
mod tests;
