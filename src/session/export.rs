use std::path::{Path, PathBuf};

use crate::assets::source::SourceImage;
use crate::encode::png::encode_png;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{WalliError, WalliResult};
use crate::render::compositor::{Compositor, RenderReport};
use crate::render::target::Surface;
use crate::scene::style::StyleParameters;

/// Largest export surface the driver will allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLimits {
    /// Maximum width and height in pixels.
    pub max_side: u32,
    /// Maximum `width * height`.
    pub max_pixels: u64,
}

impl Default for ExportLimits {
    fn default() -> Self {
        Self {
            max_side: 16_384,
            max_pixels: 268_435_456,
        }
    }
}

impl ExportLimits {
    /// Reject sizes outside the limits. Empty sizes are rejected too.
    pub fn check(&self, size: PixelSize) -> WalliResult<()> {
        if size.is_empty() {
            return Err(WalliError::export_rejected(format!(
                "canvas {size} has no pixels"
            )));
        }
        if size.width > self.max_side || size.height > self.max_side {
            return Err(WalliError::export_rejected(format!(
                "canvas {size} exceeds {} px per side",
                self.max_side
            )));
        }
        if size.area() > self.max_pixels {
            return Err(WalliError::export_rejected(format!(
                "canvas {size} exceeds {} pixels",
                self.max_pixels
            )));
        }
        Ok(())
    }
}

/// Download name for an export of `style`, e.g. `Walli-image-1080x1350-r12-b4-watermarked.png`.
pub fn export_file_name(style: &StyleParameters) -> String {
    let mut name = format!(
        "Walli-image-{}x{}",
        style.canvas_size.width, style.canvas_size.height
    );
    if style.border_radius_percent > 0 {
        name.push_str(&format!("-r{}", style.border_radius_percent));
    }
    if style.border.is_active() {
        name.push_str(&format!("-b{}", style.border.width_px));
    }
    if style.watermark.is_active() {
        name.push_str("-watermarked");
    }
    name.push_str(".png");
    name
}

/// A rendered and encoded export.
#[derive(Debug)]
pub struct ExportedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
    /// What the compositor drew.
    pub report: RenderReport,
}

impl ExportedImage {
    /// Write the PNG as `dir/file_name`, creating `dir` if needed.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> WalliResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            WalliError::serialization(format!("create output dir '{}': {e}", dir.display()))
        })?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png).map_err(|e| {
            WalliError::serialization(format!("write '{}': {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), bytes = self.png.len(), "saved export");
        Ok(path)
    }
}

/// Renders the full-resolution composition and serializes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportDriver {
    limits: ExportLimits,
}

impl ExportDriver {
    pub fn new(limits: ExportLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ExportLimits {
        self.limits
    }

    /// Render `style` at scale 1 into a fresh canvas-sized surface and encode it as PNG.
    ///
    /// Oversized canvases are rejected before any surface is allocated.
    #[tracing::instrument(skip_all, fields(canvas = %style.canvas_size))]
    pub fn export(
        &self,
        compositor: &mut Compositor,
        style: &StyleParameters,
        image: Option<&SourceImage>,
    ) -> WalliResult<ExportedImage> {
        let size = style.canvas_size;
        if let Err(e) = self.limits.check(size) {
            tracing::warn!(error = %e, "export rejected");
            return Err(e);
        }

        let mut surface = Surface::new(size)?;
        let report = compositor.render(&mut surface, style, image, 1.0);
        let png = encode_png(size, surface.to_straight_rgba8())?;

        let file_name = export_file_name(style);
        tracing::info!(file_name, bytes = png.len(), "exported");
        Ok(ExportedImage {
            file_name,
            width: size.width,
            height: size.height,
            png,
            report,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/export.rs"]
mod tests;
