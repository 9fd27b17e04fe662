use crate::assets::source::SourceImage;
use crate::foundation::error::{WalliError, WalliResult};
use crate::layout::scale::{PreviewOpts, PreviewScale, resolve_preview_scale};
use crate::render::compositor::{Compositor, RenderReport};
use crate::render::target::Surface;
use crate::scene::style::StyleParameters;

/// Outcome of [`PreviewDriver::refresh`].
#[derive(Debug)]
pub enum PreviewStatus {
    /// The preview surface was redrawn.
    Redrawn(RenderReport),
    /// Nothing changed since the last redraw.
    Unchanged,
}

impl PreviewStatus {
    pub fn was_redrawn(&self) -> bool {
        matches!(self, Self::Redrawn(_))
    }
}

/// Keeps a small on-screen surface in sync with the style and image.
///
/// The surface is sized by [`resolve_preview_scale`] from the export canvas size; every redraw
/// goes through the shared [`Compositor`] at the resolved scale factor.
#[derive(Debug)]
pub struct PreviewDriver {
    opts: PreviewOpts,
    scale: Option<PreviewScale>,
    surface: Option<Surface>,
    last_fingerprint: Option<u64>,
}

impl Default for PreviewDriver {
    fn default() -> Self {
        Self::new(PreviewOpts::default())
    }
}

impl PreviewDriver {
    pub fn new(opts: PreviewOpts) -> Self {
        Self {
            opts,
            scale: None,
            surface: None,
            last_fingerprint: None,
        }
    }

    pub fn opts(&self) -> PreviewOpts {
        self.opts
    }

    /// Current preview size and scale factor, once a refresh has run.
    pub fn scale(&self) -> Option<PreviewScale> {
        self.scale
    }

    /// The preview pixels, once a refresh has run.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Force the next refresh to redraw.
    pub fn invalidate(&mut self) {
        self.last_fingerprint = None;
    }

    /// Redraw the preview if the style, image or resolved scale changed since the last call.
    pub fn refresh(
        &mut self,
        compositor: &mut Compositor,
        style: &StyleParameters,
        image: Option<&SourceImage>,
    ) -> WalliResult<PreviewStatus> {
        let scale = resolve_preview_scale(style.canvas_size, self.opts);
        if self.scale != Some(scale) || self.surface.is_none() {
            tracing::debug!(
                canvas = %style.canvas_size,
                preview = %scale.preview_size,
                scale_factor = scale.scale_factor,
                "resized preview surface"
            );
            self.surface = Some(Surface::new(scale.preview_size)?);
            self.scale = Some(scale);
            self.last_fingerprint = None;
        }

        let fingerprint = preview_fingerprint(style, image, scale.scale_factor)?;
        if self.last_fingerprint == Some(fingerprint) {
            return Ok(PreviewStatus::Unchanged);
        }

        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| WalliError::render("preview surface missing"))?;
        let report = compositor.render(surface, style, image, scale.scale_factor);
        self.last_fingerprint = Some(fingerprint);
        Ok(PreviewStatus::Redrawn(report))
    }
}

/// Hash of everything a preview frame depends on.
pub(crate) fn preview_fingerprint(
    style: &StyleParameters,
    image: Option<&SourceImage>,
    scale_factor: f64,
) -> WalliResult<u64> {
    let mut bytes = serde_json::to_vec(style).map_err(|e| WalliError::serde(e.to_string()))?;
    match image {
        Some(img) => {
            bytes.push(1);
            bytes.extend_from_slice(&img.fingerprint().to_le_bytes());
        }
        None => bytes.push(0),
    }
    bytes.extend_from_slice(&scale_factor.to_bits().to_le_bytes());
    Ok(xxhash_rust::xxh3::xxh3_64(&bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
