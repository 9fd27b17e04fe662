use std::fmt;

use crate::foundation::core::{PixelSize, Size};
use crate::foundation::error::{WalliError, WalliResult};
use crate::render::cpu::{image_paint, pixmap_from_premul_bytes};

/// Immutably decoded raster the compositor draws from.
///
/// Cloning is cheap: pixel storage is shared behind an `Arc`.
#[derive(Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    fingerprint: u64,
    paint: vello_cpu::Image,
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fingerprint", &format_args!("{:016x}", self.fingerprint))
            .finish()
    }
}

impl SourceImage {
    /// Build from tightly packed, row-major, straight-alpha RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> WalliResult<Self> {
        premultiply_rgba8_in_place(&mut rgba);
        Self::from_premul_rgba8(width, height, rgba)
    }

    pub(crate) fn from_premul_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> WalliResult<Self> {
        if width == 0 || height == 0 {
            return Err(WalliError::decode("image has zero width or height"));
        }
        let mut fingerprint_input = Vec::with_capacity(rgba.len() + 8);
        fingerprint_input.extend_from_slice(&width.to_le_bytes());
        fingerprint_input.extend_from_slice(&height.to_le_bytes());
        fingerprint_input.extend_from_slice(&rgba);
        let fingerprint = xxhash_rust::xxh3::xxh3_64(&fingerprint_input);

        let pixmap = pixmap_from_premul_bytes(&rgba, width, height)
            .map_err(|e| WalliError::decode(format!("image too large for raster backend: {e}")))?;
        let paint = image_paint(pixmap);

        Ok(Self {
            width,
            height,
            fingerprint,
            paint,
        })
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Natural pixel dimensions.
    pub fn pixel_size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Natural dimensions as floating-point geometry.
    pub fn natural_size(&self) -> Size {
        self.pixel_size().to_size()
    }

    /// Content hash of dimensions and pixels.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub(crate) fn paint(&self) -> vello_cpu::Image {
        self.paint.clone()
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
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

/// Proof that a decode was started; only the most recent ticket may commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeTicket {
    generation: u64,
}

/// What happened when a decode result was handed back to the slot.
#[derive(Debug)]
pub enum SlotEvent {
    /// The decoded image replaced the current one.
    Committed,
    /// The ticket was superseded by a newer upload or a clear; the result was dropped.
    Stale,
    /// Decoding failed; the previous image was cleared.
    Failed(WalliError),
}

/// Owner of the currently committed [`SourceImage`] and the single in-flight decode.
///
/// Every upload or clear bumps a generation counter. A decode finishing with an older ticket is
/// discarded without touching state, so a slow decode can never overwrite a newer choice.
#[derive(Debug, Default)]
pub struct ImageSlot {
    generation: u64,
    pending: Option<u64>,
    current: Option<SourceImage>,
}

impl ImageSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new upload, superseding any decode still in flight.
    pub fn begin_upload(&mut self) -> DecodeTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        DecodeTicket {
            generation: self.generation,
        }
    }

    /// Hand back the outcome of the decode started with `ticket`.
    pub fn finish(&mut self, ticket: DecodeTicket, result: WalliResult<SourceImage>) -> SlotEvent {
        if self.pending != Some(ticket.generation) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale decode"
            );
            return SlotEvent::Stale;
        }
        self.pending = None;
        match result {
            Ok(img) => {
                tracing::info!(width = img.width(), height = img.height(), "image committed");
                self.current = Some(img);
                SlotEvent::Committed
            }
            Err(err) => {
                tracing::warn!(error = %err, "image decode failed; clearing image");
                self.current = None;
                SlotEvent::Failed(err)
            }
        }
    }

    /// Decode `bytes` synchronously through the ticket protocol.
    pub fn upload(&mut self, bytes: &[u8]) -> SlotEvent {
        let ticket = self.begin_upload();
        let result = crate::assets::decode::decode_source_image(bytes);
        self.finish(ticket, result)
    }

    /// Drop the image and invalidate any decode in flight.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.current = None;
    }

    /// The committed image, if any.
    pub fn current(&self) -> Option<&SourceImage> {
        self.current.as_ref()
    }

    /// `true` while a decode ticket is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
