//! Walli places an image on a solid-color canvas and renders it with rounded corners, a border,
//! a drop shadow and a text watermark.
//!
//! One [`Compositor`] draws both the small live preview and the full-resolution export. The two
//! differ only in the scale factor handed to [`Compositor::render`], so they always show the
//! same composition:
//!
//! - Load a [`StyleParameters`] snapshot (JSON or built in code)
//! - Decode the source image with [`decode_source_image`]
//! - Keep a preview current with [`PreviewDriver`], or export a PNG with [`ExportDriver`]
#![forbid(unsafe_code)]

mod foundation;

/// Source images, colors and fonts.
pub mod assets;
/// Shadow blur and watermark text.
pub mod effects;
/// PNG serialization.
pub mod encode;
/// Block geometry and preview scaling.
pub mod layout;
/// Raster targets and the compositor.
pub mod render;
pub mod scene;
pub mod session;

pub use crate::foundation::core::{BezPath, PixelSize, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{WalliError, WalliResult};

pub use crate::assets::color::{RgbaColor, hex_to_rgba, is_valid_hex};
pub use crate::assets::decode::{decode_source_image, decode_source_image_path};
pub use crate::assets::fonts::{FontLibrary, ResolvedFont};
pub use crate::assets::source::{DecodeTicket, ImageSlot, SlotEvent, SourceImage};
pub use crate::effects::watermark::{WatermarkPlacement, watermark_placement};
pub use crate::layout::geometry::{Layout, layout_rects, rounded_rect_path};
pub use crate::layout::scale::{PreviewOpts, PreviewScale, resolve_preview_scale};
pub use crate::render::compositor::{Compositor, Pass, PassFailure, RenderReport};
pub use crate::render::target::{RenderTarget, Surface};
pub use crate::scene::presets::{DIMENSION_PRESETS, DimensionPreset, apply_aspect_ratio};
pub use crate::scene::style::{
    BorderStyle, ShadowStyle, StyleParameters, WatermarkPosition, WatermarkStyle,
};
pub use crate::scene::validate::{FieldError, FieldErrors, StyleEditor, validate_style};
pub use crate::session::export::{ExportDriver, ExportLimits, ExportedImage, export_file_name};
pub use crate::session::preview::{PreviewDriver, PreviewStatus};
