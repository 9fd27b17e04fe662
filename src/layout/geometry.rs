use crate::foundation::core::{BezPath, Point, Rect, Size};
use crate::scene::style::StyleParameters;

/// Cubic control-point distance for a quarter circle of unit radius.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Closed rounded-rectangle outline in the caller's pixel space.
///
/// Negative or NaN sizes clamp to zero and `radius` clamps into `[0, min(w, h) / 2]`, so an
/// oversized radius yields a pill or circle, never an overshoot. With a zero radius or a zero
/// side the outline is the plain rectangle. Otherwise the path starts on the top edge just right
/// of the top-left corner and runs clockwise (in y-down space) through four quarter arcs.
pub fn rounded_rect_path(x: f64, y: f64, width: f64, height: f64, radius: f64) -> BezPath {
    let w = width.max(0.0);
    let h = height.max(0.0);
    let r = radius.max(0.0).min(w.min(h) / 2.0);

    let mut p = BezPath::new();
    if r == 0.0 || w == 0.0 || h == 0.0 {
        p.move_to((x, y));
        p.line_to((x + w, y));
        p.line_to((x + w, y + h));
        p.line_to((x, y + h));
        p.close_path();
        return p;
    }

    let k = r * KAPPA;
    let (x1, y1) = (x + w, y + h);

    p.move_to((x + r, y));
    p.line_to((x1 - r, y));
    p.curve_to((x1 - r + k, y), (x1, y + r - k), (x1, y + r));
    p.line_to((x1, y1 - r));
    p.curve_to((x1, y1 - r + k), (x1 - r + k, y1), (x1 - r, y1));
    p.line_to((x + r, y1));
    p.curve_to((x + r - k, y1), (x, y1 - r + k), (x, y1 - r));
    p.line_to((x, y + r));
    p.curve_to((x, y + r - k), (x + r - k, y), (x + r, y));
    p.close_path();
    p
}

/// Placement of the bordered image block inside a render target, in target pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Source size times `imageScale` times the scale factor.
    pub scaled_image_size: Size,
    /// Border width in target pixels; zero when the border is disabled.
    pub effective_border_width: f64,
    /// Image plus border on both sides.
    pub total_size: Size,
    /// Top-left of the bordered block.
    pub outer_origin: Point,
    /// Top-left of the image itself.
    pub image_origin: Point,
    /// Corner radius of the image clip.
    pub inner_radius: f64,
    /// Corner radius of the bordered block.
    pub outer_radius: f64,
}

impl Layout {
    /// Bordered block rectangle.
    pub fn outer_rect(&self) -> Rect {
        Rect::from_origin_size(self.outer_origin, self.total_size)
    }

    /// Image rectangle.
    pub fn image_rect(&self) -> Rect {
        Rect::from_origin_size(self.image_origin, self.scaled_image_size)
    }

    /// Outline used by the shadow and border passes.
    pub fn outer_path(&self) -> BezPath {
        rounded_rect_path(
            self.outer_origin.x,
            self.outer_origin.y,
            self.total_size.width,
            self.total_size.height,
            self.outer_radius,
        )
    }

    /// Outline used to clip the image.
    pub fn inner_path(&self) -> BezPath {
        rounded_rect_path(
            self.image_origin.x,
            self.image_origin.y,
            self.scaled_image_size.width,
            self.scaled_image_size.height,
            self.inner_radius,
        )
    }

    /// `true` when the image has a positive area to draw.
    pub fn has_image_area(&self) -> bool {
        self.scaled_image_size.width > 0.0 && self.scaled_image_size.height > 0.0
    }
}

/// Compute the block placement for `style` rendered at `scale_factor` into a target of
/// `canvas_pixel_size`.
///
/// Every linear style quantity is multiplied by `scale_factor`; the preview and export paths
/// both call this, so they cannot disagree on geometry.
pub fn layout_rects(
    style: &StyleParameters,
    scale_factor: f64,
    source_natural_size: Size,
    canvas_pixel_size: Size,
) -> Layout {
    let scaled_image_size = Size::new(
        source_natural_size.width * style.image_scale * scale_factor,
        source_natural_size.height * style.image_scale * scale_factor,
    );
    let effective_border_width = if style.border.enabled {
        (style.border.width_px * scale_factor).max(0.0)
    } else {
        0.0
    };
    let total_size = Size::new(
        scaled_image_size.width + 2.0 * effective_border_width,
        scaled_image_size.height + 2.0 * effective_border_width,
    );
    let outer_origin = Point::new(
        (canvas_pixel_size.width - total_size.width) / 2.0 + style.image_offset.x * scale_factor,
        (canvas_pixel_size.height - total_size.height) / 2.0 + style.image_offset.y * scale_factor,
    );
    let image_origin = Point::new(
        outer_origin.x + effective_border_width,
        outer_origin.y + effective_border_width,
    );

    let shorter = scaled_image_size.width.min(scaled_image_size.height);
    let inner_radius = if scaled_image_size.width <= 0.0 || scaled_image_size.height <= 0.0 {
        0.0
    } else {
        shorter * f64::from(style.border_radius_percent) / 100.0
    };

    Layout {
        scaled_image_size,
        effective_border_width,
        total_size,
        outer_origin,
        image_origin,
        inner_radius,
        outer_radius: inner_radius + effective_border_width,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
