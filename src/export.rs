//! Pixel effects applied to the captured screenshot when exporting.
//!
//! Vector shapes render through a [`crate::surface::Surface`]. Blur regions
//! need the pixels underneath, so they are applied to the image itself.

use image::{RgbaImage, imageops};
use log::debug;

use crate::geometry::BoundingBox;
use crate::shape::{Geometry, Shape};

/// Blur the pixels under every blur shape, in z-order. Regions are clipped to
/// the image; regions entirely outside it are ignored. Returns how many
/// regions were applied.
pub fn apply_blur_regions<'a>(
    image: &mut RgbaImage,
    shapes: impl IntoIterator<Item = &'a Shape>,
) -> usize {
    let mut applied = 0;

    for shape in shapes {
        let Geometry::Blur(region) = shape.geometry() else {
            continue;
        };
        if region.radius <= 0.0 {
            continue;
        }
        let Some((x, y, width, height)) = clip_to_image(&shape.bounds(), image) else {
            continue;
        };

        let patch = imageops::crop_imm(&*image, x, y, width, height).to_image();
        let blurred = imageops::blur(&patch, region.radius);
        imageops::replace(image, &blurred, i64::from(x), i64::from(y));
        debug!("Blurred {width}x{height} region at ({x}, {y}) for shape {}", shape.id());
        applied += 1;
    }

    applied
}

/// Pixel rectangle covered by `bounds`, clipped to the image.
fn clip_to_image(bounds: &BoundingBox, image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let (image_w, image_h) = (image.width() as f32, image.height() as f32);
    let x0 = bounds.x.floor().clamp(0.0, image_w);
    let y0 = bounds.y.floor().clamp(0.0, image_h);
    let x1 = (bounds.x + bounds.width).ceil().clamp(0.0, image_w);
    let y1 = (bounds.y + bounds.height).ceil().clamp(0.0, image_h);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
}
