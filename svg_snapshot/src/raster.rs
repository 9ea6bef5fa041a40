// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster comparison of SVG markup.
//!
//! Markup is rendered with `resvg` into a [`kompari::Image`]. Identical renders are caught by
//! [`kompari::compare_images`]; otherwise, unless strict, two renders of the same size are equal
//! when every pixel pair is within the CIE76 ΔE tolerance (after compositing over white).

use std::sync::{Arc, OnceLock};

use kompari::image::{ImageBuffer, Rgba};
use kompari::{Image, ImageDifference, SizeOptimizationLevel, compare_images, image_to_png};
use resvg::usvg::fontdb;
use resvg::{tiny_skia, usvg};

use crate::compare::{CompareOptions, VisualComparator};
use crate::error::ComparatorError;

/// A [`VisualComparator`] that renders SVG with `resvg`.
#[derive(Copy, Clone, Debug, Default)]
pub struct RasterComparator;

impl RasterComparator {
    /// Renders `markup` to an unpremultiplied RGBA image.
    pub fn rasterize(&self, markup: &[u8]) -> Result<Image, ComparatorError> {
        rasterize("current", markup)
    }
}

impl VisualComparator for RasterComparator {
    fn looks_same(
        &self,
        current: &[u8],
        reference: &[u8],
        options: &CompareOptions,
    ) -> Result<bool, ComparatorError> {
        let current = rasterize("current", current)?;
        let reference = rasterize("reference", reference)?;

        if matches!(compare_images(&reference, &current), ImageDifference::None) {
            return Ok(true);
        }
        if options.strict || reference.dimensions() != current.dimensions() {
            return Ok(false);
        }
        Ok(reference
            .pixels()
            .zip(current.pixels())
            .all(|(r, c)| delta_e(r.0, c.0) <= options.tolerance))
    }

    fn create_diff(
        &self,
        reference: &[u8],
        current: &[u8],
        options: &CompareOptions,
    ) -> Result<Vec<u8>, ComparatorError> {
        let reference = rasterize("reference", reference)?;
        let current = rasterize("current", current)?;
        let diff = diff_image(&reference, &current, options);
        Ok(image_to_png(&diff, SizeOptimizationLevel::Fast))
    }
}

/// Builds the diff over the union of both canvases.
///
/// Pixels outside either canvas, or further apart than the tolerance, get the highlight color.
/// All others show the reference.
fn diff_image(reference: &Image, current: &Image, options: &CompareOptions) -> Image {
    let (rw, rh) = reference.dimensions();
    let (cw, ch) = current.dimensions();
    let highlight = Rgba(options.highlight_color);

    ImageBuffer::from_fn(rw.max(cw), rh.max(ch), |x, y| {
        if x >= rw || y >= rh || x >= cw || y >= ch {
            return highlight;
        }
        let r = reference.get_pixel(x, y);
        let c = current.get_pixel(x, y);
        let same = if options.strict {
            r == c
        } else {
            delta_e(r.0, c.0) <= options.tolerance
        };
        if same { *r } else { highlight }
    })
}

fn font_database() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            Arc::new(db)
        })
        .clone()
}

fn rasterize(which: &'static str, markup: &[u8]) -> Result<Image, ComparatorError> {
    let mut opt = usvg::Options::default();
    opt.fontdb = font_database();
    let tree = usvg::Tree::from_data(markup, &opt).map_err(|e| ComparatorError::Parse {
        which,
        message: e.to_string(),
    })?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(ComparatorError::EmptyCanvas {
        which,
        width,
        height,
    })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    ImageBuffer::from_raw(width, height, rgba).ok_or_else(|| {
        ComparatorError::Image(format!("{which} render does not fill a {width}x{height} canvas"))
    })
}

/// CIE76 color distance between two RGBA pixels, each composited over white.
fn delta_e(a: [u8; 4], b: [u8; 4]) -> f32 {
    let (a, b) = (lab(a), lab(b));
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

fn lab([r, g, b, a]: [u8; 4]) -> [f32; 3] {
    let alpha = f32::from(a) / 255.0;
    let linear = |c: u8| {
        let c = f32::from(c) / 255.0 * alpha + (1.0 - alpha);
        if c <= 0.040_45 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    let (r, g, b) = (linear(r), linear(g), linear(b));

    // sRGB -> XYZ (D65), normalized by the reference white.
    let x = (0.4124 * r + 0.3576 * g + 0.1805 * b) / 0.950_47;
    let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    let z = (0.0193 * r + 0.1192 * g + 0.9505 * b) / 1.088_83;

    let f = |t: f32| {
        if t > 0.008_856 {
            t.cbrt()
        } else {
            7.787 * t + 16.0 / 116.0
        }
    };
    let (fx, fy, fz) = (f(x), f(y), f(z));
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}
