#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PNG heatmap rendering of AQI prediction grids.
//!
//! A pure sink: consumes a row-major prediction grid and writes a PNG
//! where each cell is colored by its (clamped) AQI band. Row 0 of the
//! grid is the southernmost latitude and lands at the bottom of the
//! image, so north is up.

use std::path::Path;

use aqi_map_aqi_models::AqiCategory;
use image::{Rgb, RgbImage};

/// Errors from rendering a heatmap.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Prediction count does not match the grid dimensions.
    #[error("Shape error: {message}")]
    Shape {
        /// Description of the mismatch.
        message: String,
    },

    /// PNG encoding or file writing failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders a prediction grid as a PNG heatmap.
///
/// `values` is row-major with `rows × cols` entries; each cell becomes a
/// `cell_px × cell_px` block colored by the clamped AQI band of its
/// value. Out-of-range predictions are clamped for coloring only — the
/// statistics side tallies them separately.
///
/// # Errors
///
/// Returns [`RenderError`] if `values.len() != rows * cols`, if either
/// dimension is zero, or if encoding/writing the PNG fails.
pub fn render_heatmap(
    values: &[f64],
    rows: usize,
    cols: usize,
    cell_px: u32,
    path: &Path,
) -> Result<(), RenderError> {
    if rows == 0 || cols == 0 || cell_px == 0 {
        return Err(RenderError::Shape {
            message: format!("degenerate dimensions {rows}x{cols} at {cell_px}px per cell"),
        });
    }
    if values.len() != rows * cols {
        return Err(RenderError::Shape {
            message: format!(
                "{} predictions for a {rows}x{cols} grid",
                values.len()
            ),
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    let (rows_u32, cols_u32) = (rows as u32, cols as u32);
    let mut img = RgbImage::new(cols_u32 * cell_px, rows_u32 * cell_px);

    for r in 0..rows {
        for c in 0..cols {
            let value = values[r * cols + c];
            let color = Rgb(AqiCategory::classify_clamped(value).color_rgb());
            // Grid row 0 is the southern edge; image y grows downward.
            #[allow(clippy::cast_possible_truncation)]
            let base_y = (rows - 1 - r) as u32 * cell_px;
            #[allow(clippy::cast_possible_truncation)]
            let base_x = c as u32 * cell_px;
            for dy in 0..cell_px {
                for dx in 0..cell_px {
                    img.put_pixel(base_x + dx, base_y + dy, color);
                }
            }
        }
    }

    img.save(path)?;
    log::info!(
        "Wrote {}x{} heatmap ({} cells) to {}",
        img.width(),
        img.height(),
        rows * cols,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_png_with_expected_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");

        let values = vec![25.0; 12];
        render_heatmap(&values, 3, 4, 5, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.width(), 20);
        assert_eq!(img.height(), 15);
        // All Good-band cells: EPA green.
        assert_eq!(img.get_pixel(0, 0), &Rgb([0x00, 0xE4, 0x00]));
    }

    #[test]
    fn south_row_lands_at_the_image_bottom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");

        // Row 0 (south) Good, row 1 (north) Hazardous.
        let values = vec![25.0, 25.0, 350.0, 350.0];
        render_heatmap(&values, 2, 2, 1, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 1), &Rgb([0x00, 0xE4, 0x00]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0x7E, 0x00, 0x23]));
    }

    #[test]
    fn out_of_range_values_are_clamped_for_coloring() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");

        let values = vec![-10.0, 900.0];
        render_heatmap(&values, 1, 2, 1, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 0), &Rgb([0x00, 0xE4, 0x00]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0x7E, 0x00, 0x23]));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");
        assert!(matches!(
            render_heatmap(&[1.0, 2.0, 3.0], 2, 2, 1, &path),
            Err(RenderError::Shape { .. })
        ));
        assert!(matches!(
            render_heatmap(&[], 0, 0, 1, &path),
            Err(RenderError::Shape { .. })
        ));
        assert!(!path.exists());
    }
}
