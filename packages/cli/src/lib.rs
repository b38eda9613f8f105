#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Heatmap generation runs.
//!
//! Wires the pipeline end to end for the two supported configurations:
//! grid build → feature synthesis → prediction (model or fallback) →
//! statistics → PNG render. Each run is single-threaded and synchronous;
//! all state is created fresh per invocation and discarded afterwards.

use std::path::{Path, PathBuf};

use aqi_map_analytics::GridSummary;
use aqi_map_features::cities::MAJOR_CITIES;
use aqi_map_features::{synthesize_regional, synthesize_world};
use aqi_map_grid::{BoundingBox, GeoPoint, Grid};
use aqi_map_predict::{
    AqiModel, KnnModel, PredictionTier, REGIONAL_FALLBACK, WORLD_FALLBACK, load_knn_model,
};
use rand::SeedableRng as _;
use rand::rngs::StdRng;

/// Demonstration bounding box: the Dallas-Fort Worth area.
pub const DALLAS_BBOX: BoundingBox = BoundingBox::new(32.5, 33.0, -97.2, -96.5);

/// Dallas city center, the regional pipeline's reference point.
pub const DALLAS_CENTER: GeoPoint = GeoPoint::new(32.7767, -96.7970);

/// Default seed for the regional pipeline, for reproducible output.
pub const DEFAULT_REGIONAL_SEED: u64 = 42;

/// Options for a regional heatmap run.
#[derive(Debug, Clone)]
pub struct RegionalOptions {
    /// Grid resolution; the grid is `grid_size × grid_size`.
    pub grid_size: usize,
    /// Optional path to a KNN model artifact.
    pub model_path: Option<PathBuf>,
    /// Output PNG path.
    pub output: PathBuf,
    /// Optional path for a JSON statistics file.
    pub stats_output: Option<PathBuf>,
    /// PRNG seed.
    pub seed: u64,
    /// Rendered pixels per grid cell.
    pub cell_px: u32,
}

/// Options for a world heatmap run.
#[derive(Debug, Clone)]
pub struct WorldOptions {
    /// Longitude resolution; latitude gets `grid_size / 2` samples so the
    /// degree spacing stays approximately equal on both axes.
    pub grid_size: usize,
    /// Optional path to a KNN model artifact.
    pub model_path: Option<PathBuf>,
    /// Output PNG path.
    pub output: PathBuf,
    /// Optional path for a JSON statistics file.
    pub stats_output: Option<PathBuf>,
    /// Optional PRNG seed; unseeded runs draw from entropy.
    pub seed: Option<u64>,
    /// Rendered pixels per grid cell.
    pub cell_px: u32,
}

/// Runs the regional pipeline end to end and returns the statistics.
///
/// # Errors
///
/// Returns an error if rendering or writing output files fails. Model
/// load/prediction failures are absorbed by the fallback tiers.
pub fn run_regional(options: &RegionalOptions) -> Result<GridSummary, Box<dyn std::error::Error>> {
    log::info!(
        "Generating regional heatmap: {0}x{0} grid over Dallas-Fort Worth",
        options.grid_size
    );

    let grid = Grid::build(&DALLAS_BBOX, options.grid_size, options.grid_size);
    let model = try_load_model(options.model_path.as_deref());
    let mut rng = StdRng::seed_from_u64(options.seed);

    let features = synthesize_regional(&grid, DALLAS_CENTER, &mut rng);
    let outcome = aqi_map_predict::predict_with_fallback(
        model.as_ref().map(|m| m as &dyn AqiModel),
        &REGIONAL_FALLBACK,
        &features,
        &mut rng,
    );
    report_tier(outcome.tier);

    let summary = aqi_map_analytics::aggregate(&outcome.values);
    aqi_map_render::render_heatmap(
        &outcome.values,
        grid.rows(),
        grid.cols(),
        options.cell_px,
        &options.output,
    )?;
    finish_run(&summary, options.stats_output.as_deref())?;
    Ok(summary)
}

/// Runs the world pipeline end to end and returns the statistics.
///
/// # Errors
///
/// Returns an error if rendering or writing output files fails. Model
/// load/prediction failures are absorbed by the fallback tiers.
pub fn run_world(options: &WorldOptions) -> Result<GridSummary, Box<dyn std::error::Error>> {
    let cols = options.grid_size;
    let rows = (cols / 2).max(1);
    log::info!("Generating world heatmap: {rows}x{cols} grid");

    let grid = Grid::build(&BoundingBox::WORLD, rows, cols);
    let model = try_load_model(options.model_path.as_deref());
    let mut rng = options
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let features = synthesize_world(&grid, MAJOR_CITIES, &mut rng);
    let outcome = aqi_map_predict::predict_with_fallback(
        model.as_ref().map(|m| m as &dyn AqiModel),
        &WORLD_FALLBACK,
        &features,
        &mut rng,
    );
    report_tier(outcome.tier);

    let summary = aqi_map_analytics::aggregate(&outcome.values);
    aqi_map_render::render_heatmap(
        &outcome.values,
        grid.rows(),
        grid.cols(),
        options.cell_px,
        &options.output,
    )?;
    finish_run(&summary, options.stats_output.as_deref())?;
    Ok(summary)
}

/// Loads the model artifact if a path was supplied; any failure demotes
/// the run to the fallback formula rather than aborting.
fn try_load_model(path: Option<&Path>) -> Option<KnnModel> {
    let path = path?;
    match load_knn_model(path) {
        Ok(model) => Some(model),
        Err(err) => {
            log::warn!("Could not load model from {}: {err}", path.display());
            None
        }
    }
}

/// Surfaces the prediction fidelity tier in the run log.
fn report_tier(tier: PredictionTier) {
    match tier {
        PredictionTier::Model => log::info!("Predictions produced by the loaded model"),
        PredictionTier::Formula => log::info!("Predictions produced by the fallback formula"),
        PredictionTier::Degraded => {
            log::warn!("Predictions are placeholder values, not derived from features");
        }
    }
}

/// Logs the summary and optionally writes it as JSON.
fn finish_run(
    summary: &GridSummary,
    stats_output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    log_summary(summary);
    if let Some(path) = stats_output {
        std::fs::write(path, serde_json::to_string_pretty(summary)?)?;
        log::info!("Wrote statistics to {}", path.display());
    }
    Ok(())
}

/// Logs range, average, and the per-band distribution.
fn log_summary(summary: &GridSummary) {
    log::info!(
        "AQI range {:.1} - {:.1}, mean {:.1}, stddev {:.1} over {} points",
        summary.min,
        summary.max,
        summary.mean,
        summary.std_dev,
        summary.total
    );
    #[allow(clippy::cast_precision_loss)]
    let total = (summary.total.max(1)) as f64;
    for entry in &summary.by_category {
        let (lower, upper) = entry.category.bounds();
        #[allow(clippy::cast_precision_loss)]
        let share = entry.count as f64 / total * 100.0;
        log::info!(
            "  {} ({lower}-{upper}): {} points ({share:.1}%)",
            entry.category.label(),
            entry.count
        );
    }
    if summary.out_of_range > 0 {
        log::warn!(
            "  {} predictions outside the 0-500 AQI scale",
            summary.out_of_range
        );
    }
}

#[cfg(test)]
mod tests {
    use aqi_map_features::REGIONAL_FEATURE_WIDTH;
    use aqi_map_predict::predict_with_fallback;

    use super::*;

    #[test]
    fn regional_four_by_four_without_model_stays_on_formula_tier() {
        let grid = Grid::build(&DALLAS_BBOX, 4, 4);
        let mut rng = StdRng::seed_from_u64(DEFAULT_REGIONAL_SEED);

        let features = synthesize_regional(&grid, DALLAS_CENTER, &mut rng);
        assert_eq!(features.len(), 16);
        assert_eq!(features.width(), REGIONAL_FEATURE_WIDTH);

        let outcome = predict_with_fallback(None, &REGIONAL_FALLBACK, &features, &mut rng);
        assert_eq!(outcome.tier, PredictionTier::Formula);
        assert_eq!(outcome.values.len(), 16);
        for value in &outcome.values {
            assert!((0.0..=300.0).contains(value), "{value} outside clip range");
        }

        let summary = aqi_map_analytics::aggregate(&outcome.values);
        let banded: u64 = summary.by_category.iter().map(|c| c.count).sum();
        assert_eq!(banded, 16);
        assert_eq!(summary.out_of_range, 0);
    }

    #[test]
    fn run_regional_writes_heatmap_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("heatmap.png");
        let stats = dir.path().join("stats.json");

        let summary = run_regional(&RegionalOptions {
            grid_size: 8,
            model_path: None,
            output: output.clone(),
            stats_output: Some(stats.clone()),
            seed: DEFAULT_REGIONAL_SEED,
            cell_px: 2,
        })
        .unwrap();

        assert_eq!(summary.total, 64);
        assert!(output.exists());
        let written: GridSummary =
            serde_json::from_str(&std::fs::read_to_string(&stats).unwrap()).unwrap();
        assert_eq!(written, summary);
    }

    #[test]
    fn seeded_regional_runs_are_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let options = RegionalOptions {
            grid_size: 6,
            model_path: None,
            output: dir.path().join("a.png"),
            stats_output: None,
            seed: 42,
            cell_px: 1,
        };
        let a = run_regional(&options).unwrap();
        let b = run_regional(&RegionalOptions {
            output: dir.path().join("b.png"),
            ..options
        })
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unreadable_model_path_degrades_to_formula_not_failure() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run_regional(&RegionalOptions {
            grid_size: 4,
            model_path: Some(dir.path().join("missing_model.json")),
            output: dir.path().join("heatmap.png"),
            stats_output: None,
            seed: 1,
            cell_px: 1,
        })
        .unwrap();
        assert_eq!(summary.total, 16);
    }

    #[test]
    fn world_run_halves_the_latitude_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run_world(&WorldOptions {
            grid_size: 36,
            model_path: None,
            output: dir.path().join("world.png"),
            stats_output: None,
            seed: Some(7),
            cell_px: 1,
        })
        .unwrap();
        // 18 latitude rows x 36 longitude columns.
        assert_eq!(summary.total, 18 * 36);
        assert_eq!(summary.out_of_range, 0);

        let img = image_dimensions(&dir.path().join("world.png"));
        assert_eq!(img, (36, 18));
    }

    fn image_dimensions(path: &std::path::Path) -> (u32, u32) {
        let bytes = std::fs::read(path).unwrap();
        // PNG IHDR: width and height as big-endian u32 at offsets 16 and 20.
        let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        (width, height)
    }

    #[test]
    fn world_predictions_respect_the_world_clip_range() {
        let grid = Grid::build(&BoundingBox::WORLD, 9, 18);
        let mut rng = StdRng::seed_from_u64(3);
        let features = synthesize_world(&grid, MAJOR_CITIES, &mut rng);
        let outcome = predict_with_fallback(None, &WORLD_FALLBACK, &features, &mut rng);
        for value in &outcome.values {
            assert!((5.0..=400.0).contains(value));
        }
        let summary = aqi_map_analytics::aggregate(&outcome.values);
        let banded: u64 = summary.by_category.iter().map(|c| c.count).sum();
        assert_eq!(banded + summary.out_of_range, summary.total);
    }
}
