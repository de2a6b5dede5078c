use std::path::{Path, PathBuf};

use strata_sim::{run_survey, survey_rng, SurveyConfig, SurveyResults};
use strata_world::{find_bounding_box, load_world, populated_columns, BlockMap};

use crate::error::CliError;
use crate::report;

pub const DEFAULT_CACHE_FILE: &str = "cache.dat";
pub const DEFAULT_OUTPUT_FILE: &str = "out.txt";

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub world_dir: PathBuf,
    pub cache_path: PathBuf,
    pub output_path: PathBuf,
    pub json_path: Option<PathBuf>,
    /// Rebuild the cache even when one exists.
    pub rebuild: bool,
    pub config: SurveyConfig,
}

impl RunOptions {
    pub fn new(world_dir: PathBuf) -> Self {
        Self {
            world_dir,
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            json_path: None,
            rebuild: false,
            config: SurveyConfig::default(),
        }
    }
}

/// Decode the world, trim it to a gap-free area and store the block cache.
pub fn build_cache(
    world_dir: &Path,
    cache_path: &Path,
    config: &SurveyConfig,
) -> Result<BlockMap, CliError> {
    log::info!("Loading chunks from {}", world_dir.display());
    let sections = load_world(world_dir)?;

    let columns = populated_columns(&sections);
    let bounds = find_bounding_box(columns, config.edge_margin)
        .ok_or_else(|| CliError::NoBoundingBox(world_dir.to_path_buf()))?;
    let voxel_bounds = bounds.to_voxels();
    log::info!("Active bounding box: {voxel_bounds} (chunks {bounds})");

    log::info!("Building block cache...");
    let map = BlockMap::build(
        &sections,
        voxel_bounds,
        config.cache_min_y,
        config.cache_max_y,
    )?;
    strata_persist::save_to_path(&map, cache_path)?;
    Ok(map)
}

/// Full run: ensure the cache exists, survey it and write the reports.
pub fn run(options: &RunOptions) -> Result<SurveyResults, CliError> {
    let config = &options.config;
    config.validate()?;

    if options.rebuild || !options.cache_path.exists() {
        build_cache(&options.world_dir, &options.cache_path, config)?;
    }

    log::info!("Loading cache file {}", options.cache_path.display());
    let map = strata_persist::load_from_path(&options.cache_path)?;
    if map.min_y() > config.min_depth || map.max_y() < config.max_depth {
        return Err(CliError::CacheRange {
            path: options.cache_path.clone(),
            cache_min: map.min_y(),
            cache_max: map.max_y(),
            min_depth: config.min_depth,
            max_depth: config.max_depth,
        });
    }

    let mut rng = survey_rng(config.seed);
    let results = run_survey(&map, config, &mut rng)?;

    report::save_text_report(&options.output_path, &results).map_err(|source| {
        CliError::Report {
            path: options.output_path.clone(),
            source,
        }
    })?;
    log::info!("Wrote report to {}", options.output_path.display());

    if let Some(path) = &options.json_path {
        report::write_json_report(path, &results).map_err(|source| CliError::Report {
            path: path.clone(),
            source,
        })?;
        log::info!("Wrote JSON report to {}", path.display());
    }

    Ok(results)
}
