//! Toy COCO sampling
//!
//! Copies a random subset of the train/val images of a COCO dataset and writes
//! annotation files restricted to the sampled images.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::Path;

use crate::coco::{image_ids_from_file_names, read_coco_file, write_coco_file};
use crate::config::SamplerConfig;
use crate::error::Result;
use crate::types::{SampleReport, SplitSampleStats, FRAME_EXTENSION};
use crate::utils::{
    copy_files_parallel, create_progress_bar, ensure_directory, list_files_with_extension,
};

pub const ANNOTATIONS_DIR: &str = "annotations";

/// Sorted `.jpg` file names of a COCO image directory.
pub fn list_split_images(dir: &Path) -> Result<Vec<String>> {
    list_files_with_extension(dir, FRAME_EXTENSION)
}

/// Uniformly pick `min(requested, names.len())` names without replacement.
pub fn choose_images<R: Rng + ?Sized>(
    names: &[String],
    requested: usize,
    rng: &mut R,
) -> Vec<String> {
    let amount = requested.min(names.len());
    let mut chosen: Vec<String> = names.choose_multiple(rng, amount).cloned().collect();
    chosen.sort();
    chosen
}

/// Copy the sampled images of one split, showing a progress bar.
pub fn copy_images(names: &[String], from: &Path, to: &Path, label: &str) -> Result<usize> {
    let pb = create_progress_bar(names.len() as u64, label);
    let copied = copy_files_parallel(names, from, to, Some(&pb))?;
    pb.finish_with_message(format!("{} copy complete", label));
    Ok(copied)
}

/// Sample a toy dataset using the seed from `config` (or entropy when unset).
pub fn sample_toy_coco(config: &SamplerConfig) -> Result<SampleReport> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    sample_toy_coco_with_rng(config, &mut rng)
}

/// Sample a toy dataset drawing from the supplied random source.
///
/// Images of every split are selected and copied first, then each split's
/// annotation file is filtered down to the selected image ids.
pub fn sample_toy_coco_with_rng<R: Rng + ?Sized>(
    config: &SamplerConfig,
    rng: &mut R,
) -> Result<SampleReport> {
    let splits = config.splits();
    for split in &splits {
        ensure_directory(&config.target_dir.join(split.name))?;
    }
    let target_ann_dir = ensure_directory(&config.target_dir.join(ANNOTATIONS_DIR))?;

    let mut stats = Vec::with_capacity(splits.len());
    for split in &splits {
        let source_images_dir = config.source_dir.join(split.name);
        let target_images_dir = config.target_dir.join(split.name);

        let available = list_split_images(&source_images_dir)?;
        let selected = choose_images(&available, split.requested, rng);
        info!(
            "Selected {} of {} images from {}",
            selected.len(),
            available.len(),
            source_images_dir.display()
        );
        copy_images(&selected, &source_images_dir, &target_images_dir, split.name)?;

        stats.push(SplitSampleStats {
            split: split.name.to_string(),
            requested: split.requested,
            available: available.len(),
            selected,
            ..Default::default()
        });
    }

    for (split, split_stats) in splits.iter().zip(stats.iter_mut()) {
        let source_ann = config
            .source_dir
            .join(ANNOTATIONS_DIR)
            .join(split.annotation_file);
        let target_ann = target_ann_dir.join(split.annotation_file);

        let ids = image_ids_from_file_names(&split_stats.selected)?;
        let coco = read_coco_file(&source_ann)?;
        debug!(
            "Loaded {} images and {} annotations from {}",
            coco.images.len(),
            coco.annotations.len(),
            source_ann.display()
        );

        let filtered = coco.filtered(&ids);
        write_coco_file(&target_ann, &filtered)?;
        info!("Wrote {}", target_ann.display());

        split_stats.images_written = filtered.images.len();
        split_stats.annotations_written = filtered.annotations.len();
    }

    Ok(SampleReport {
        target_dir: config.target_dir.clone(),
        splits: stats,
    })
}
