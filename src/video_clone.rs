//! MOSE sample expansion
//!
//! Duplicates the single video present in a MOSE split under every id of a
//! training list and copies its metadata record for each new id.

use log::{info, warn};
use serde_json::{Map, Value};
use std::path::Path;

use crate::config::{CloneConfig, SplitSpec};
use crate::error::{DataprepError, Result};
use crate::io::{read_id_list, read_json_file, write_json_file_pretty};
use crate::types::{
    CloneOutcome, ExpandReport, MetadataOutcome, SkipReason, SplitCloneReport, VideoDirs,
    FRAMES_DIR, FRAME_EXTENSION, MASK_EXTENSION,
};
use crate::utils::{
    copy_files, create_progress_bar, ensure_directory, list_files_with_extension,
    list_subdirectories,
};

/// First video directory (in sorted order) under `<split_dir>/JPEGImages`.
pub fn find_source_video_id(split_dir: &Path) -> Option<String> {
    list_subdirectories(&split_dir.join(FRAMES_DIR))
        .ok()
        .and_then(|dirs| dirs.into_iter().next())
}

pub fn read_video_ids(list_file: &Path) -> Result<Vec<String>> {
    read_id_list(list_file)
}

// A video id must name exactly one directory below JPEGImages/Annotations.
fn is_valid_video_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\', '\0'])
}

fn copy_video_files(source: &VideoDirs, target: &VideoDirs) -> Result<(usize, usize)> {
    ensure_directory(&target.frames_dir)?;
    ensure_directory(&target.annotations_dir)?;

    let frames = list_files_with_extension(&source.frames_dir, FRAME_EXTENSION)?;
    let frames = copy_files(&frames, &source.frames_dir, &target.frames_dir, None)?;

    let masks = list_files_with_extension(&source.annotations_dir, MASK_EXTENSION)?;
    let masks = copy_files(&masks, &source.annotations_dir, &target.annotations_dir, None)?;

    Ok((frames, masks))
}

/// Copy the frames and masks of `source_id` to a video named `target_id`.
///
/// Frames are copied before masks, each in sorted order. Existing files of
/// the target are overwritten. A failed copy stops the clone and leaves
/// whatever was already written in place.
pub fn clone_video(split_dir: &Path, source_id: &str, target_id: &str) -> CloneOutcome {
    if target_id == source_id {
        return CloneOutcome::AlreadySource;
    }
    if !is_valid_video_id(target_id) {
        return CloneOutcome::Skipped(SkipReason::InvalidIdentifier(target_id.to_string()));
    }

    let source = VideoDirs::new(split_dir, source_id);
    if !source.exist() {
        return CloneOutcome::Skipped(SkipReason::MissingSource {
            frames_dir: source.frames_dir,
            annotations_dir: source.annotations_dir,
        });
    }

    let target = VideoDirs::new(split_dir, target_id);
    match copy_video_files(&source, &target) {
        Ok((frames, masks)) => CloneOutcome::Copied { frames, masks },
        Err(e) => CloneOutcome::Skipped(SkipReason::CopyFailed(e.to_string())),
    }
}

fn insert_missing_records(
    meta: &mut Value,
    source_id: &str,
    video_ids: &[String],
) -> std::result::Result<Option<(String, usize)>, String> {
    let videos: &mut Map<String, Value> = meta
        .get_mut("videos")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| "no \"videos\" object".to_string())?;

    // The first record in document order is the one being replicated
    let (source_key, source_record) = match videos.iter().next() {
        Some((key, record)) => (key.clone(), record.clone()),
        None => return Ok(None),
    };

    let mut added = 0;
    for id in video_ids {
        if id == &source_key || id == source_id || videos.contains_key(id) {
            continue;
        }
        videos.insert(id.clone(), source_record.clone());
        added += 1;
    }
    Ok(Some((source_key, added)))
}

/// Give every id in `video_ids` a copy of the first record in `meta_file`.
///
/// Ids that already have a record and the split's source id are left alone.
/// Problems are reported as a skipped outcome, never as an error.
pub fn update_metadata(
    meta_file: &Path,
    source_id: &str,
    video_ids: &[String],
) -> MetadataOutcome {
    if !meta_file.is_file() {
        return MetadataOutcome::Skipped(SkipReason::MissingMetadata(meta_file.to_path_buf()));
    }

    let mut meta: Value = match read_json_file(meta_file) {
        Ok(meta) => meta,
        Err(e) => return MetadataOutcome::Skipped(SkipReason::InvalidMetadata(e.to_string())),
    };

    let (source_key, added) = match insert_missing_records(&mut meta, source_id, video_ids) {
        Ok(Some(found)) => found,
        Ok(None) => {
            return MetadataOutcome::Skipped(SkipReason::InvalidMetadata(format!(
                "no source video record in {}",
                meta_file.display()
            )))
        }
        Err(msg) => {
            return MetadataOutcome::Skipped(SkipReason::InvalidMetadata(format!(
                "{} in {}",
                msg,
                meta_file.display()
            )))
        }
    };

    match write_json_file_pretty(meta_file, &meta) {
        Ok(()) => {
            info!("Updated metadata file {}", meta_file.display());
            MetadataOutcome::Updated { source_key, added }
        }
        Err(e) => MetadataOutcome::Skipped(SkipReason::InvalidMetadata(e.to_string())),
    }
}

/// Clone the source video of `split` under every id in `video_ids`.
pub fn clone_split(split: &SplitSpec, source_id: &str, video_ids: &[String]) -> SplitCloneReport {
    let mut report = SplitCloneReport::new(&split.name, source_id);
    let pb = create_progress_bar(video_ids.len() as u64, &split.name);

    for id in video_ids {
        let outcome = clone_video(&split.dir, source_id, id);
        match &outcome {
            CloneOutcome::Copied { .. } => info!("Copied video {}", id),
            CloneOutcome::AlreadySource => {
                info!("Skipping source {} video id {}", split.name, id)
            }
            CloneOutcome::Skipped(reason) => warn!("Skipping {}: {}", id, reason),
        }
        report.clones.push((id.clone(), outcome));
        pb.inc(1);
    }

    pb.finish_with_message(format!("{} cloning complete", split.name));
    report
}

/// Expand both MOSE splits described by `config`.
///
/// Missing source videos or unreadable id lists abort the run. Failures of a
/// single clone or of a metadata update are recorded in the report and the
/// run carries on.
pub fn expand_dataset(config: &CloneConfig) -> Result<ExpandReport> {
    let splits = config.splits();

    let mut sources = Vec::with_capacity(splits.len());
    for split in &splits {
        let source_id =
            find_source_video_id(&split.dir).ok_or_else(|| DataprepError::NoSourceVideo {
                dir: split.dir.join(FRAMES_DIR),
            })?;
        info!("Found {} source video id: {}", split.name, source_id);
        sources.push(source_id);
    }

    let mut id_lists = Vec::with_capacity(splits.len());
    for split in &splits {
        let ids = read_video_ids(&split.list_file)?;
        info!(
            "Read {} video ids from {}",
            ids.len(),
            split.list_file.display()
        );
        id_lists.push(ids);
    }

    let mut reports: Vec<SplitCloneReport> = splits
        .iter()
        .zip(sources.iter())
        .zip(id_lists.iter())
        .map(|((split, source_id), ids)| clone_split(split, source_id, ids))
        .collect();

    for ((split, ids), report) in splits.iter().zip(id_lists.iter()).zip(reports.iter_mut()) {
        report.metadata = Some(update_metadata(&split.meta_file, &report.source_id, ids));
    }

    Ok(ExpandReport { splits: reports })
}
