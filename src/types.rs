use std::fmt;
use std::path::{Path, PathBuf};

// Source frames are JPEG, masks are PNG
pub const FRAME_EXTENSION: &str = "jpg";
pub const MASK_EXTENSION: &str = "png";

// Subdirectories of a MOSE split
pub const FRAMES_DIR: &str = "JPEGImages";
pub const MASKS_DIR: &str = "Annotations";

/// Frame and mask directories of one video in a MOSE split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDirs {
    pub frames_dir: PathBuf,
    pub annotations_dir: PathBuf,
}

impl VideoDirs {
    pub fn new(split_dir: &Path, video_id: &str) -> Self {
        Self {
            frames_dir: split_dir.join(FRAMES_DIR).join(video_id),
            annotations_dir: split_dir.join(MASKS_DIR).join(video_id),
        }
    }

    pub fn exist(&self) -> bool {
        self.frames_dir.is_dir() && self.annotations_dir.is_dir()
    }
}

// Why a single clone or metadata update was not carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingSource {
        frames_dir: PathBuf,
        annotations_dir: PathBuf,
    },
    InvalidIdentifier(String),
    CopyFailed(String),
    MissingMetadata(PathBuf),
    InvalidMetadata(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSource {
                frames_dir,
                annotations_dir,
            } => write!(
                f,
                "source video or annotation directory does not exist: {} or {}",
                frames_dir.display(),
                annotations_dir.display()
            ),
            SkipReason::InvalidIdentifier(id) => {
                write!(f, "video id is not a valid directory name: {:?}", id)
            }
            SkipReason::CopyFailed(msg) => write!(f, "copy failed: {}", msg),
            SkipReason::MissingMetadata(path) => {
                write!(f, "metadata file not found: {}", path.display())
            }
            SkipReason::InvalidMetadata(msg) => write!(f, "failed to update metadata: {}", msg),
        }
    }
}

/// Result of cloning the source video under one requested id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    Copied { frames: usize, masks: usize },
    AlreadySource,
    Skipped(SkipReason),
}

impl CloneOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, CloneOutcome::Skipped(_))
    }
}

/// Result of propagating the source metadata record of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    Updated { source_key: String, added: usize },
    Skipped(SkipReason),
}

/// Per-split statistics of a toy COCO sampling run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSampleStats {
    pub split: String,
    pub requested: usize,
    pub available: usize,
    pub selected: Vec<String>,
    pub images_written: usize,
    pub annotations_written: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SampleReport {
    pub target_dir: PathBuf,
    pub splits: Vec<SplitSampleStats>,
}

impl SampleReport {
    pub fn split(&self, name: &str) -> Option<&SplitSampleStats> {
        self.splits.iter().find(|s| s.split == name)
    }

    pub fn print_summary(&self) {
        log::info!("Toy COCO dataset created at {}", self.target_dir.display());
        for split in &self.splits {
            log::info!(
                "{} images: {} (requested {}, available {}), {} image records, {} annotations",
                split.split,
                split.selected.len(),
                split.requested,
                split.available,
                split.images_written,
                split.annotations_written
            );
        }
    }
}

/// Outcomes of expanding one MOSE split.
#[derive(Debug, Clone)]
pub struct SplitCloneReport {
    pub split: String,
    pub source_id: String,
    pub clones: Vec<(String, CloneOutcome)>,
    pub metadata: Option<MetadataOutcome>,
}

impl SplitCloneReport {
    pub fn new(split: &str, source_id: &str) -> Self {
        Self {
            split: split.to_string(),
            source_id: source_id.to_string(),
            clones: Vec::new(),
            metadata: None,
        }
    }

    pub fn requested(&self) -> usize {
        self.clones.len()
    }

    pub fn succeeded(&self) -> usize {
        self.clones.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.clones.iter().filter_map(|(id, outcome)| match outcome {
            CloneOutcome::Skipped(reason) => Some((id.as_str(), reason)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpandReport {
    pub splits: Vec<SplitCloneReport>,
}

impl ExpandReport {
    pub fn split(&self, name: &str) -> Option<&SplitCloneReport> {
        self.splits.iter().find(|s| s.split == name)
    }

    pub fn print_summary(&self) {
        log::info!("=== Clone Summary ===");
        for split in &self.splits {
            log::info!(
                "Copied {}/{} {} videos from source {}",
                split.succeeded(),
                split.requested(),
                split.split,
                split.source_id
            );
            match &split.metadata {
                Some(MetadataOutcome::Updated { source_key, added }) => log::info!(
                    "Metadata for {}: added {} records copied from {}",
                    split.split,
                    added,
                    source_key
                ),
                Some(MetadataOutcome::Skipped(reason)) => {
                    log::warn!("Metadata for {} not updated: {}", split.split, reason)
                }
                None => {}
            }
        }
    }
}
