use clap::Parser;
use std::path::{Path, PathBuf};

pub const DEFAULT_COCO_SOURCE_DIR: &str = "~/yingkaining/dataset/coco";
pub const DEFAULT_COCO_TARGET_DIR: &str = "data/coco";
pub const DEFAULT_TRAIN_SIZE: usize = 100;
pub const DEFAULT_VAL_SIZE: usize = 10;

pub const DEFAULT_MOSE_ROOT: &str = "MOSE";
pub const DEFAULT_TRAIN_LIST: &str = "training/assets/MOSE_sample_train_list.txt";
pub const DEFAULT_VAL_LIST: &str = "training/assets/MOSE_sample_val_list.txt";

/// Command-line arguments for sampling a toy subset of a COCO dataset.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct SampleArgs {
    /// Root of the full COCO dataset (train2017/, val2017/, annotations/)
    #[arg(long = "source_dir", default_value = DEFAULT_COCO_SOURCE_DIR)]
    pub source_dir: String,

    /// Directory the toy dataset is written to
    #[arg(long = "target_dir", default_value = DEFAULT_COCO_TARGET_DIR)]
    pub target_dir: String,

    /// Number of training images to sample
    #[arg(long = "train_size", default_value_t = DEFAULT_TRAIN_SIZE)]
    pub train_size: usize,

    /// Number of validation images to sample
    #[arg(long = "val_size", default_value_t = DEFAULT_VAL_SIZE)]
    pub val_size: usize,

    /// Seed for image sampling; a fresh seed is drawn when omitted
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

impl SampleArgs {
    pub fn to_sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            source_dir: expand_home(&self.source_dir),
            target_dir: expand_home(&self.target_dir),
            train_size: self.train_size,
            val_size: self.val_size,
            seed: self.seed,
        }
    }
}

/// Command-line arguments for cloning a MOSE sample video under new ids.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct CloneArgs {
    /// MOSE root holding train/ and valid/ splits
    #[arg(long = "mose_root", default_value = DEFAULT_MOSE_ROOT)]
    pub mose_root: String,

    /// File listing the training video ids, one per line
    #[arg(long = "train_list", default_value = DEFAULT_TRAIN_LIST)]
    pub train_list: String,

    /// File listing the validation video ids, one per line
    #[arg(long = "val_list", default_value = DEFAULT_VAL_LIST)]
    pub val_list: String,
}

impl CloneArgs {
    pub fn to_clone_config(&self) -> CloneConfig {
        CloneConfig {
            mose_root: expand_home(&self.mose_root),
            train_list: expand_home(&self.train_list),
            val_list: expand_home(&self.val_list),
        }
    }
}

/// Settings for the toy COCO sampler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Must contain `train2017/`, `val2017/` and `annotations/instances_{train,val}2017.json`.
    pub source_dir: PathBuf,
    /// Created if absent; existing images with the same name are overwritten.
    pub target_dir: PathBuf,
    /// Clamped to the number of available training images.
    pub train_size: usize,
    /// Clamped to the number of available validation images.
    pub val_size: usize,
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            source_dir: expand_home(DEFAULT_COCO_SOURCE_DIR),
            target_dir: PathBuf::from(DEFAULT_COCO_TARGET_DIR),
            train_size: DEFAULT_TRAIN_SIZE,
            val_size: DEFAULT_VAL_SIZE,
            seed: None,
        }
    }
}

/// One COCO split: image directory, annotation file and requested sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CocoSplit {
    pub name: &'static str,
    pub annotation_file: &'static str,
    pub requested: usize,
}

impl SamplerConfig {
    pub fn splits(&self) -> [CocoSplit; 2] {
        [
            CocoSplit {
                name: "train2017",
                annotation_file: "instances_train2017.json",
                requested: self.train_size,
            },
            CocoSplit {
                name: "val2017",
                annotation_file: "instances_val2017.json",
                requested: self.val_size,
            },
        ]
    }
}

/// Settings for the MOSE clone expander.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneConfig {
    pub mose_root: PathBuf,
    pub train_list: PathBuf,
    pub val_list: PathBuf,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            mose_root: PathBuf::from(DEFAULT_MOSE_ROOT),
            train_list: PathBuf::from(DEFAULT_TRAIN_LIST),
            val_list: PathBuf::from(DEFAULT_VAL_LIST),
        }
    }
}

/// A MOSE split directory together with its id list and metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSpec {
    pub name: String,
    pub dir: PathBuf,
    pub list_file: PathBuf,
    pub meta_file: PathBuf,
}

impl SplitSpec {
    fn new(mose_root: &Path, name: &str, list_file: &Path) -> Self {
        let dir = mose_root.join(name);
        Self {
            name: name.to_string(),
            meta_file: dir.join(format!("meta_{}.json", name)),
            dir,
            list_file: list_file.to_path_buf(),
        }
    }
}

impl CloneConfig {
    pub fn splits(&self) -> [SplitSpec; 2] {
        [
            SplitSpec::new(&self.mose_root, "train", &self.train_list),
            SplitSpec::new(&self.mose_root, "valid", &self.val_list),
        ]
    }
}

// Expand a leading `~` to the home directory; other paths pass through.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
