//! Dataset preparation tools
//!
//! This library samples toy subsets of COCO datasets and expands a single
//! MOSE video sample into many training entries.

pub mod coco;
pub mod coco_sampler;
pub mod config;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;
pub mod video_clone;

// Re-export commonly used types and functions
pub use config::{CloneArgs, CloneConfig, SampleArgs, SamplerConfig};
pub use error::{DataprepError, Result};
pub use types::{CloneOutcome, ExpandReport, MetadataOutcome, SampleReport, SkipReason};

pub use coco::{CocoFile, ImageIdSet};
pub use coco_sampler::{sample_toy_coco, sample_toy_coco_with_rng};
pub use video_clone::{clone_video, expand_dataset, update_metadata};
