//! COCO annotation file model
//!
//! Only the ids needed to select a subset are interpreted. Image and
//! annotation records are carried through untouched, and the global
//! `info`, `licenses` and `categories` sections are kept as raw JSON.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{DataprepError, Result};
use crate::io::{read_json_file, write_json_file};

pub type ImageId = u64;
pub type ImageIdSet = HashSet<ImageId>;

// Read an integral id field. Ids such as `7.0` count as `7`; any other
// non-integral value is kept as `None` and never matches a selected image.
fn id_field(fields: &Map<String, Value>, key: &str) -> std::result::Result<Option<ImageId>, String> {
    let value = fields
        .get(key)
        .ok_or_else(|| format!("missing field `{}`", key))?;
    Ok(value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    }))
}

/// COCO image record
///
/// Only `id` is interpreted. The record is written back exactly as read,
/// keys in their original order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Image {
    pub id: Option<ImageId>,
    pub fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Image {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let id = id_field(&fields, "id")?;
        Ok(Self { id, fields })
    }
}

impl Serialize for Image {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// COCO annotation record, interpreted through `image_id` only
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Annotation {
    pub image_id: Option<ImageId>,
    // bbox, area, segmentation, iscrowd, ...
    pub fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Annotation {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let image_id = id_field(&fields, "image_id")?;
        Ok(Self { image_id, fields })
    }
}

impl Serialize for Annotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Complete COCO annotation file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoFile {
    pub info: Value,
    pub licenses: Value,
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
    pub categories: Value,
}

impl CocoFile {
    /// Keep only the images and annotations that belong to `ids`.
    pub fn filtered(&self, ids: &ImageIdSet) -> CocoFile {
        CocoFile {
            info: self.info.clone(),
            licenses: self.licenses.clone(),
            images: self
                .images
                .iter()
                .filter(|img| img.id.map_or(false, |id| ids.contains(&id)))
                .cloned()
                .collect(),
            annotations: self
                .annotations
                .iter()
                .filter(|ann| ann.image_id.map_or(false, |id| ids.contains(&id)))
                .cloned()
                .collect(),
            categories: self.categories.clone(),
        }
    }
}

pub fn read_coco_file(path: &Path) -> Result<CocoFile> {
    read_json_file(path)
}

pub fn write_coco_file(path: &Path, coco: &CocoFile) -> Result<()> {
    write_json_file(path, coco)
}

/// Parse the image id out of a COCO file name such as `000000391895.jpg`.
///
/// The stem must consist of ASCII digits only.
pub fn image_id_from_file_name(file_name: &str) -> Result<ImageId> {
    let invalid = || DataprepError::InvalidImageName {
        file_name: file_name.to_string(),
    };
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(invalid)?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    stem.parse().map_err(|_| invalid())
}

/// Collect the image ids for a set of sampled file names.
pub fn image_ids_from_file_names<S: AsRef<str>>(names: &[S]) -> Result<ImageIdSet> {
    names
        .iter()
        .map(|name| image_id_from_file_name(name.as_ref()))
        .collect()
}
