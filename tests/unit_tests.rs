use clap::Parser;
use dataprep::coco::{image_id_from_file_name, image_ids_from_file_names, CocoFile, ImageIdSet};
use dataprep::coco_sampler::choose_images;
use dataprep::config::{expand_home, CloneArgs, SampleArgs};
use dataprep::io::read_id_list;
use dataprep::utils::{list_files_with_extension, list_subdirectories};
use dataprep::{CloneConfig, DataprepError, SamplerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_sample_args_defaults() {
    let args = SampleArgs::parse_from(["toy_coco"]);
    assert_eq!(args.source_dir, "~/yingkaining/dataset/coco");
    assert_eq!(args.target_dir, "data/coco");
    assert_eq!(args.train_size, 100);
    assert_eq!(args.val_size, 10);
    assert_eq!(args.seed, None);

    let config = args.to_sampler_config();
    assert_eq!(config, SamplerConfig::default());
}

#[test]
fn test_sample_args_overrides() {
    let args = SampleArgs::parse_from([
        "toy_coco",
        "--source_dir",
        "/data/coco",
        "--train_size",
        "5",
        "--seed",
        "3",
    ]);
    let config = args.to_sampler_config();
    assert_eq!(config.source_dir, PathBuf::from("/data/coco"));
    assert_eq!(config.train_size, 5);
    assert_eq!(config.seed, Some(3));

    let splits = config.splits();
    assert_eq!(splits[0].name, "train2017");
    assert_eq!(splits[0].requested, 5);
    assert_eq!(splits[1].annotation_file, "instances_val2017.json");
    assert_eq!(splits[1].requested, 10);
}

#[test]
fn test_clone_config_layout() {
    let config = CloneArgs::parse_from(["mose_clone"]).to_clone_config();
    assert_eq!(config, CloneConfig::default());

    let [train, valid] = config.splits();
    assert_eq!(train.dir, PathBuf::from("MOSE/train"));
    assert_eq!(train.meta_file, PathBuf::from("MOSE/train/meta_train.json"));
    assert_eq!(
        train.list_file,
        PathBuf::from("training/assets/MOSE_sample_train_list.txt")
    );
    assert_eq!(valid.name, "valid");
    assert_eq!(valid.meta_file, PathBuf::from("MOSE/valid/meta_valid.json"));
    assert_eq!(
        valid.list_file,
        PathBuf::from("training/assets/MOSE_sample_val_list.txt")
    );
}

#[test]
fn test_expand_home() {
    assert_eq!(expand_home("data/coco"), PathBuf::from("data/coco"));
    assert_eq!(expand_home("/abs/~/x"), PathBuf::from("/abs/~/x"));
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expand_home("~/coco"), home.join("coco"));
        assert_eq!(expand_home("~"), home);
    }
}

#[test]
fn test_image_id_from_file_name() {
    assert_eq!(image_id_from_file_name("000000391895.jpg").unwrap(), 391895);
    assert_eq!(image_id_from_file_name("7.jpg").unwrap(), 7);

    for bad in ["dog.jpg", "12a.jpg", "+12.jpg", "-1.jpg", ".jpg", "1 2.jpg", "١٢.jpg"] {
        assert!(
            matches!(
                image_id_from_file_name(bad),
                Err(DataprepError::InvalidImageName { .. })
            ),
            "{} should be rejected",
            bad
        );
    }
}

#[test]
fn test_image_ids_from_file_names() {
    let ids = image_ids_from_file_names(&["000000000001.jpg", "000000000042.jpg"]).unwrap();
    assert_eq!(ids, [1, 42].into_iter().collect::<ImageIdSet>());
    assert!(image_ids_from_file_names(&["1.jpg", "x.jpg"]).is_err());
}

#[test]
fn test_choose_images() {
    let names: Vec<String> = (0..20).map(|i| format!("{:03}.jpg", i)).collect();
    let mut rng = StdRng::seed_from_u64(42);

    let chosen = choose_images(&names, 5, &mut rng);
    assert_eq!(chosen.len(), 5);
    assert_eq!(chosen.iter().collect::<HashSet<_>>().len(), 5);
    assert!(chosen.iter().all(|name| names.contains(name)));

    assert_eq!(choose_images(&names, 50, &mut rng).len(), 20);
    assert!(choose_images(&names, 0, &mut rng).is_empty());
    assert!(choose_images(&[], 3, &mut rng).is_empty());
}

#[test]
fn test_coco_filtered() {
    let coco: CocoFile = serde_json::from_value(json!({
        "info": {"year": 2017},
        "licenses": [{"id": 1, "name": "a", "url": ""}],
        "images": [
            {"id": 1, "file_name": "000000000001.jpg", "width": 10, "height": 20, "license": 1},
            {"id": 2, "file_name": "000000000002.jpg", "width": 10, "height": 20, "license": 1}
        ],
        "annotations": [
            {"id": 10, "image_id": 1, "category_id": 3, "iscrowd": 1,
             "segmentation": {"counts": [1, 2], "size": [20, 10]}},
            {"id": 20, "image_id": 2, "category_id": 3, "bbox": [0, 0, 1, 1]}
        ],
        "categories": [{"id": 3, "name": "cat", "supercategory": "animal"}]
    }))
    .unwrap();

    let filtered = coco.filtered(&[1].into_iter().collect());

    assert_eq!(filtered.images.len(), 1);
    assert_eq!(filtered.images[0].id, Some(1));
    assert_eq!(filtered.images[0].fields["license"], json!(1));
    assert_eq!(filtered.annotations.len(), 1);
    assert_eq!(
        filtered.annotations[0].fields["segmentation"],
        json!({"counts": [1, 2], "size": [20, 10]})
    );
    assert_eq!(filtered.info, coco.info);
    assert_eq!(filtered.licenses, coco.licenses);
    assert_eq!(filtered.categories, coco.categories);
}

#[test]
fn test_coco_minimal_records_are_accepted() {
    let coco: CocoFile = serde_json::from_value(json!({
        "info": {},
        "licenses": [],
        "images": [{"id": 1}, {"id": 2, "width": 640.0, "height": 480.0}],
        "annotations": [{"image_id": 1}, {"image_id": 2.0, "area": 1.5}],
        "categories": []
    }))
    .unwrap();

    assert_eq!(coco.images[1].id, Some(2));
    assert_eq!(coco.annotations[1].image_id, Some(2));

    let filtered = coco.filtered(&[2].into_iter().collect());
    assert_eq!(filtered.images.len(), 1);
    assert_eq!(filtered.annotations.len(), 1);
    assert_eq!(
        serde_json::to_string(&filtered.images[0]).unwrap(),
        r#"{"id":2,"width":640.0,"height":480.0}"#
    );
    assert_eq!(
        serde_json::to_string(&filtered.annotations[0]).unwrap(),
        r#"{"image_id":2.0,"area":1.5}"#
    );
}

#[test]
fn test_coco_record_without_id_is_rejected() {
    let result = serde_json::from_value::<CocoFile>(json!({
        "info": {},
        "licenses": [],
        "images": [{"file_name": "000000000001.jpg"}],
        "annotations": [],
        "categories": []
    }));
    assert!(result.is_err());
}

#[test]
fn test_coco_missing_info_is_rejected() {
    let result = serde_json::from_value::<CocoFile>(json!({
        "licenses": [],
        "images": [],
        "annotations": [],
        "categories": []
    }));
    assert!(result.is_err());
}

#[test]
fn test_read_id_list() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("list.txt");
    fs::write(&path, "  a1b2 \n\n\t\nc3d4\r\ne5\n").unwrap();

    assert_eq!(read_id_list(&path).unwrap(), vec!["a1b2", "c3d4", "e5"]);
    assert!(matches!(
        read_id_list(&temp_dir.path().join("missing.txt")),
        Err(DataprepError::Io { .. })
    ));
}

#[test]
fn test_listings_are_sorted_and_filtered() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path().join("frames [1]");
    fs::create_dir_all(dir.join("sub_b")).unwrap();
    fs::create_dir_all(dir.join("sub_a")).unwrap();
    fs::create_dir_all(dir.join("folder.jpg")).unwrap();
    for name in ["00002.jpg", "00001.jpg", "00003.png", "00004.JPG"] {
        fs::write(dir.join(name), b"x").unwrap();
    }

    assert_eq!(
        list_files_with_extension(&dir, "jpg").unwrap(),
        vec!["00001.jpg", "00002.jpg"]
    );
    assert_eq!(
        list_subdirectories(&dir).unwrap(),
        vec!["folder.jpg", "sub_a", "sub_b"]
    );
    assert!(list_files_with_extension(&temp_dir.path().join("nope"), "jpg").is_err());
}
