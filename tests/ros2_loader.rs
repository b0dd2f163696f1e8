use std::fs;
use std::path::Path;

use image::{GrayImage, Luma};

use coverage_grid::{CellType, GridError, RosImportOptions, load_ros_map};

/// Writes a 2x2 map: top row [black, white], bottom row [white, gray].
fn write_simple_map(dir: &Path, extra_yaml: &str) -> std::path::PathBuf {
    let mut img = GrayImage::new(2, 2);
    img.put_pixel(0, 0, Luma([0]));
    img.put_pixel(1, 0, Luma([254]));
    img.put_pixel(0, 1, Luma([254]));
    img.put_pixel(1, 1, Luma([205]));
    img.save(dir.join("simple.png")).unwrap();

    let yaml_path = dir.join("simple.yaml");
    fs::write(
        &yaml_path,
        format!(
            "image: simple.png\nresolution: 0.5\norigin: [-1.0, 2.0, 0.0]\n\
             occupied_thresh: 0.65\nfree_thresh: 0.196\n{extra_yaml}"
        ),
    )
    .unwrap();
    yaml_path
}

#[test]
fn loads_trinary_ros2_map() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = write_simple_map(dir.path(), "negate: 0\n");

    let map = load_ros_map(&yaml_path, &RosImportOptions::default()).expect("map should load");

    assert_eq!(map.rows(), 2);
    assert_eq!(map.cols(), 2);
    assert_eq!(map.resolution(), 0.5);
    assert_eq!(map.origin(), glam::DVec2::new(-1.0, 2.0));
    assert_eq!(map.name(), "simple");

    // Image top row is grid row 1.
    assert_eq!(map.get_cell(1, 0).unwrap(), CellType::NonTraversable);
    assert_eq!(map.get_cell(1, 1).unwrap(), CellType::Cuttable);
    assert_eq!(map.get_cell(0, 0).unwrap(), CellType::Cuttable);
    assert_eq!(map.get_cell(0, 1).unwrap(), CellType::NonTraversable);
}

#[test]
fn import_options_choose_cell_types_and_name() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = write_simple_map(dir.path(), "");

    let options = RosImportOptions {
        free_cell_type: CellType::Traversable,
        unknown_cell_type: CellType::Traversable,
        name: Some("warehouse".to_string()),
    };
    let map = load_ros_map(&yaml_path, &options).unwrap();

    assert_eq!(map.name(), "warehouse");
    assert_eq!(map.count_cells_of_type(CellType::Traversable), 3);
    assert_eq!(map.get_all_non_traversable_cells().len(), 1);
}

#[test]
fn negate_flips_free_and_occupied() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = write_simple_map(dir.path(), "negate: true\n");

    let map = load_ros_map(&yaml_path, &RosImportOptions::default()).unwrap();
    assert_eq!(map.get_cell(1, 0).unwrap(), CellType::Cuttable);
    assert_eq!(map.get_cell(1, 1).unwrap(), CellType::NonTraversable);
}

#[test]
fn raw_mode_ignores_negate() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = write_simple_map(dir.path(), "mode: raw\nnegate: 1\n");

    let map = load_ros_map(&yaml_path, &RosImportOptions::default()).unwrap();
    // A zero pixel is 0% occupied; values above 100 are unknown.
    assert_eq!(map.get_cell(1, 0).unwrap(), CellType::Cuttable);
    assert_eq!(map.get_cell(1, 1).unwrap(), CellType::NonTraversable);
    assert_eq!(map.get_cell(0, 0).unwrap(), CellType::NonTraversable);
    assert_eq!(map.get_cell(0, 1).unwrap(), CellType::NonTraversable);
}

#[test]
fn missing_files_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_ros_map(dir.path().join("absent.yaml"), &RosImportOptions::default())
        .unwrap_err();
    assert!(matches!(err, GridError::NotFound(_)));

    let yaml_path = write_simple_map(dir.path(), "");
    fs::remove_file(dir.path().join("simple.png")).unwrap();
    let err = load_ros_map(&yaml_path, &RosImportOptions::default()).unwrap_err();
    assert!(matches!(err, GridError::NotFound(_)));
}

#[test]
fn inverted_thresholds_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let img = GrayImage::new(1, 1);
    img.save(dir.path().join("m.png")).unwrap();
    let yaml_path = dir.path().join("m.yaml");
    fs::write(
        &yaml_path,
        "image: m.png\nresolution: 0.1\norigin: [0.0, 0.0, 0.0]\noccupied_thresh: 0.1\nfree_thresh: 0.5\n",
    )
    .unwrap();

    assert!(matches!(
        load_ros_map(&yaml_path, &RosImportOptions::default()),
        Err(GridError::InvalidArgument(_))
    ));
}
