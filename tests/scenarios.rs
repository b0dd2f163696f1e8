use approx::assert_abs_diff_eq;
use glam::DVec2;

use coverage_grid::{CellIndex, CellType, GridConfig, GridError, GridMap};

#[test]
fn mark_single_cuttable_cell() {
    let mut map = GridMap::new(10, 10, 0.05, DVec2::ZERO, CellType::NonTraversable).unwrap();
    map.set_cell(3, 4, CellType::Cuttable).unwrap();

    assert_eq!(map.get_cell(3, 4).unwrap(), CellType::Cuttable);
    assert_eq!(map.get_all_cuttable_cells(), vec![CellIndex::new(3, 4)]);
    assert!(map.get_all_traversable_cells().is_empty());
    assert_eq!(map.get_all_non_traversable_cells().len(), 99);
}

#[test]
fn grid_to_world_with_offset_origin() {
    let map = GridMap::new(10, 10, 0.1, DVec2::new(1.0, 2.0), CellType::Cuttable).unwrap();

    assert_eq!(map.grid_to_world(0, 0), DVec2::new(1.0, 2.0));
    let p = map.grid_to_world(2, 3);
    assert_abs_diff_eq!(p.x, 1.3, epsilon = 1e-12);
    assert_abs_diff_eq!(p.y, 2.2, epsilon = 1e-12);
    assert_eq!(map.world_to_grid(p), CellIndex::new(2, 3));
}

#[test]
fn zero_rows_is_invalid_argument() {
    assert!(matches!(
        GridMap::new(0, 10, 0.05, DVec2::ZERO, CellType::Cuttable),
        Err(GridError::InvalidArgument(_))
    ));
}

#[test]
fn every_out_of_bounds_accessor_agrees() {
    let mut map = GridMap::new(4, 6, 0.05, DVec2::ZERO, CellType::Cuttable).unwrap();
    for row in -2..6 {
        for col in -2..8 {
            let inside = (0..4).contains(&row) && (0..6).contains(&col);
            assert_eq!(map.is_valid_position(row, col), inside);
            assert_eq!(map.get_cell(row, col).is_ok(), inside);
            assert_eq!(map.is_traversable(row, col).is_ok(), inside);
            assert_eq!(map.is_cuttable(row, col).is_ok(), inside);
            assert_eq!(map.is_non_traversable(row, col).is_ok(), inside);
            assert_eq!(map.set_cell(row, col, CellType::Traversable).is_ok(), inside);
        }
    }
    assert_eq!(map.count_cells_of_type(CellType::Traversable), 24);
}

#[test]
fn obstacle_ring_around_a_lawn() {
    // 5x5 lawn with a border of obstacles and a traversable path down column 2.
    let mut map = GridMap::new(5, 5, 0.1, DVec2::ZERO, CellType::Cuttable).unwrap();
    for i in 0..5 {
        map.set_cell(0, i, CellType::NonTraversable).unwrap();
        map.set_cell(4, i, CellType::NonTraversable).unwrap();
        map.set_cell(i, 0, CellType::NonTraversable).unwrap();
        map.set_cell(i, 4, CellType::NonTraversable).unwrap();
    }
    for row in 1..4 {
        map.set_cell(row, 2, CellType::Traversable).unwrap();
    }

    assert_eq!(
        map.get_all_cuttable_cells(),
        vec![
            CellIndex::new(1, 1),
            CellIndex::new(1, 3),
            CellIndex::new(2, 1),
            CellIndex::new(2, 3),
            CellIndex::new(3, 1),
            CellIndex::new(3, 3),
        ]
    );
    assert_eq!(map.get_non_traversable_neighbors(2, 2).len(), 0);
    assert_eq!(
        map.get_traversable_neighbors(2, 2),
        vec![CellIndex::new(1, 2), CellIndex::new(3, 2)]
    );
    assert_eq!(map.get_non_traversable_neighbors(1, 1).len(), 5);

    let counts = map.cell_counts();
    assert_eq!(counts.non_traversable, 16);
    assert_eq!(counts.traversable, 3);
    assert_eq!(counts.cuttable, 6);
}

#[test]
fn world_path_through_grid() {
    let map = GridMap::from_world_size(
        DVec2::new(2.0, 3.0),
        0.5,
        DVec2::new(-1.0, -1.0),
        CellType::Cuttable,
    )
    .unwrap();
    assert_eq!((map.rows(), map.cols()), (4, 6));

    let waypoints = [
        DVec2::new(-1.0, -1.0),
        DVec2::new(-0.6, 0.2),
        DVec2::new(1.9, 0.9),
        DVec2::new(-1.2, -1.0),
    ];
    let cells = map.world_to_grid_path(&waypoints);
    assert_eq!(
        cells,
        vec![
            CellIndex::new(0, 0),
            CellIndex::new(2, 0),
            CellIndex::new(3, 5),
            CellIndex::new(0, -1),
        ]
    );
    assert!(!map.is_valid_position(cells[3].row, cells[3].col));
    assert!(!map.contains_world(waypoints[3]));
}

#[test]
fn config_file_builds_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.yaml");
    std::fs::write(
        &path,
        "rows: 8\ncols: 4\nresolution: 0.25\norigin: [2.0, -1.0]\n\
         default_cell_type: traversable\nname: config_map\n",
    )
    .unwrap();

    let config = GridConfig::from_yaml_file(&path).unwrap();
    let map = GridMap::from_config(&config).unwrap();
    assert_eq!((map.rows(), map.cols()), (8, 4));
    assert_eq!(map.name(), "config_map");
    assert_eq!(map.count_cells_of_type(CellType::Traversable), 32);

    let bounds = map.world_bounds();
    assert_eq!(bounds.x_min, 2.0);
    assert_eq!(bounds.x_max, 3.0);
    assert_eq!(bounds.y_min, -1.0);
    assert_eq!(bounds.y_max, 1.0);

    let saved = map.save(dir.path().join("maps")).unwrap();
    assert_eq!(GridMap::open(saved).unwrap(), map);
}
