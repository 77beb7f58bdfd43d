//! Lumber scenarios against TruckKernel (real B-rep geometry).

use lumber_types::NominalSize;
use test_harness::LumberBuilder;

#[test]
fn test_truck_default_stud() {
    let mut m = LumberBuilder::truck();
    m.make_lumber("stud").unwrap();

    m.assert_box_inches("stud", 96.0, 3.5, 1.5).unwrap();
    assert_eq!(m.topology_counts("stud").unwrap(), (8, 12, 6));

    let mesh = m.tessellate("stud").unwrap();
    assert!(mesh.triangle_count() >= 12);
    let (min, max) = test_harness::helpers::mesh_bounding_box(&mesh);
    assert!(min.iter().all(|v| v.abs() < 1e-3));
    assert!((max[0] - 2438.4).abs() < 1e-2);
}

#[test]
fn test_truck_every_size() {
    let mut m = LumberBuilder::truck();
    m.make_lumber("board").unwrap();
    for size in NominalSize::ALL {
        m.set_size("board", size.code()).unwrap();
        m.assert_box_inches(
            "board",
            96.0,
            size.actual_width_inches(),
            size.actual_height_inches(),
        )
        .unwrap();
    }
    m.assert_all_valid().unwrap();
}

#[test]
fn test_truck_undo_restores_shape() {
    let mut m = LumberBuilder::truck();
    m.make_lumber("post").unwrap();
    m.set_size("post", "6x6").unwrap();
    m.assert_box_inches("post", 96.0, 5.5, 5.5).unwrap();
    m.undo().unwrap();
    m.assert_box_inches("post", 96.0, 3.5, 1.5).unwrap();
}
