//! Primitive builders on top of truck's sweep API.
//!
//! truck has no built-in box; it is three successive translational sweeps.

use truck_modeling::builder;
use truck_modeling::topology::Solid;
use truck_modeling::{Point3, Vector3};

/// Create a box solid via successive translational sweeps.
/// Origin at (0,0,0), extends to (x,y,z).
pub fn make_box(x: f64, y: f64, z: f64) -> Solid {
    let v = builder::vertex(Point3::new(0.0, 0.0, 0.0));
    let edge = builder::tsweep(&v, Vector3::new(x, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, y, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, z))
}
