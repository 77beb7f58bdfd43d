//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes the context string, expected and actual values.

use feature_host::DocumentObject;
use shape_kernel::{KernelBundle, KernelSolidHandle};

use crate::helpers::{inches_to_mm, HarnessError};

/// Assert three values match within an absolute tolerance.
pub fn assert_close3(actual: [f64; 3], expected: [f64; 3], tol: f64, ctx: &str) -> Result<(), HarnessError> {
    for i in 0..3 {
        if (actual[i] - expected[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] component {}: expected {:.4}, got {:.4} (tol={})",
                    ctx, i, expected[i], actual[i], tol,
                ),
            });
        }
    }
    Ok(())
}

/// Assert a solid is the box from the origin to `dims_in` (inches).
pub fn assert_box_inches(
    kb: &dyn KernelBundle,
    solid: &KernelSolidHandle,
    dims_in: [f64; 3],
    tol_mm: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bbox = kb
        .as_introspect()
        .bounding_box(solid)
        .ok_or_else(|| HarnessError::AssertionFailed {
            detail: format!("[{}] solid {:?} has no bounding box", ctx, solid),
        })?;
    assert_close3(
        [bbox[0], bbox[1], bbox[2]],
        [0.0; 3],
        tol_mm,
        &format!("{ctx} bbox min (mm)"),
    )?;
    assert_close3(
        [bbox[3], bbox[4], bbox[5]],
        dims_in.map(inches_to_mm),
        tol_mm,
        &format!("{ctx} bbox max (mm)"),
    )
}

/// Assert exact topology counts (V, E, F) for a solid.
pub fn assert_topology_eq(
    kb: &dyn KernelBundle,
    solid: &KernelSolidHandle,
    expected: (usize, usize, usize),
    ctx: &str,
) -> Result<(), HarnessError> {
    let introspect = kb.as_introspect();
    let actual = (
        introspect.list_vertices(solid).len(),
        introspect.list_edges(solid).len(),
        introspect.list_faces(solid).len(),
    );
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected V={} E={} F={}, got V={} E={} F={}",
                ctx, expected.0, expected.1, expected.2, actual.0, actual.1, actual.2,
            ),
        })
    }
}

pub fn assert_label(obj: &DocumentObject, expected: &str) -> Result<(), HarnessError> {
    if obj.label() == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected label {:?}, got {:?}",
                obj.data.name(),
                expected,
                obj.label(),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_kernel::{Kernel, MockKernel};

    #[test]
    fn close3_reports_component() {
        let err = assert_close3([1.0, 2.0, 3.5], [1.0, 2.0, 3.0], 1e-6, "ctx").unwrap_err();
        assert!(err.to_string().contains("component 2"), "{err}");
    }

    #[test]
    fn stud_box_passes() {
        let mut k = MockKernel::new();
        let h = k.make_box(2438.4, 88.9, 38.1).unwrap();
        assert_box_inches(&k, &h, [96.0, 3.5, 1.5], 1e-6, "stud").unwrap();
        assert_topology_eq(&k, &h, (8, 12, 6), "stud").unwrap();
        assert!(assert_box_inches(&k, &h, [96.0, 5.5, 1.5], 1e-6, "stud").is_err());
    }
}
