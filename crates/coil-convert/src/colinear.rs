//! Colinearity check of a coil set against its first coil's axis
//!
//! Every endpoint is measured from the *first coil's* `endpoint_a`, so the check
//! asks whether all endpoints lie on the reference axis, not merely whether each
//! coil points the same way.

use nalgebra::Vector3;

use crate::coil::SourceCoil;

/// Exact colinearity check (component-wise `==` on unit vectors)
pub fn is_colinear(coils: &[SourceCoil]) -> bool {
    is_colinear_within(coils, 0.0)
}

/// Colinearity check accepting a per-component difference up to `tolerance`
///
/// A `tolerance` of zero is exact float equality. An empty set is colinear.
pub fn is_colinear_within(coils: &[SourceCoil], tolerance: f64) -> bool {
    let Some(reference) = coils.first() else {
        return true;
    };

    // Zero-length reference gives NaN components, which never compare equal
    let direction = reference.axis() / reference.axis().norm();
    let origin = reference.endpoint_a;

    coils.iter().all(|coil| {
        [coil.endpoint_a, coil.endpoint_b].iter().all(|endpoint| {
            let offset = endpoint - origin;
            let norm = offset.norm();
            if norm == 0.0 {
                // Endpoint sits on the reference origin
                return aligned(&direction, &direction, tolerance);
            }
            let unit = offset / norm;
            aligned(&direction, &unit, tolerance) || aligned(&direction, &-unit, tolerance)
        })
    })
}

fn aligned(reference: &Vector3<f64>, candidate: &Vector3<f64>, tolerance: f64) -> bool {
    reference
        .iter()
        .zip(candidate.iter())
        .all(|(r, c)| r == c || (r - c).abs() <= tolerance)
}
