//! magfield3 → magfield2 coil transformation

use crate::coil::{SourceCoil, TargetCoil};

impl TargetCoil {
    /// Convert a single magfield3 coil
    pub fn from_source(coil: &SourceCoil) -> Self {
        let sum = coil.endpoint_a + coil.endpoint_b;
        let midpoint = sum / 2.0;

        // Sign comes from the raw sums: any negative component flips it
        let mut axial_position = midpoint.norm();
        if sum.iter().any(|&s| s < 0.0) {
            axial_position = -axial_position;
        }

        let wall_thickness = coil.outer_radius - coil.inner_radius;
        let length = coil.axis().norm();

        Self {
            axial_position,
            inner_radius: coil.inner_radius,
            wall_thickness,
            length,
            total_current: coil.current_density * wall_thickness * length,
        }
    }
}

/// Convert every coil, preserving order
pub fn convert(coils: &[SourceCoil]) -> Vec<TargetCoil> {
    coils.iter().map(TargetCoil::from_source).collect()
}
