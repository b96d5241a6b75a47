//! Coil records for the magfield3 (source) and magfield2 (target) formats

use nalgebra::Vector3;
use serde::Serialize;

/// Number of leading columns a magfield3 data line must carry.
pub const SOURCE_COLUMNS: usize = 9;

/// A magfield3 coil: a solenoid segment between two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCoil {
    /// Current per unit cross-section
    pub current_density: f64,
    /// Start of the coil axis
    pub endpoint_a: Vector3<f64>,
    /// End of the coil axis
    pub endpoint_b: Vector3<f64>,
    pub inner_radius: f64,
    /// Expected to be >= `inner_radius`, not checked
    pub outer_radius: f64,
}

/// A magfield2 coil: positioned along a single common axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetCoil {
    /// Signed distance along the stack axis to the coil midpoint
    pub axial_position: f64,
    pub inner_radius: f64,
    pub wall_thickness: f64,
    pub length: f64,
    pub total_current: f64,
}

/// Ordered coils as read from file; the first entry is the colinearity reference.
pub type CoilSet = Vec<SourceCoil>;

impl SourceCoil {
    /// Build from the leading columns of a magfield3 data line
    ///
    /// `columns` must hold at least [`SOURCE_COLUMNS`] values; extra values are ignored.
    pub fn from_columns(columns: &[f64]) -> Option<Self> {
        match columns {
            [j, ax, ay, az, bx, by, bz, r_in, r_out, ..] => Some(Self {
                current_density: *j,
                endpoint_a: Vector3::new(*ax, *ay, *az),
                endpoint_b: Vector3::new(*bx, *by, *bz),
                inner_radius: *r_in,
                outer_radius: *r_out,
            }),
            _ => None,
        }
    }

    /// Axis vector from `endpoint_a` to `endpoint_b`
    pub fn axis(&self) -> Vector3<f64> {
        self.endpoint_b - self.endpoint_a
    }
}

impl TargetCoil {
    /// The five output columns in magfield2 order
    pub fn columns(&self) -> [f64; 5] {
        [
            self.axial_position,
            self.inner_radius,
            self.wall_thickness,
            self.length,
            self.total_current,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_ignores_extras() {
        let columns = [2.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.5, 0.75, 99.0];
        let coil = SourceCoil::from_columns(&columns).unwrap();
        assert_eq!(coil.current_density, 2.0);
        assert_eq!(coil.endpoint_a, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(coil.endpoint_b, Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(coil.inner_radius, 0.5);
        assert_eq!(coil.outer_radius, 0.75);
        assert_eq!(coil.axis(), Vector3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_from_columns_too_short() {
        assert!(SourceCoil::from_columns(&[1.0; 8]).is_none());
    }
}
