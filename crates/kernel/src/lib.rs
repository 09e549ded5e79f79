pub mod error;
pub mod geometry;

// Re-export the evaluation surface at crate root for convenience.
pub use error::{Axis, KernelError};
pub use geometry::bernstein::{bernstein, binomial, BasisTable};
pub use geometry::bezier::{curve_point, evaluate, evaluate_curve, evaluate_surface, surface_point};
pub use geometry::grid::{clamp_dimension, Clamped, ControlGrid, CurveGrid, GridKind, SurfaceGrid, MAX_DIMENSION};
pub use geometry::point::Point3d;

/// Tolerance configuration for comparing evaluated geometry.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are considered coincident.
    pub coincidence: f64,
    /// Allowed drift of a basis sum away from 1.0.
    pub partition: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            partition: 1e-12,
        }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) < self.coincidence
    }

    /// Whether two grids hold the same points, in the same layout, within tolerance.
    pub fn grids_coincident(&self, a: &ControlGrid, b: &ControlGrid) -> bool {
        match (a, b) {
            (ControlGrid::Curve(a), ControlGrid::Curve(b)) => {
                a.len() == b.len()
                    && a.points().iter().zip(b.points()).all(|(p, q)| self.points_coincident(p, q))
            }
            (ControlGrid::Surface(a), ControlGrid::Surface(b)) => {
                a.num_u() == b.num_u()
                    && a.num_v() == b.num_v()
                    && a.points().iter().zip(b.points()).all(|(p, q)| self.points_coincident(p, q))
            }
            _ => false,
        }
    }

    pub fn is_partition_of_unity(&self, sum: f64) -> bool {
        (sum - 1.0).abs() < self.partition
    }
}

pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
