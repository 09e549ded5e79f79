use serde::{Deserialize, Serialize};
use tracing::warn;

use super::point::Point3d;
use crate::error::{Axis, KernelError};

/// Maximum number of points along any axis of a grid, for control points and
/// tessellated samples alike.
pub const MAX_DIMENSION: usize = 256;

/// A value produced under the dimension bound, with any truncation that was
/// applied to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct Clamped<T> {
    pub value: T,
    /// One `KernelError::DimensionOverflow` per truncated axis.
    pub overflow: Vec<KernelError>,
}

impl<T> Clamped<T> {
    pub fn exact(value: T) -> Self {
        Self {
            value,
            overflow: Vec::new(),
        }
    }

    pub fn is_exact(&self) -> bool {
        self.overflow.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Clamped<U> {
        Clamped {
            value: f(self.value),
            overflow: self.overflow,
        }
    }
}

/// Clamp a requested point count to [`MAX_DIMENSION`].
pub fn clamp_dimension(axis: Axis, requested: usize) -> (usize, Option<KernelError>) {
    if requested > MAX_DIMENSION {
        warn!(%axis, requested, max = MAX_DIMENSION, "dimension clamped");
        (
            MAX_DIMENSION,
            Some(KernelError::DimensionOverflow {
                axis,
                requested,
                max: MAX_DIMENSION,
            }),
        )
    } else {
        (requested, None)
    }
}

/// Discriminant of a [`ControlGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridKind {
    Curve,
    Surface,
}

/// An ordered run of points: the control polygon of a Bezier curve, or the
/// samples of a tessellated one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveGrid {
    points: Vec<Point3d>,
}

impl CurveGrid {
    /// Build a curve grid, truncating to [`MAX_DIMENSION`] points.
    pub fn new(points: Vec<Point3d>) -> Self {
        Self::clamped(points).value
    }

    /// Build a curve grid, reporting any truncation.
    pub fn clamped(mut points: Vec<Point3d>) -> Clamped<Self> {
        let (kept, overflow) = clamp_dimension(Axis::U, points.len());
        points.truncate(kept);
        Clamped {
            value: Self { points },
            overflow: overflow.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polynomial degree (point count minus one), `None` for an empty grid.
    pub fn degree(&self) -> Option<usize> {
        self.points.len().checked_sub(1)
    }

    pub fn get(&self, i: usize) -> Option<&Point3d> {
        self.points.get(i)
    }

    pub fn points(&self) -> &[Point3d] {
        &self.points
    }

    pub fn first(&self) -> Option<&Point3d> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3d> {
        self.points.last()
    }
}

/// A rectangular `num_u × num_v` grid of points in one contiguous buffer.
///
/// Storage is row-major by the u index: point `(i, j)` lives at
/// `i * num_v + j`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceGrid {
    points: Vec<Point3d>,
    num_u: usize,
    num_v: usize,
}

impl SurfaceGrid {
    /// Build a surface grid from row-major points, truncating each axis to
    /// [`MAX_DIMENSION`].
    pub fn new(num_u: usize, num_v: usize, points: Vec<Point3d>) -> Self {
        Self::clamped(num_u, num_v, points).value
    }

    /// Build a surface grid from row-major points, reporting any truncation.
    pub fn clamped(num_u: usize, num_v: usize, points: Vec<Point3d>) -> Clamped<Self> {
        assert_eq!(
            points.len(),
            num_u * num_v,
            "surface grid must hold num_u * num_v points"
        );
        let (kept_u, overflow_u) = clamp_dimension(Axis::U, num_u);
        let (kept_v, overflow_v) = clamp_dimension(Axis::V, num_v);
        let overflow: Vec<KernelError> = overflow_u.into_iter().chain(overflow_v).collect();

        if overflow.is_empty() {
            return Clamped::exact(Self {
                points,
                num_u,
                num_v,
            });
        }

        let mut kept = Vec::with_capacity(kept_u * kept_v);
        for row in points.chunks(num_v.max(1)).take(kept_u) {
            kept.extend_from_slice(&row[..kept_v]);
        }
        Clamped {
            value: Self {
                points: kept,
                num_u: kept_u,
                num_v: kept_v,
            },
            overflow,
        }
    }

    /// Build a surface grid from column-major points: point `k` lands at
    /// `(k % num_u, k / num_u)`.
    pub fn from_column_major(num_u: usize, num_v: usize, points: Vec<Point3d>) -> Clamped<Self> {
        assert_eq!(
            points.len(),
            num_u * num_v,
            "surface grid must hold num_u * num_v points"
        );
        let mut row_major = vec![Point3d::ORIGIN; points.len()];
        for (k, p) in points.into_iter().enumerate() {
            let (i, j) = (k % num_u, k / num_u);
            row_major[i * num_v + j] = p;
        }
        Self::clamped(num_u, num_v, row_major)
    }

    /// Build a grid by evaluating `f(i, j)` for every cell.
    pub fn from_fn(num_u: usize, num_v: usize, mut f: impl FnMut(usize, usize) -> Point3d) -> Self {
        let mut points = Vec::with_capacity(num_u * num_v);
        for i in 0..num_u {
            for j in 0..num_v {
                points.push(f(i, j));
            }
        }
        Self::new(num_u, num_v, points)
    }

    pub fn num_u(&self) -> usize {
        self.num_u
    }

    pub fn num_v(&self) -> usize {
        self.num_v
    }

    pub fn degree_u(&self) -> Option<usize> {
        self.num_u.checked_sub(1)
    }

    pub fn degree_v(&self) -> Option<usize> {
        self.num_v.checked_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Point3d> {
        if i < self.num_u && j < self.num_v {
            self.points.get(i * self.num_v + j)
        } else {
            None
        }
    }

    pub fn points(&self) -> &[Point3d] {
        &self.points
    }

    /// Points with u index `i`, ordered by v.
    pub fn row(&self, i: usize) -> Option<&[Point3d]> {
        if i < self.num_u {
            Some(&self.points[i * self.num_v..(i + 1) * self.num_v])
        } else {
            None
        }
    }

    /// Points with v index `j`, ordered by u.
    pub fn column(&self, j: usize) -> impl Iterator<Item = &Point3d> {
        let stride = self.num_v;
        let take = if j < self.num_v { self.num_u } else { 0 };
        self.points.iter().skip(j).step_by(stride.max(1)).take(take)
    }

    /// Corner points in the order `(0,0), (n,0), (0,m), (n,m)`.
    pub fn corners(&self) -> Option<[Point3d; 4]> {
        let n = self.degree_u()?;
        let m = self.degree_v()?;
        Some([
            *self.get(0, 0)?,
            *self.get(n, 0)?,
            *self.get(0, m)?,
            *self.get(n, m)?,
        ])
    }
}

/// Control points (or tessellated samples) of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ControlGrid {
    Curve(CurveGrid),
    Surface(SurfaceGrid),
}

impl ControlGrid {
    pub fn kind(&self) -> GridKind {
        match self {
            ControlGrid::Curve(_) => GridKind::Curve,
            ControlGrid::Surface(_) => GridKind::Surface,
        }
    }

    pub fn point_count(&self) -> usize {
        self.points().len()
    }

    pub fn points(&self) -> &[Point3d] {
        match self {
            ControlGrid::Curve(c) => c.points(),
            ControlGrid::Surface(s) => s.points(),
        }
    }

    pub fn as_curve(&self) -> Option<&CurveGrid> {
        match self {
            ControlGrid::Curve(c) => Some(c),
            ControlGrid::Surface(_) => None,
        }
    }

    pub fn as_surface(&self) -> Option<&SurfaceGrid> {
        match self {
            ControlGrid::Surface(s) => Some(s),
            ControlGrid::Curve(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3d {
        Point3d::new(x, y, 0.0)
    }

    #[test]
    fn test_curve_degree_and_access() {
        let c = CurveGrid::new(vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.degree(), Some(2));
        assert_eq!(c.get(1), Some(&p(1.0, 1.0)));
        assert_eq!(c.get(3), None);
        assert_eq!(CurveGrid::new(vec![]).degree(), None);
    }

    #[test]
    fn test_curve_truncates_to_bound() {
        let points = vec![Point3d::ORIGIN; MAX_DIMENSION + 10];
        let clamped = CurveGrid::clamped(points);
        assert_eq!(clamped.value.len(), MAX_DIMENSION);
        assert_eq!(
            clamped.overflow,
            vec![KernelError::DimensionOverflow {
                axis: Axis::U,
                requested: MAX_DIMENSION + 10,
                max: MAX_DIMENSION,
            }]
        );
    }

    #[test]
    fn test_curve_at_bound_is_exact() {
        let clamped = CurveGrid::clamped(vec![Point3d::ORIGIN; MAX_DIMENSION]);
        assert!(clamped.is_exact());
    }

    #[test]
    fn test_surface_column_major_layout() {
        // 2 x 2 unit square, listed column-major.
        let s = SurfaceGrid::from_column_major(
            2,
            2,
            vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)],
        )
        .value;
        assert_eq!(s.get(0, 0), Some(&p(0.0, 0.0)));
        assert_eq!(s.get(1, 0), Some(&p(1.0, 0.0)));
        assert_eq!(s.get(0, 1), Some(&p(0.0, 1.0)));
        assert_eq!(s.get(1, 1), Some(&p(1.0, 1.0)));
        assert_eq!(s.get(2, 0), None);
    }

    #[test]
    fn test_surface_rectangular_column_major() {
        // num_u = 3, num_v = 2: k -> (k % 3, k / 3)
        let points: Vec<Point3d> = (0..6).map(|k| p(k as f64, 0.0)).collect();
        let s = SurfaceGrid::from_column_major(3, 2, points).value;
        assert_eq!(s.num_u(), 3);
        assert_eq!(s.num_v(), 2);
        assert_eq!(s.get(2, 0), Some(&p(2.0, 0.0)));
        assert_eq!(s.get(0, 1), Some(&p(3.0, 0.0)));
        assert_eq!(s.get(2, 1), Some(&p(5.0, 0.0)));
    }

    #[test]
    fn test_surface_rows_and_columns() {
        let s = SurfaceGrid::from_fn(3, 2, |i, j| p(i as f64, j as f64));
        assert_eq!(s.row(1), Some(&[p(1.0, 0.0), p(1.0, 1.0)][..]));
        assert_eq!(s.row(3), None);
        let col: Vec<Point3d> = s.column(1).copied().collect();
        assert_eq!(col, vec![p(0.0, 1.0), p(1.0, 1.0), p(2.0, 1.0)]);
        assert_eq!(s.column(2).count(), 0);
    }

    #[test]
    fn test_surface_truncates_both_axes() {
        let n = MAX_DIMENSION + 1;
        let m = 2;
        let clamped = SurfaceGrid::clamped(n, m, vec![Point3d::ORIGIN; n * m]);
        assert_eq!(clamped.value.num_u(), MAX_DIMENSION);
        assert_eq!(clamped.value.num_v(), 2);
        assert_eq!(clamped.value.points().len(), MAX_DIMENSION * 2);
        assert_eq!(clamped.overflow.len(), 1);
    }

    #[test]
    fn test_surface_corners() {
        let s = SurfaceGrid::from_fn(3, 4, |i, j| p(i as f64, j as f64));
        let corners = s.corners().unwrap();
        assert_eq!(corners, [p(0.0, 0.0), p(2.0, 0.0), p(0.0, 3.0), p(2.0, 3.0)]);
        assert!(SurfaceGrid::new(0, 0, vec![]).corners().is_none());
    }

    #[test]
    #[should_panic(expected = "num_u * num_v")]
    fn test_surface_count_mismatch_panics() {
        let _ = SurfaceGrid::new(2, 2, vec![Point3d::ORIGIN; 3]);
    }

    #[test]
    fn test_control_grid_kind() {
        let c = ControlGrid::Curve(CurveGrid::new(vec![Point3d::ORIGIN]));
        assert_eq!(c.kind(), GridKind::Curve);
        assert!(c.as_curve().is_some());
        assert!(c.as_surface().is_none());
        assert_eq!(c.point_count(), 1);
    }
}
