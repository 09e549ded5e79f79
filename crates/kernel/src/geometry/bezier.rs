use tracing::{debug, instrument, warn};

use super::bernstein::{BasisTable, bernstein};
use super::grid::{ControlGrid, CurveGrid, MAX_DIMENSION, SurfaceGrid};
use super::point::Point3d;
use crate::error::{Axis, KernelError};

/// Validate a division count and clamp it so the output stays within
/// [`MAX_DIMENSION`] points per axis.
fn checked_divisions(divisions: usize) -> Result<usize, KernelError> {
    if divisions == 0 {
        return Err(KernelError::invalid_parameter(
            "divisions must be at least 1",
        ));
    }
    let max = MAX_DIMENSION - 1;
    if divisions > max {
        warn!(divisions, max, "divisions clamped");
        return Ok(max);
    }
    Ok(divisions)
}

/// Tessellate a Bezier curve into `divisions + 1` evenly spaced samples.
///
/// Sample `t` lies at parameter `t / divisions`; the first and last samples
/// equal the first and last control points exactly.
#[instrument(skip(grid), fields(points = grid.len()))]
pub fn evaluate_curve(grid: &CurveGrid, divisions: usize) -> Result<CurveGrid, KernelError> {
    let divisions = checked_divisions(divisions)?;
    let degree = grid.degree().ok_or(KernelError::EmptyInput { axis: Axis::U })?;
    let control = grid.points();

    let table = BasisTable::new(degree, divisions);
    let samples: Vec<Point3d> = (0..=divisions)
        .map(|t| {
            table
                .at(t)
                .iter()
                .zip(control)
                .fold(Point3d::ORIGIN, |acc, (&b, &cp)| acc + cp * b)
        })
        .collect();

    debug!(degree, samples = samples.len(), "curve evaluated");
    Ok(CurveGrid::new(samples))
}

/// Tessellate a tensor-product Bezier surface into a square
/// `(divisions + 1) × (divisions + 1)` grid of samples.
///
/// The control grid may be rectangular; the output is always square.
#[instrument(skip(grid), fields(num_u = grid.num_u(), num_v = grid.num_v()))]
pub fn evaluate_surface(grid: &SurfaceGrid, divisions: usize) -> Result<SurfaceGrid, KernelError> {
    let divisions = checked_divisions(divisions)?;
    let degree_u = grid.degree_u().ok_or(KernelError::EmptyInput { axis: Axis::U })?;
    let degree_v = grid.degree_v().ok_or(KernelError::EmptyInput { axis: Axis::V })?;

    let table_u = BasisTable::new(degree_u, divisions);
    let table_v = BasisTable::new(degree_v, divisions);
    let side = divisions + 1;

    let out = SurfaceGrid::from_fn(side, side, |u, v| {
        let bu = table_u.at(u);
        let bv = table_v.at(v);
        let mut p = Point3d::ORIGIN;
        for (i, &wi) in bu.iter().enumerate() {
            // row(i) is always present for i <= degree_u.
            let Some(row) = grid.row(i) else { continue };
            for (&cp, &wj) in row.iter().zip(bv) {
                p += cp * (wi * wj);
            }
        }
        p
    });

    debug!(degree_u, degree_v, side, "surface evaluated");
    Ok(out)
}

/// Tessellate any control grid, dispatching on its kind.
pub fn evaluate(grid: &ControlGrid, divisions: usize) -> Result<ControlGrid, KernelError> {
    match grid {
        ControlGrid::Curve(c) => evaluate_curve(c, divisions).map(ControlGrid::Curve),
        ControlGrid::Surface(s) => evaluate_surface(s, divisions).map(ControlGrid::Surface),
    }
}

fn check_parameter(name: &str, value: f64) -> Result<(), KernelError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(KernelError::invalid_parameter(format!(
            "{name} = {value} is outside [0, 1]"
        )))
    }
}

/// Evaluate a Bezier curve at a single parameter `u` in `[0, 1]`.
pub fn curve_point(grid: &CurveGrid, u: f64) -> Result<Point3d, KernelError> {
    check_parameter("u", u)?;
    let n = grid.degree().ok_or(KernelError::EmptyInput { axis: Axis::U })?;
    Ok(grid
        .points()
        .iter()
        .enumerate()
        .fold(Point3d::ORIGIN, |acc, (i, &cp)| acc + cp * bernstein(n, i, u)))
}

/// Evaluate a Bezier surface at a single parameter pair `(u, v)` in `[0, 1]²`.
pub fn surface_point(grid: &SurfaceGrid, u: f64, v: f64) -> Result<Point3d, KernelError> {
    check_parameter("u", u)?;
    check_parameter("v", v)?;
    let n = grid.degree_u().ok_or(KernelError::EmptyInput { axis: Axis::U })?;
    let m = grid.degree_v().ok_or(KernelError::EmptyInput { axis: Axis::V })?;

    let mut p = Point3d::ORIGIN;
    for i in 0..=n {
        let bi = bernstein(n, i, u);
        for j in 0..=m {
            if let Some(&cp) = grid.get(i, j) {
                p += cp * (bi * bernstein(m, j, v));
            }
        }
    }
    Ok(p)
}
