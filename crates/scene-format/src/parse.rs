//! Line-oriented scene text format.
//!
//! One shape per non-blank line, tokens separated by whitespace:
//!
//! ```text
//! curve <n> <x0> <y0> <z0> ... <x(n-1)> <y(n-1)> <z(n-1)>
//! surface <n> <m> <p0> ... <p(n*m-1)>
//! ```
//!
//! `n` and `m` are point counts, not degrees. Surface points are listed
//! column-major: point `k` sits at grid position `(k mod n, k div n)`.

use bezier_kernel::{Clamped, ControlGrid, CurveGrid, KernelError, Point3d, SurfaceGrid};
use tracing::{debug, info, instrument, warn};

use crate::config::TessellationConfig;
use crate::errors::ShapeError;
use crate::report::LoadReport;
use crate::scene::{Scene, SceneSource, Shape};

pub const CURVE_KEYWORD: &str = "curve";
pub const SURFACE_KEYWORD: &str = "surface";

/// Parse one non-blank line into its raw control grid.
pub fn parse_shape(line: &str) -> Result<Clamped<ControlGrid>, ShapeError> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens
        .next()
        .ok_or_else(|| ShapeError::malformed("line is blank"))?;

    let shape = match keyword {
        CURVE_KEYWORD => {
            let n = parse_count(tokens.next(), "point count")?;
            let points = parse_points(&mut tokens, n)?;
            CurveGrid::clamped(points).map(ControlGrid::Curve)
        }
        SURFACE_KEYWORD => {
            let n = parse_count(tokens.next(), "u point count")?;
            let m = parse_count(tokens.next(), "v point count")?;
            let total = n.checked_mul(m).ok_or_else(|| {
                KernelError::invalid_parameter(format!("surface size {n} x {m} is too large"))
            })?;
            let points = parse_points(&mut tokens, total)?;
            SurfaceGrid::from_column_major(n, m, points).map(ControlGrid::Surface)
        }
        other => {
            return Err(ShapeError::UnrecognizedShape {
                keyword: other.to_string(),
            });
        }
    };

    let extra = tokens.count();
    if extra > 0 {
        debug!(extra, "ignoring tokens after the declared control points");
    }
    Ok(shape)
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize, ShapeError> {
    let token = token.ok_or_else(|| ShapeError::malformed(format!("missing {what}")))?;
    let value: i64 = token
        .parse()
        .map_err(|_| ShapeError::malformed(format!("{what} {token:?} is not an integer")))?;
    usize::try_from(value).map_err(|_| {
        ShapeError::Eval(KernelError::invalid_parameter(format!(
            "{what} must not be negative, got {value}"
        )))
    })
}

fn parse_coordinate(token: &str) -> Result<f64, ShapeError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ShapeError::malformed(format!(
            "coordinate {token:?} is not a finite number"
        ))),
    }
}

fn parse_points<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    count: usize,
) -> Result<Vec<Point3d>, ShapeError> {
    // No capacity hint: the count comes straight from the file.
    let mut points = Vec::new();
    for k in 0..count {
        let mut xyz = [0.0; 3];
        for c in &mut xyz {
            let token = tokens.next().ok_or_else(|| {
                ShapeError::malformed(format!(
                    "expected {count} control points, found {k} complete"
                ))
            })?;
            *c = parse_coordinate(token)?;
        }
        points.push(Point3d::from_array(xyz));
    }
    Ok(points)
}

/// Parse a whole scene text into raw control grids.
///
/// Bad lines are skipped and reported; they never abort the rest of the file.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_source(text: &str) -> (SceneSource, LoadReport) {
    let mut shapes = Vec::new();
    let mut report = LoadReport::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        match parse_shape(line) {
            Ok(Clamped { value, overflow }) => {
                for o in overflow {
                    report.record_overflow(line_no, o);
                }
                debug!(line = line_no, kind = ?value.kind(), points = value.point_count(), "parsed shape");
                shapes.push(Shape::new(line_no, value));
            }
            Err(err) => {
                warn!(line = line_no, error = %err, "skipping line");
                report.record_failure(line_no, err);
            }
        }
    }

    info!(
        shapes = shapes.len(),
        skipped = report.failures.len(),
        "scene text parsed"
    );
    (SceneSource::new(shapes), report)
}

/// Parse a scene text and tessellate every shape.
pub fn parse_scene(text: &str, config: &TessellationConfig) -> (Scene, LoadReport) {
    let (source, mut report) = parse_source(text);
    let (scene, eval_report) = source.tessellate(config);
    report.merge(eval_report);
    (scene, report)
}
