use bezier_kernel::{ControlGrid, GridKind, evaluate};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::TessellationConfig;
use crate::errors::ShapeError;
use crate::report::LoadReport;

/// One shape of a scene together with the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    line: usize,
    grid: ControlGrid,
}

impl Shape {
    pub fn new(line: usize, grid: ControlGrid) -> Self {
        Self { line, grid }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> GridKind {
        self.grid.kind()
    }

    pub fn grid(&self) -> &ControlGrid {
        &self.grid
    }
}

/// Tessellated shapes in file order, ready for display.
///
/// A scene is never edited in place: a reload or a change of divisions
/// builds a new one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn kinds(&self) -> Vec<GridKind> {
        self.shapes.iter().map(Shape::kind).collect()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

/// Raw control grids parsed from a scene file, kept so the scene can be
/// re-tessellated at a new density without re-reading the file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneSource {
    shapes: Vec<Shape>,
}

impl SceneSource {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Evaluate every raw shape at the configured divisions.
    ///
    /// Shapes that fail to evaluate are skipped and reported; the rest keep
    /// their source order.
    #[instrument(skip(self), fields(shapes = self.shapes.len()))]
    pub fn tessellate(&self, config: &TessellationConfig) -> (Scene, LoadReport) {
        let divisions = config.divisions.get();
        let results = evaluate_all(&self.shapes, divisions);

        let mut scene = Scene::empty();
        let mut report = LoadReport::default();
        for (raw, result) in self.shapes.iter().zip(results) {
            match result {
                Ok(grid) => scene.shapes.push(Shape::new(raw.line, grid)),
                Err(err) => {
                    warn!(line = raw.line, error = %err, "skipping shape that failed to evaluate");
                    report.record_failure(raw.line, ShapeError::from(err));
                }
            }
        }

        info!(
            divisions,
            shapes = scene.len(),
            skipped = report.failures.len(),
            "scene tessellated"
        );
        (scene, report)
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(
    shapes: &[Shape],
    divisions: usize,
) -> Vec<Result<ControlGrid, bezier_kernel::KernelError>> {
    shapes.iter().map(|s| evaluate(&s.grid, divisions)).collect()
}

#[cfg(feature = "parallel")]
fn evaluate_all(
    shapes: &[Shape],
    divisions: usize,
) -> Vec<Result<ControlGrid, bezier_kernel::KernelError>> {
    use rayon::prelude::*;
    shapes.par_iter().map(|s| evaluate(&s.grid, divisions)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bezier_kernel::{CurveGrid, KernelError, Point3d, SurfaceGrid};

    fn raw_source() -> SceneSource {
        SceneSource::new(vec![
            Shape::new(
                1,
                ControlGrid::Curve(CurveGrid::new(vec![
                    Point3d::new(0.0, 0.0, 0.0),
                    Point3d::new(1.0, 0.0, 0.0),
                ])),
            ),
            Shape::new(2, ControlGrid::Curve(CurveGrid::new(vec![]))),
            Shape::new(
                4,
                ControlGrid::Surface(SurfaceGrid::new(1, 1, vec![Point3d::ORIGIN])),
            ),
        ])
    }

    #[test]
    fn test_tessellate_keeps_order_and_skips_failures() {
        let (scene, report) = raw_source().tessellate(&TessellationConfig::with_divisions(4));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.kinds(), vec![GridKind::Curve, GridKind::Surface]);
        assert_eq!(scene.get(0).unwrap().line(), 1);
        assert_eq!(scene.get(1).unwrap().line(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line, 2);
        assert_eq!(
            report.failures[0].error,
            ShapeError::Eval(KernelError::EmptyInput {
                axis: bezier_kernel::Axis::U
            })
        );
    }

    #[test]
    fn test_tessellate_uses_configured_divisions() {
        let (scene, _) = raw_source().tessellate(&TessellationConfig::with_divisions(10));
        assert_eq!(scene.get(0).unwrap().grid().point_count(), 11);
        assert_eq!(scene.get(1).unwrap().grid().point_count(), 11 * 11);
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::empty();
        assert!(scene.is_empty());
        assert_eq!(scene.iter().count(), 0);
        assert!(scene.get(0).is_none());
        let (scene, report) = SceneSource::default().tessellate(&TessellationConfig::default());
        assert!(scene.is_empty());
        assert!(report.is_clean());
    }
}
