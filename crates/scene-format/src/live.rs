//! A scene bound to its file, reloadable and re-tessellatable.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{Divisions, TessellationConfig};
use crate::errors::LoadError;
use crate::load::load_source;
use crate::report::LoadReport;
use crate::scene::{Scene, SceneSource};

/// The scene currently on display, plus what is needed to rebuild it.
///
/// Readers take an `Arc<Scene>` snapshot. Every rebuild constructs a complete
/// new scene before swapping it in, so a snapshot never changes under its
/// holder.
pub struct LiveScene {
    path: PathBuf,
    config: TessellationConfig,
    /// Raw control grids from the last successful read.
    source: SceneSource,
    /// Diagnostics from parsing `source`; they outlive re-tessellation.
    parse_report: LoadReport,
    scene: Arc<Scene>,
    report: LoadReport,
}

impl LiveScene {
    /// Bind to a file without reading it; the scene starts empty.
    pub fn new(path: impl Into<PathBuf>, config: TessellationConfig) -> Self {
        Self {
            path: path.into(),
            config,
            source: SceneSource::default(),
            parse_report: LoadReport::default(),
            scene: Arc::new(Scene::empty()),
            report: LoadReport::default(),
        }
    }

    /// Bind to a file and load it immediately.
    pub fn open(path: impl Into<PathBuf>, config: TessellationConfig) -> Result<Self, LoadError> {
        let mut live = Self::new(path, config);
        live.reload()?;
        Ok(live)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> TessellationConfig {
        self.config
    }

    /// Snapshot of the current scene.
    pub fn scene(&self) -> Arc<Scene> {
        Arc::clone(&self.scene)
    }

    /// Diagnostics from the most recent rebuild.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Re-read and re-tessellate the file.
    ///
    /// If the file cannot be read the scene becomes empty and the error is
    /// returned.
    pub fn reload(&mut self) -> Result<&LoadReport, LoadError> {
        match load_source(&self.path) {
            Ok((source, parse_report)) => {
                self.source = source;
                self.parse_report = parse_report;
                self.retessellate();
                Ok(&self.report)
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "reload failed; clearing scene");
                self.source = SceneSource::default();
                self.parse_report = LoadReport::default();
                self.install(Scene::empty(), LoadReport::default());
                Err(err)
            }
        }
    }

    /// Change the tessellation density, re-evaluating the retained control
    /// grids without touching the file.
    pub fn set_divisions(&mut self, divisions: Divisions) -> &LoadReport {
        if divisions == self.config.divisions {
            return &self.report;
        }
        self.config.divisions = divisions;
        self.retessellate();
        &self.report
    }

    pub fn increase_divisions(&mut self) -> &LoadReport {
        self.set_divisions(self.config.divisions.increase())
    }

    pub fn decrease_divisions(&mut self) -> &LoadReport {
        self.set_divisions(self.config.divisions.decrease())
    }

    fn retessellate(&mut self) {
        let (scene, eval_report) = self.source.tessellate(&self.config);
        let mut report = self.parse_report.clone();
        report.merge(eval_report);
        self.install(scene, report);
    }

    fn install(&mut self, scene: Scene, report: LoadReport) {
        info!(
            shapes = scene.len(),
            divisions = self.config.divisions.get(),
            "scene swapped in"
        );
        self.scene = Arc::new(scene);
        self.report = report;
    }
}
