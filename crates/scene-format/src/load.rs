use std::path::Path;

use tracing::{info, instrument};

use crate::config::TessellationConfig;
use crate::errors::LoadError;
use crate::parse::parse_source;
use crate::report::LoadReport;
use crate::scene::{Scene, SceneSource};

/// Read a scene file and parse it into raw control grids.
///
/// The file is read once, in full, before anything is parsed.
#[instrument]
pub fn load_source(path: &Path) -> Result<(SceneSource, LoadReport), LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(bytes = text.len(), "scene file read");
    Ok(parse_source(&text))
}

/// Read, parse and tessellate a scene file.
///
/// Only an unreadable file is an error; bad lines and shapes are skipped and
/// listed in the returned report.
pub fn load_scene(
    path: &Path,
    config: &TessellationConfig,
) -> Result<(Scene, LoadReport), LoadError> {
    let (source, mut report) = load_source(path)?;
    let (scene, eval_report) = source.tessellate(config);
    report.merge(eval_report);
    Ok((scene, report))
}
