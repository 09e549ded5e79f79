//! Load a Bezier scene file and print its tessellated points as JSON.
//!
//! Usage: `scene_dump <scene-file> [--divisions N]`

use std::path::PathBuf;
use std::process::ExitCode;

use bezier_kernel::{ControlGrid, Point3d};
use scene_format::{load_scene, Scene, TessellationConfig};
use serde::Serialize;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct SceneDump {
    divisions: usize,
    shapes: Vec<ShapeDump>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ShapeDump {
    Curve {
        line: usize,
        points: Vec<[f64; 3]>,
    },
    Surface {
        line: usize,
        num_u: usize,
        num_v: usize,
        /// Row-major by u.
        points: Vec<[f64; 3]>,
    },
}

fn to_arrays(points: &[Point3d]) -> Vec<[f64; 3]> {
    points.iter().map(Point3d::to_array).collect()
}

fn dump(scene: &Scene, config: &TessellationConfig) -> SceneDump {
    let shapes = scene
        .iter()
        .map(|shape| match shape.grid() {
            ControlGrid::Curve(c) => ShapeDump::Curve {
                line: shape.line(),
                points: to_arrays(c.points()),
            },
            ControlGrid::Surface(s) => ShapeDump::Surface {
                line: shape.line(),
                num_u: s.num_u(),
                num_v: s.num_v(),
                points: to_arrays(s.points()),
            },
        })
        .collect();
    SceneDump {
        divisions: config.divisions.get(),
        shapes,
    }
}

struct Args {
    path: PathBuf,
    config: TessellationConfig,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut path = None;
    let mut config = TessellationConfig::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--divisions" | "-d" => {
                let value = args.next().ok_or("--divisions needs a value")?;
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("--divisions {value:?} is not a positive integer"))?;
                config = TessellationConfig::with_divisions(n);
            }
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument {arg:?}")),
        }
    }
    let path = path.ok_or("usage: scene_dump <scene-file> [--divisions N]")?;
    Ok(Args { path, config })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };

    let (scene, report) = match load_scene(&args.path, &args.config) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!(error = %err, "could not load scene");
            return ExitCode::FAILURE;
        }
    };
    if !report.is_clean() {
        warn!("{}", report.to_text().trim_end());
    }

    match serde_json::to_string(&dump(&scene, &args.config)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "could not serialize scene");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_format::parse_scene;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args_defaults() {
        let a = args(&["scene.txt"]).unwrap();
        assert_eq!(a.path, PathBuf::from("scene.txt"));
        assert_eq!(a.config.divisions.get(), 32);
    }

    #[test]
    fn test_parse_args_divisions() {
        let a = args(&["--divisions", "8", "scene.txt"]).unwrap();
        assert_eq!(a.config.divisions.get(), 8);
        assert!(args(&["scene.txt", "-d"]).is_err());
        assert!(args(&["scene.txt", "-d", "x"]).is_err());
        assert!(args(&[]).is_err());
        assert!(args(&["a", "b"]).is_err());
    }

    #[test]
    fn test_dump_json_shape() {
        let config = TessellationConfig::with_divisions(4);
        let (scene, _) = parse_scene("curve 1 1 2 3\nsurface 1 1 0 0 0\n", &config);
        let json = serde_json::to_value(dump(&scene, &config)).unwrap();
        assert_eq!(json["divisions"], 4);
        assert_eq!(json["shapes"][0]["kind"], "curve");
        assert_eq!(json["shapes"][0]["line"], 1);
        assert_eq!(json["shapes"][0]["points"].as_array().unwrap().len(), 5);
        assert_eq!(json["shapes"][0]["points"][0], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(json["shapes"][1]["kind"], "surface");
        assert_eq!(json["shapes"][1]["num_u"], 5);
        assert_eq!(json["shapes"][1]["points"].as_array().unwrap().len(), 25);
    }

    #[test]
    fn test_dump_empty_scene() {
        let json = serde_json::to_string(&dump(&Scene::empty(), &TessellationConfig::default()))
            .unwrap();
        assert_eq!(json, r#"{"divisions":32,"shapes":[]}"#);
    }
}
