pub mod config;
pub mod errors;
pub mod live;
pub mod load;
pub mod parse;
pub mod report;
pub mod scene;

pub use config::{Divisions, TessellationConfig};
pub use errors::{LoadError, ShapeError};
pub use live::LiveScene;
pub use load::{load_scene, load_source};
pub use parse::{parse_scene, parse_shape, parse_source};
pub use report::{LineFailure, LineOverflow, LoadReport};
pub use scene::{Scene, SceneSource, Shape};
