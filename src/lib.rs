#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod id_generator;
pub mod shape;
pub mod state;
pub mod style;
pub mod surface;
pub mod tool;
mod util;

pub use command::{Command, CommandStack};
pub use config::EditorConfig;
pub use error::{ShapeError, ShapeResult};
pub use geometry::{BoundingBox, Point};
pub use id_generator::ShapeId;
pub use shape::{Geometry, SerializedShape, Shape, ShapeCollection, ShapeKind, TextPlacement};
pub use state::{EditorSnapshot, EditorState, LoadPolicy, PersistenceError};
pub use style::ShapeStyle;
pub use surface::{Recorder, Surface};
pub use tool::Tool;
