use std::collections::HashSet;
use std::io::{Read, Write};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EditorState;
use crate::error::ShapeError;
use crate::shape::{SerializedShape, Shape};
use crate::util::time;

/// Snapshot layout version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Errors that can occur during snapshot persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to (de)serialize snapshot: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to read or write snapshot: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Shape #{index} could not be restored: {source}")]
    InvalidShape {
        index: usize,
        #[source]
        source: ShapeError,
    },

    #[error("Shape id {0} appears more than once")]
    DuplicateId(String),

    #[error("Snapshot format {found} is newer than supported format {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// What to do with a shape that fails to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Fail the whole load on the first bad shape
    #[default]
    Abort,
    /// Log and drop bad shapes, keep the rest
    Skip,
}

/// Serializable snapshot of the annotation canvas.
///
/// Where the bytes end up is the caller's business: snapshots read from any
/// [`Read`] and write to any [`Write`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    /// Layout version, see [`FORMAT_VERSION`]
    pub format: u32,
    /// Version of the crate that wrote the snapshot
    pub version: String,
    /// Seconds since the UNIX epoch when the snapshot was taken
    pub timestamp: u64,
    /// Shapes in z-order
    pub shapes: Vec<SerializedShape>,
}

impl EditorSnapshot {
    /// Capture the shapes currently on the canvas.
    pub fn capture(state: &EditorState) -> Self {
        Self {
            format: FORMAT_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: time::timestamp_secs(),
            shapes: state.shapes().iter().map(Shape::serialize).collect(),
        }
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> PersistenceResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> PersistenceResult<Self> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> PersistenceResult<()> {
        if self.format > FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.format,
                supported: FORMAT_VERSION,
            });
        }
        if self.version != env!("CARGO_PKG_VERSION") {
            info!(
                "Snapshot written by version {}, current version {}",
                self.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        Ok(())
    }

    /// Rebuild the shapes, applying `policy` to entries that fail.
    pub fn restore_shapes(&self, policy: LoadPolicy) -> PersistenceResult<Vec<Shape>> {
        let mut shapes = Vec::with_capacity(self.shapes.len());
        let mut seen = HashSet::new();

        for (index, serialized) in self.shapes.iter().enumerate() {
            let result = Shape::deserialize(serialized)
                .map_err(|source| PersistenceError::InvalidShape { index, source })
                .and_then(|shape| {
                    if seen.insert(shape.id()) {
                        Ok(shape)
                    } else {
                        Err(PersistenceError::DuplicateId(serialized.id.clone()))
                    }
                });

            match (result, policy) {
                (Ok(shape), _) => shapes.push(shape),
                (Err(err), LoadPolicy::Abort) => return Err(err),
                (Err(err), LoadPolicy::Skip) => warn!("Skipping shape: {err}"),
            }
        }

        Ok(shapes)
    }
}

impl EditorState {
    /// Replace the canvas with the snapshot's shapes. History and selection
    /// start over. Returns the number of shapes installed.
    pub fn load_snapshot(
        &mut self,
        snapshot: &EditorSnapshot,
        policy: LoadPolicy,
    ) -> PersistenceResult<usize> {
        let shapes = snapshot.restore_shapes(policy)?;
        let count = shapes.len();
        self.replace_shapes(shapes);
        info!("Loaded {count} of {} shapes from snapshot", snapshot.shapes.len());
        Ok(count)
    }
}
