mod editor_state;
mod persistence;

pub use editor_state::EditorState;
pub use persistence::{
    EditorSnapshot,
    FORMAT_VERSION,
    LoadPolicy,
    PersistenceError,
    PersistenceResult,
};
