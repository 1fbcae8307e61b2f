//! Rendering of flow output: backend replay and reference serializers.

mod backend;
mod json;
mod outline;

pub use backend::{replay, BackendCall, RecordingBackend, RenderBackend};
pub use json::{to_json, JsonFormat};
pub use outline::to_outline;
