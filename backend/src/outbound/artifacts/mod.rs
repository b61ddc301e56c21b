//! Filesystem storage for uploaded program artifacts.

mod cap_std_artifact_store;

pub use cap_std_artifact_store::CapStdArtifactStore;
