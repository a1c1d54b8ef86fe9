//! Drive the project's build tool to produce an APK from a patched template.

mod builder;
mod error;
pub mod tool;

pub use builder::{
    Artifact, BuildOptions, BuildResult, CLEAN_TASK, build, export_artifact, resolve_artifact,
};
pub use error::BuildError;
pub use tool::{BuildTool, Gradle, TaskOutput};
