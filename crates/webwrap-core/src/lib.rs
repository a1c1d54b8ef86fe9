//! Core of webwrap: the build request, the project layout, template patching
//! and launcher icon generation.

pub mod escape;
pub mod icon;
pub mod layout;
pub mod patch;
pub mod request;
pub mod retry;
pub mod utils;

pub use layout::{LayoutError, ProjectLayout, ProjectPaths};
pub use request::{BuildRequest, BuildVariant, ValidationError};
