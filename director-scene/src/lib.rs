//! Director Scene Crate
//!
//! World-model collaborator interfaces for the director coordinator plus
//! in-memory implementations usable as test doubles and demo hosts.
//! This crate is host-agnostic: it knows nothing about timelines or the
//! coordinator itself.

pub mod error;
pub mod rig;
pub mod scene;
pub mod transform;

pub use error::SceneError;
pub use rig::{MemoryRig, ViewerRig};
pub use scene::{MemoryScene, Scene};
pub use transform::Transform;
