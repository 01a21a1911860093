//! Director Timeline Crate
//!
//! Waypoint sequence and timeline collaborator interfaces for the director
//! coordinator, plus [`ScriptedTimeline`], a concrete cursor-driven
//! implementation used by tests and demos.

pub mod timeline;
pub mod waypoint;

pub use timeline::{ScriptedTimeline, Timeline};
pub use waypoint::Waypoint;
