//! Shared test helpers for `worksnap-core` integration tests.
//!
//! These helpers provide a scripted control plane and in-memory adapters so
//! engine tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod control_plane;
pub mod repositories;

pub use control_plane::ScriptedControlPlane;
pub use repositories::{FakeDocumentLocator, InMemorySnapshotRepository};
