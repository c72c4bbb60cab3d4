//! Core types: math re-exports, Camera, OrbitCamera.

pub use glam::{Mat4, Vec3, vec3};

pub mod camera;
pub mod orbit;
