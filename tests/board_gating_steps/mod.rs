//! Step definitions for board gating behaviour scenarios.

pub mod given;
pub mod then;
pub mod world;
