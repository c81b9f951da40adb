//! Protoclass: classical inheritance over chained member namespaces.
//!
//! The class runtime lives in [`protoclass_runtime`]; this crate adds the
//! command-line front end and the demonstration scenario.

pub mod demo;

pub use protoclass_runtime as runtime;
