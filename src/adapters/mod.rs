//! Adapters for external math libraries.
//!
//! The scene layer works in `glam` double precision vectors, so the `glam`
//! adapter is always compiled in.

pub mod glam;
