//! AutoRig CLI library.
//!
//! This crate provides the command implementations behind the `autorig`
//! binary and the loaders for its JSON inputs.

pub mod commands;
pub mod input;
