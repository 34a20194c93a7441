//! Input Relay
//!
//! Keyboard and mouse event dispatch with hooks and scoped binds, fed by
//! winit or terminal event sources.

/// Build-time information (timestamp, target, compiler)
pub mod build_info;

/// Input configuration profiles
pub mod config;

/// Event types, registries and the dispatching input context
pub mod input;

/// Platform event sources and cursor control
pub mod platform;
