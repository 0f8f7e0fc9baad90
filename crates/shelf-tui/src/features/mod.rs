//! Feature modules: per-view state, reducers, and rendering.

pub mod signin;
pub mod table;
