//! shopflow: a unidirectional state runtime and the shopping feature tree
//! built on it.

pub mod config;
pub mod dependencies;
pub mod logging;
pub mod runtime;
pub mod shop;
