//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache warm: refreshes the configured congresses at a fixed interval

mod warm;

pub use warm::spawn_warm_task;
