//! Core library for the agentic shopping deliberation pipeline.
//!
//! A free-text shopping request flows through three collaborators: goal
//! decomposition (an external language-model seam), research (an external
//! catalog seam), and the in-process deliberation engine that picks at most
//! one product per category under a budget ceiling. Reporting turns the
//! resulting selection into prose for the end user.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
