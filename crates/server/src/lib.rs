//! Server crate for the ski trip planner.
//!
//! This crate contains the trip planner entry point, the prompt parser and
//! the HTTP interface that exposes them.

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod prompt_parser;

pub use config::{AppConfig, Mode, init_tracing};
pub use orchestrator::{FALLBACK_PLAN, TripPlanner};
pub use prompt_parser::{SkillLevel, TripRequest};
