pub mod ai;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod grocery;
pub mod household;
pub mod plan;
pub mod preferences;
pub mod rate_limit;
pub mod recipes;
pub mod state;
pub mod template;
