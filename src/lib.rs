// src/lib.rs
pub mod error;
pub mod message;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod settings;
pub mod state;
pub mod telemetry;
pub mod trace_id;
