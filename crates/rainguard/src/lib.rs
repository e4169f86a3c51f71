pub mod claims;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod ticketing;
