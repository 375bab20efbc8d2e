//! Rule-based screening of location reviews for quality, relevancy and
//! content-policy violations, with the HTTP router, text features and CSV
//! tooling built around it.

pub mod assessment;
pub mod config;
pub mod dataset;
pub mod error;
pub mod telemetry;
pub mod text;
