//! Cardio - heart-disease risk inference service
//!
//! A thin serving wrapper around a pre-fit binary classifier: a fixed-order
//! feature vectorizer, a scale-then-threshold scorer, and two transport
//! adapters (HTTP and one-shot CLI) sharing that pipeline.

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod routes;
pub mod scorer;
pub mod state;
