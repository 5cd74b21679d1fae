//! churnlab: synthetic subscription-churn simulation and model evaluation.
//!
//! This crate simulates a subscription-business customer population with a
//! feature-dependent churn label, encodes it into a fixed-schema numeric
//! table, trains a logistic-regression and a random-forest classifier on a
//! shared train/held-out partition, and evaluates both against the held-out
//! labels. Plot and report builders hand finished artifacts to the CLI,
//! which is the only place anything touches the filesystem.
//!
//! The whole run is driven by a single seeded rng threaded explicitly
//! through generation, splitting, and forest training, so a fixed seed
//! reproduces the population and every downstream metric exactly.
pub mod config;
pub mod data_handling;
pub mod encoding;
pub mod error;
pub mod io;
pub mod math;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod report;
pub mod simulation;
