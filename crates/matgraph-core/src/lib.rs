#![forbid(unsafe_code)]
//! matgraph-core library.
//!
//! A validated dense [`Matrix`] with two failure tiers:
//!
//! - **Structural** failures (ragged rows, mismatched or non-square shapes,
//!   a zero exponent) are returned as [`MatrixError`].
//! - **Computational** non-results (non-square determinant, singular
//!   inverse, non-finite entries) are ordinary values: [`Determinant`],
//!   `Option<Matrix>`, a zero rank, or a fallback matrix.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for library errors; `anyhow::Result` only
//!   for config file loading.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`) and `#[instrument]`
//!   spans; no subscriber is installed here.

pub mod config;
pub mod error;
pub mod matrix;

pub use config::{EngineConfig, NumericConfig};
pub use error::{ErrorCode, MatrixError};
pub use matrix::{Breakdown, Determinant, Matrix};
