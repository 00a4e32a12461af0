//! Data models for the Powercast application
//!
//! This module contains the core domain models organized by concern:
//! - Household: home size bands and heating types
//! - Features: the model input vector
//! - Usage: monthly adjustment requests and results

pub mod features;
pub mod household;
pub mod usage;

// Re-export all public types for convenient access
pub use features::Features;
pub use household::{HeatingType, HomeSize, MAX_HOUSEHOLD_SIZE, MIN_HOUSEHOLD_SIZE};
pub use usage::{AdjustmentResult, AppliedAdjustment, PredictionRequest};
