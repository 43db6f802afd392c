//! Common types module for the delivery quoter system.
//!
//! This module defines the core data types and structures used throughout
//! the quoter. It provides a centralized location for shared types to
//! ensure consistency across all quoter components.

/// Feature vector types for assembling model input rows.
pub mod features;
/// Quote types describing delivery estimates and their wire format.
pub mod quote;
/// Request types for incoming quote requests.
pub mod request;
/// Utility functions for wire-facing numeric formatting.
pub mod utils;

// Re-export all types for convenient access
pub use features::*;
pub use quote::*;
pub use request::*;
pub use utils::round2;
