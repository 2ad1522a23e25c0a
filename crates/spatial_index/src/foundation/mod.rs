//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types
//! - Arena collections for caller-owned items
//! - Time measurement
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
