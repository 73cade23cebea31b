//! Shared constants for end-to-end tests
//!
//! When the test catalog configuration changes, update only this file.

#![allow(dead_code)]

// ============================================================================
// Test Catalog Configuration
// ============================================================================

/// Genres accepted by the test catalog
pub const TEST_GENRES: [&str; 2] = ["NOVEL", "HISTORY"];

/// Lowest accepted publication year
pub const TEST_YEAR_LOWER: i64 = 1940;

/// Highest accepted publication year
pub const TEST_YEAR_UPPER: i64 = 2100;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
