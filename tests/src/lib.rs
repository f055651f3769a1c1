//! # Overview Dash Test Suite
//!
//! Unified test crate for cross-crate behavior.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs    # Store seeding, service wiring, polling
//!     ├── end_to_end.rs  # Kind lifecycle through the service
//!     └── concurrency.rs # Describes racing reconciliation
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p dash-tests
//!
//! # By category
//! cargo test -p dash-tests integration::end_to_end::
//! cargo test -p dash-tests integration::concurrency::
//! ```
//!
//! Set `DASH_TEST_LOGS=1` to see the service logs.

#![allow(dead_code)]

pub mod integration;
