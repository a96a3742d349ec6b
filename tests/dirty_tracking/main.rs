//! Dirty Tracking Integration Test Suite
//!
//! End-to-end behaviour of tracked documents through the public facade.
//!
//! ## Modules
//!
//! - `detection`: what does and does not register as a change
//! - `lifecycle`: create/update hooks, pristine assignment, failed saves
//! - `properties`: proptest invariants over random edit sequences
//! - `sharing`: documents confined behind an external lock
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test dirty_tracking
//! cargo test --test dirty_tracking lifecycle::
//! ```

mod common;
mod detection;
mod lifecycle;
mod sharing;
