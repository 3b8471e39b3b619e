//! # Amber Test Suite
//!
//! Cross-crate scenarios driven through `RegistryHandle`, the way a
//! transport would use it.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # JSON interactions in, outcomes and error kinds out
//!     └── properties.rs   # round-trip, admin bubbling, TTL and idempotence
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p am-tests
//! cargo test -p am-tests integration::properties::
//! ```

pub mod integration;
