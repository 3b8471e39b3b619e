//! # AM-01 Privilege Authority
//!
//! Maps user identities to integer privilege levels and answers the single
//! question every command dispatch asks: does this user meet the required
//! level?
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pure lookup logic, no I/O
//!   - `PrivilegeAuthority`: the level table plus a default level
//!   - `PrivilegeConfig`: serde configuration with validation
//!
//! ## Invariants
//!
//! - **Comparison**: `meets(user, required)` is `level_of(user) >= required`,
//!   never equality.
//! - **Totality**: `level_of` never fails; unknown users get the default level.
//!
//! ## Usage Example
//!
//! ```ignore
//! use am_01_privilege_authority::PrivilegeAuthority;
//!
//! let authority = PrivilegeAuthority::new(0).with_user("1234", 5);
//! assert!(authority.meets(&"1234".into(), 5));
//! assert!(!authority.meets(&"9999".into(), 1));
//! ```

pub mod domain;
pub mod error;

pub use domain::{PrivilegeAuthority, PrivilegeConfig};
pub use error::PrivilegeError;
