#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country-name normalization for joining independent data sources.
//!
//! Boundary files, turnout tables and party-system tables each spell
//! country names their own way. Every name is reduced to a canonical key
//! by [`AliasTable::canonicalize`]: trim, upper-case, then substitute a
//! known alias. The same function is applied to all three sources, so two
//! spellings of one country meet on the same key.
//!
//! ```rust
//! use turnout_map_names::AliasTable;
//!
//! let aliases = AliasTable::default();
//! assert_eq!(aliases.canonicalize(" Russian Federation "), "RUSSIA");
//! assert_eq!(aliases.canonicalize("france"), "FRANCE");
//! ```

pub mod aliases;
pub mod normalize;

pub use aliases::{AliasError, AliasTable};
pub use normalize::normalize_name;
