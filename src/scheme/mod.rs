//! Release naming schemes.
//!
//! A release identifier is derived from the tags already present in the
//! repository: either a calendar-based counter ([`date::DateScheme`]) or a
//! semantic version ([`semver::ProposedVersion`]).

pub mod date;
pub mod semver;

pub use date::DateScheme;
pub use semver::{parse_semver_tag, BranchContext, ProposedVersion};
