//! Structural parsers for the site's listing and detail pages.
//!
//! The markup is irregular (variable block counts, optional trailing
//! metadata, inconsistent delimiters), so each extraction point checks its
//! precondition and reports a [`StructureError`] instead of assuming the
//! shape holds. A structure error means the site changed and the whole run
//! must abort.

mod detail;
mod directory;
mod error;

pub use detail::parse_detail;
pub use directory::parse_directory;
pub use error::StructureError;
