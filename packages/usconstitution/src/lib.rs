//! US Constitution provision tree.
//!
//! This crate models the US Constitution as a typed tree of provisions and
//! derives, for every node, a routing path, a heading and a legal citation.
//! Loc-ids (Library of Congress identifiers such as `ArtI.S8.C1`) parse back
//! into provision stubs.
//!
//! # Example
//!
//! ```
//! use usconstitution::{from_loc_id, load_embedded, LoadOptions};
//!
//! let constitution = load_embedded(&LoadOptions::with_prefix("/constitution-conan")).unwrap();
//! let paths: Vec<String> = constitution.paths().collect();
//! assert_eq!(paths[1], "/constitution-conan/preamble");
//!
//! let (stub, rest) = from_loc_id("ArtIII.S2.C2.4").unwrap();
//! assert_eq!(stub.citation("U.S. Const."), "U.S. Const., art. III, § 2, cl. 2");
//! assert_eq!(rest, "4");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, validation and load options
//! - [`error`]: Error types and Result alias
//! - [`types`]: Node structs and schema validation
//! - [`provision`]: The `Provision` trait and the `Node` view
//! - [`tree`]: Pre-order traversal and rendered walks
//! - [`locator`]: Loc-id parsing and resolution
//! - [`loader`]: Numbering pre-pass and document loading
//! - [`export`]: Flat JSON/YAML provision records
//! - [`numeral`]: Roman numerals
//! - [`text`]: Content normalization and wrapping
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod locator;
pub mod numeral;
pub mod provision;
pub mod text;
pub mod tree;
pub mod types;

// Re-export main functions
pub use loader::{load_embedded, load_from_path, load_from_str, load_from_value};
pub use locator::{from_loc_id, ProvisionStub};

// Re-export commonly used items
pub use config::LoadOptions;
pub use error::{ConstitutionError, Result};
pub use provision::{Node, Provision, ProvisionKind};
pub use tree::{RenderStyle, Rendered, Tree};
pub use types::{
    AmendSection, Amendment, Article, Clause, Constitution, EssayLink, Preamble, Section,
};
