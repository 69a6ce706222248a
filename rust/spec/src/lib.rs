// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IDS-Lite Spec
//!
//! IDS (Information Delivery Specification) parsing and applicability
//! resolution. Documents are read with [quick-xml](https://docs.rs/quick-xml)
//! into plain specification values; applicability facets resolve to concrete
//! element ids against a loaded model from `ids-lite-core`.
//!
//! ```rust,ignore
//! use ids_lite_spec::SpecificationStore;
//!
//! let mut store = SpecificationStore::new();
//! let ids = store.load(ids_xml)?;
//! let spec = store.get(&ids[0]).unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialization support for specification types

pub mod applicability;
pub mod error;
pub mod reader;
pub mod store;
pub mod types;

pub use applicability::matching_elements;
pub use error::{Error, Result};
pub use reader::read_document;
pub use store::SpecificationStore;
pub use types::{
    AttributeFacet, ClassificationFacet, EntityFacet, Facet, IdsParameter, MaterialFacet,
    PropertyFacet, Specification,
};
