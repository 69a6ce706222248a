// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IDS-Lite Core
//!
//! Mutable in-memory IFC model store built with [nom](https://docs.rs/nom).
//! Parses STEP entity lines into an owned entity graph and exposes the
//! query/mutation surface the IDS property tooling works against.
//!
//! ## Overview
//!
//! - **STEP tokenization**: entity lines parsed into owned attribute values
//! - **Entity scanning**: SIMD-accelerated entity discovery using
//!   [memchr](https://docs.rs/memchr)
//! - **Mutable graph**: fresh express ids for entities created at runtime
//! - **Relation index**: `(element, kind) -> targets` lookups plus
//!   relationship creation
//! - **Property creation**: property sets, single-value properties, set
//!   membership, GlobalId generation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ids_lite_core::{Model, PropertyManager, PropertyValue};
//!
//! let model = Model::from_step(step_content);
//! let wall = model.attributes(10).await;
//! ```
//!
//! All store accesses are async suspension points; callers await them
//! strictly sequentially. The store performs no internal locking.
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialization support for attribute values and entities

pub mod error;
pub mod guid;
pub mod model;
pub mod parser;
pub mod properties;
pub mod relations;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use guid::new_global_id;
pub use model::{ElementIdMap, Model, ModelStore};
pub use parser::{parse_entity, EntityScanner};
pub use properties::PropertyManager;
pub use relations::{RelationKind, RelationTag, RelationsIndexer};
pub use schema::IfcType;
pub use value::{AttrValue, EntityInstance, PropertyValue};
