// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IDS-Lite Params
//!
//! The IDS parameters component: extracts property requirements from loaded
//! specifications, restricts highlighting/selection to the elements a
//! requirement applies to, and reconciles property data into the model
//! graph.
//!
//! ```rust,ignore
//! use ids_lite_params::IdsParameters;
//! use ids_lite_spec::SpecificationStore;
//!
//! let mut component = IdsParameters::new();
//! let mut specs = SpecificationStore::new();
//! component.load(&mut specs, ids_xml)?;
//!
//! let record = component.ids_data[0].clone();
//! component.restrict_selection(Some(&record), &specs, &models, &indexer).await;
//! component.update_model(&record, &selection, &mut models, &mut indexer).await?;
//! ```
//!
//! The component owns the highlight state and exposes it by reference; the
//! presentation layer (out of scope here) reads `ids_data` for its dropdown,
//! drives selection through [`highlight::HighlightState::select`], and
//! commits edited records through `update_model`.
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialization support for records and highlight styles

pub mod component;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod record;
mod reconcile;
mod restrict;

pub use component::IdsParameters;
pub use error::{Error, Result};
pub use extract::extract;
pub use highlight::{GroupStyle, HighlightState, Rgb, RESTRICTION_GROUP, SELECTION_GROUP};
pub use record::PropertyRecord;
