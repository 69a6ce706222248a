// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Specification store
//!
//! Loaded specifications accumulate across documents, keyed by identifier in
//! load order.

use crate::error::{Error, Result};
use crate::reader::read_document;
use crate::types::Specification;
use indexmap::IndexMap;

/// All specifications loaded so far
#[derive(Debug, Default)]
pub struct SpecificationStore {
    list: IndexMap<String, Specification>,
}

impl SpecificationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            list: IndexMap::new(),
        }
    }

    /// Load an IDS document, appending its specifications to the store
    ///
    /// Returns the identifiers of the loaded specifications in document
    /// order. A document without specifications is an error; a repeated
    /// identifier replaces the earlier specification.
    pub fn load(&mut self, xml: &str) -> Result<Vec<String>> {
        let specs = read_document(xml)?;
        if specs.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let mut ids = Vec::with_capacity(specs.len());
        for spec in specs {
            tracing::debug!(
                id = %spec.identifier,
                requirements = spec.requirements.len(),
                "specification loaded"
            );
            ids.push(spec.identifier.clone());
            self.list.insert(spec.identifier.clone(), spec);
        }
        Ok(ids)
    }

    /// All specifications, keyed by identifier in load order
    pub fn list(&self) -> &IndexMap<String, Specification> {
        &self.list
    }

    /// Get one specification by identifier
    pub fn get(&self, id: &str) -> Option<&Specification> {
        self.list.get(id)
    }

    /// Number of stored specifications
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
