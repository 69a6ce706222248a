// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The IDS parameters component
//!
//! Holds the extracted property records and the highlight state, and
//! sequences the collaborator services: the specification store for loading,
//! applicability resolution for restriction, the model store and relation
//! index for reconciliation. Restriction lives in `restrict`, reconciliation
//! in `reconcile`.

use crate::error::Result;
use crate::extract::extract;
use crate::highlight::HighlightState;
use crate::record::PropertyRecord;
use ids_lite_spec::SpecificationStore;

/// Component state: extracted records plus highlight/selection state
#[derive(Debug)]
pub struct IdsParameters {
    pub enabled: bool,
    /// Records extracted so far, in load order; read by the presentation
    /// layer to populate its dropdown
    pub ids_data: Vec<PropertyRecord>,
    pub(crate) highlight: HighlightState,
}

impl Default for IdsParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl IdsParameters {
    /// Create the component with empty state
    pub fn new() -> Self {
        Self {
            enabled: false,
            ids_data: Vec::new(),
            highlight: HighlightState::new(),
        }
    }

    /// Shared highlight state, for the presentation layer
    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Mutable highlight state, for the presentation layer
    pub fn highlight_mut(&mut self) -> &mut HighlightState {
        &mut self.highlight
    }

    /// Load an IDS document and extract its property requirements
    ///
    /// Parsing is delegated to the specification store; the records of the
    /// document's first specification are appended to `ids_data`, so
    /// repeated loads accumulate. Returns the number of records added.
    pub fn load(&mut self, specs: &mut SpecificationStore, file_data: &str) -> Result<usize> {
        let loaded = specs.load(file_data)?;

        // One document can carry several specifications; requirements are
        // taken from the first.
        let Some(spec) = loaded.first().and_then(|id| specs.get(id)) else {
            return Ok(0);
        };

        let records = extract(spec);
        let added = records.len();
        tracing::debug!(spec = %spec.identifier, records = added, "requirements extracted");
        self.ids_data.extend(records);
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: &str = r#"<ids xmlns="http://standards.buildingsmart.org/IDS">
  <specifications>
    <specification identifier="SPEC-1">
      <applicability>
        <entity><name><simpleValue>IFCWALL</simpleValue></name></entity>
      </applicability>
      <requirements>
        <property dataType="IFCLABEL">
          <propertySet><simpleValue>Pset_Custom</simpleValue></propertySet>
          <baseName><simpleValue>FireRating</simpleValue></baseName>
          <value><simpleValue>A</simpleValue></value>
        </property>
      </requirements>
    </specification>
  </specifications>
</ids>"#;

    #[test]
    fn test_load_extracts_records() {
        let mut component = IdsParameters::new();
        let mut specs = SpecificationStore::new();

        let added = component.load(&mut specs, IDS).unwrap();
        assert_eq!(added, 1);
        assert_eq!(component.ids_data.len(), 1);

        let record = &component.ids_data[0];
        assert_eq!(record.spec_id, "SPEC-1");
        assert_eq!(record.pset, "Pset_Custom");
        assert_eq!(record.name, "FireRating");
        assert_eq!(record.data_type, "IFCLABEL");
    }

    #[test]
    fn test_load_accumulates_across_documents() {
        let mut component = IdsParameters::new();
        let mut specs = SpecificationStore::new();

        component.load(&mut specs, IDS).unwrap();
        let second = IDS.replace("SPEC-1", "SPEC-2");
        component.load(&mut specs, &second).unwrap();

        assert_eq!(component.ids_data.len(), 2);
        assert_eq!(component.ids_data[1].spec_id, "SPEC-2");
    }

    #[test]
    fn test_load_propagates_document_errors() {
        let mut component = IdsParameters::new();
        let mut specs = SpecificationStore::new();

        let empty = r#"<ids xmlns="http://standards.buildingsmart.org/IDS"><specifications/></ids>"#;
        assert!(component.load(&mut specs, empty).is_err());
        assert!(component.ids_data.is_empty());
    }
}
