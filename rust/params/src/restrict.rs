// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection restriction
//!
//! While a record is selected in the presentation layer, only the elements
//! its originating specification applies to may be picked. Each call
//! recomputes the restriction from scratch; deselecting (passing no record)
//! leaves everything cleared.

use crate::component::IdsParameters;
use crate::highlight::{RESTRICTION_GROUP, SELECTION_GROUP};
use crate::record::PropertyRecord;
use ids_lite_core::{ElementIdMap, ModelStore, RelationsIndexer};
use ids_lite_spec::{matching_elements, SpecificationStore};

impl IdsParameters {
    /// Restrict selection to the elements `record`'s specification applies
    /// to, highlighting them
    ///
    /// Passing `None` removes the restriction and clears both highlight
    /// groups. Models without a matching specification contribute nothing;
    /// that is not an error.
    pub async fn restrict_selection(
        &mut self,
        record: Option<&PropertyRecord>,
        specs: &SpecificationStore,
        models: &ModelStore,
        indexer: &RelationsIndexer,
    ) {
        // Deselection and reselection both start from a clean slate
        self.highlight.clear_selectable();
        self.highlight.clear(RESTRICTION_GROUP);
        self.highlight.clear(SELECTION_GROUP);

        let Some(record) = record else {
            return;
        };

        let mut restricted = ElementIdMap::default();
        for (model_id, model) in models.iter() {
            for (spec_id, spec) in specs.list() {
                if spec_id != &record.spec_id {
                    continue;
                }
                for facet in &spec.applicability {
                    let elements = matching_elements(facet, model, model_id, indexer).await;
                    if elements.is_empty() {
                        continue;
                    }
                    restricted
                        .entry(model_id.clone())
                        .or_default()
                        .extend(elements);
                }
            }
        }

        tracing::debug!(
            spec = %record.spec_id,
            models = restricted.len(),
            "selection restricted"
        );
        self.highlight.set_selectable(restricted.clone());
        self.highlight.highlight(RESTRICTION_GROUP, &restricted, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ids_lite_core::PropertyValue;

    const STEP: &str = r#"
#5=IFCOWNERHISTORY($,$,$,.ADDED.,$,$,$,1700000000);
#10=IFCWALL('a',#5,'Wall-001',$,$,$,$,$);
#11=IFCWALL('b',#5,'Wall-002',$,$,$,$,$);
#12=IFCDOOR('c',#5,'Door-001',$,$,$,$,$);
"#;

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

    fn setup() -> (IdsParameters, SpecificationStore, ModelStore, RelationsIndexer) {
        let mut component = IdsParameters::new();
        let mut specs = SpecificationStore::new();
        component.load(&mut specs, IDS).unwrap();

        let mut models = ModelStore::new();
        models.load("demo", STEP);
        let mut indexer = RelationsIndexer::new();
        indexer.process("demo", models.get("demo").unwrap());

        (component, specs, models, indexer)
    }

    #[tokio::test]
    async fn test_restricts_to_applicable_elements() {
        let (mut component, specs, models, indexer) = setup();
        let record = component.ids_data[0].clone();

        component
            .restrict_selection(Some(&record), &specs, &models, &indexer)
            .await;

        let selectable = component.highlight().selectable().unwrap();
        assert_eq!(selectable["demo"].len(), 2);
        assert!(selectable["demo"].contains(&10));
        assert!(selectable["demo"].contains(&11));
        // The door is out
        assert!(!selectable["demo"].contains(&12));
        assert!(!component.highlight().is_clear(RESTRICTION_GROUP));
    }

    #[tokio::test]
    async fn test_none_clears_everything() {
        let (mut component, specs, models, indexer) = setup();
        let record = component.ids_data[0].clone();

        component
            .restrict_selection(Some(&record), &specs, &models, &indexer)
            .await;
        component.highlight_mut().select("demo", 10);

        component
            .restrict_selection(None, &specs, &models, &indexer)
            .await;

        assert!(component.highlight().selectable().is_none());
        assert!(component.highlight().is_clear(RESTRICTION_GROUP));
        assert!(component.highlight().is_clear(SELECTION_GROUP));
    }

    #[tokio::test]
    async fn test_unknown_spec_id_restricts_to_nothing() {
        let (mut component, specs, models, indexer) = setup();
        let record = PropertyRecord {
            spec_id: "MISSING".to_string(),
            pset: "Pset".to_string(),
            name: "Name".to_string(),
            data_type: "IFCLABEL".to_string(),
            value: PropertyValue::from("X"),
        };

        component
            .restrict_selection(Some(&record), &specs, &models, &indexer)
            .await;

        // A restriction is installed, but it is empty: nothing selectable
        let selectable = component.highlight().selectable().unwrap();
        assert!(selectable.is_empty());
        assert!(!component.highlight_mut().select("demo", 10));
    }
}
