// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property reconciliation
//!
//! Commits an edited record to every selected element. Three cases per
//! element:
//!
//! 1. The property set and the property both exist: nothing to do.
//! 2. The set exists but the property does not: create and attach the
//!    property.
//! 3. Neither exists: create the set, then the property, then the relation.
//!
//! Elements and models are processed strictly sequentially, each store
//! access awaited before the next is issued. Candidates without attributes
//! and models missing from the store are skipped; a missing owner history
//! aborts the pass.

use crate::component::IdsParameters;
use crate::error::Result;
use crate::record::PropertyRecord;
use ids_lite_core::properties::{PROP_NAME, PSET_HAS_PROPERTIES, PSET_NAME};
use ids_lite_core::{
    ElementIdMap, ModelStore, PropertyManager, RelationKind, RelationTag, RelationsIndexer,
};

impl IdsParameters {
    /// Ensure the record's property exists on every selected element
    ///
    /// No-op for an empty selection. Idempotent: an element that already
    /// carries the property under the record's set name is left untouched,
    /// so no element ever accumulates duplicate sets or properties from
    /// repeated commits.
    pub async fn update_model(
        &self,
        record: &PropertyRecord,
        selection: &ElementIdMap,
        models: &mut ModelStore,
        indexer: &mut RelationsIndexer,
    ) -> Result<()> {
        if selection.values().all(|elements| elements.is_empty()) {
            return Ok(());
        }

        for (model_id, elements) in selection {
            let Some(model) = models.get_mut(model_id) else {
                continue;
            };

            // Stable work order regardless of selection-set iteration
            let mut elements: Vec<u32> = elements.iter().copied().collect();
            elements.sort_unstable();

            'elements: for element in elements {
                let candidates = indexer
                    .get_relations(model_id, element, RelationKind::IsDefinedBy)
                    .to_vec();

                // The set to merge into, when one with the record's name
                // exists. When several share the name, the last one scanned
                // wins; kept as-is from the source behavior.
                let mut target_set: Option<u32> = None;
                let wanted = record.name.to_uppercase();

                for candidate in candidates {
                    let Some(attrs) = model.attributes(candidate).await else {
                        continue;
                    };
                    let Some(set_name) = attrs.get_string_content(PSET_NAME) else {
                        continue;
                    };
                    if set_name != record.pset {
                        continue;
                    }
                    let Some(members) = attrs.get_list(PSET_HAS_PROPERTIES) else {
                        continue;
                    };
                    let member_ids: Vec<u32> =
                        members.iter().filter_map(|m| m.as_ref_id()).collect();

                    for member in member_ids {
                        let Some(property) = model.attributes(member).await else {
                            continue;
                        };
                        let Some(name) = property.get_string_content(PROP_NAME) else {
                            continue;
                        };
                        if name.to_uppercase() == wanted {
                            // Case 1: already satisfied; nothing to mutate
                            // for this element.
                            tracing::debug!(
                                element,
                                property = %record.name,
                                "property already present"
                            );
                            continue 'elements;
                        }
                    }

                    target_set = Some(candidate);
                }

                // Case 3: no set with that name; a missing owner history is
                // fatal for the whole pass.
                let pset = match target_set {
                    Some(id) => id,
                    None => PropertyManager::create_property_set(model, &record.pset).await?,
                };

                // Case 2 and 3 share the rest: each element gets its own
                // property instance, even under a shared set.
                let property = PropertyManager::new_single_property(
                    model,
                    &record.data_type,
                    &record.name,
                    record.coerced_value(),
                )
                .await;
                PropertyManager::append_to_set(model, pset, property).await?;
                indexer
                    .add_relation(
                        model_id,
                        model,
                        element,
                        RelationTag::defines_by_properties(),
                        pset,
                    )
                    .await?;

                tracing::debug!(element, pset, property, "property attached");
            }
        }

        Ok(())
    }
}
