// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Applicability resolution
//!
//! Resolves one applicability facet to the concrete element ids it targets
//! in one model. Entity facets match by IFC type name; property facets match
//! elements that already carry the named property. Facet kinds without a
//! resolution rule yield the empty set, which callers treat as "does not
//! apply", never as an error.

use crate::types::{EntityFacet, Facet, PropertyFacet};
use ids_lite_core::properties::{PROP_NAME, PROP_NOMINAL_VALUE, PSET_HAS_PROPERTIES, PSET_NAME};
use ids_lite_core::{Model, RelationKind, RelationsIndexer};

/// Element ids of one model that a facet applies to, ascending
pub async fn matching_elements(
    facet: &Facet,
    model: &Model,
    model_id: &str,
    indexer: &RelationsIndexer,
) -> Vec<u32> {
    match facet {
        Facet::Entity(entity) => entity_matches(entity, model).await,
        Facet::Property(property) => property_matches(property, model, model_id, indexer).await,
        _ => Vec::new(),
    }
}

async fn entity_matches(facet: &EntityFacet, model: &Model) -> Vec<u32> {
    let mut ids: Vec<u32> = model
        .entities()
        .filter(|e| e.ifc_type.is_element())
        .filter(|e| facet.name.matches_ignore_case(e.ifc_type.name()))
        .map(|e| e.id)
        .collect();
    ids.sort_unstable();
    ids
}

async fn property_matches(
    facet: &PropertyFacet,
    model: &Model,
    model_id: &str,
    indexer: &RelationsIndexer,
) -> Vec<u32> {
    let elements: Vec<u32> = model
        .entities()
        .filter(|e| e.ifc_type.is_element())
        .map(|e| e.id)
        .collect();

    let mut ids = Vec::new();
    for element in elements {
        if carries_property(facet, model, model_id, indexer, element).await {
            ids.push(element);
        }
    }
    ids.sort_unstable();
    ids
}

/// Check whether one element already carries the facet's property
async fn carries_property(
    facet: &PropertyFacet,
    model: &Model,
    model_id: &str,
    indexer: &RelationsIndexer,
    element: u32,
) -> bool {
    let candidates = indexer
        .get_relations(model_id, element, RelationKind::IsDefinedBy)
        .to_vec();

    for pset_id in candidates {
        let Some(pset) = model.attributes(pset_id).await else {
            continue;
        };
        let Some(pset_name) = pset.get_string_content(PSET_NAME) else {
            continue;
        };
        if !facet.property_set.matches(pset_name) {
            continue;
        }
        let Some(members) = pset.get_list(PSET_HAS_PROPERTIES) else {
            continue;
        };
        let member_ids: Vec<u32> = members.iter().filter_map(|m| m.as_ref_id()).collect();

        for member in member_ids {
            let Some(property) = model.attributes(member).await else {
                continue;
            };
            let Some(name) = property.get_string_content(PROP_NAME) else {
                continue;
            };
            if !facet.base_name.matches(name) {
                continue;
            }
            // Optional value constraint on top of the name match
            match &facet.value {
                None => return true,
                Some(expected) => {
                    if property
                        .get_string_content(PROP_NOMINAL_VALUE)
                        .map(|v| expected.matches(v))
                        .unwrap_or(false)
                    {
                        return true;
                    }
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdsParameter;

    const CONTENT: &str = r#"
#5=IFCOWNERHISTORY($,$,$,.ADDED.,$,$,$,1700000000);
#10=IFCWALL('a',#5,'Wall-001',$,$,$,$,$);
#11=IFCWALL('b',#5,'Wall-002',$,$,$,$,$);
#12=IFCDOOR('c',#5,'Door-001',$,$,$,$,$);
#20=IFCPROPERTYSINGLEVALUE('FireRating',$,IFCLABEL('A'),$);
#21=IFCPROPERTYSET('d',#5,'Pset_Custom',$,(#20));
#22=IFCRELDEFINESBYPROPERTIES('e',#5,$,$,(#10),#21);
"#;

    fn setup() -> (Model, RelationsIndexer) {
        let model = Model::from_step(CONTENT);
        let mut indexer = RelationsIndexer::new();
        indexer.process("demo", &model);
        (model, indexer)
    }

    #[tokio::test]
    async fn test_entity_facet_matches_by_type() {
        let (model, indexer) = setup();
        let facet = Facet::Entity(EntityFacet {
            name: IdsParameter::Simple("IFCWALL".to_string()),
            predefined_type: None,
        });

        let ids = matching_elements(&facet, &model, "demo", &indexer).await;
        assert_eq!(ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn test_entity_facet_is_case_insensitive() {
        let (model, indexer) = setup();
        let facet = Facet::Entity(EntityFacet {
            name: IdsParameter::Simple("IfcDoor".to_string()),
            predefined_type: None,
        });

        let ids = matching_elements(&facet, &model, "demo", &indexer).await;
        assert_eq!(ids, vec![12]);
    }

    #[tokio::test]
    async fn test_property_facet_matches_carriers() {
        let (model, indexer) = setup();
        let facet = Facet::Property(PropertyFacet {
            property_set: IdsParameter::Simple("Pset_Custom".to_string()),
            base_name: IdsParameter::Simple("FireRating".to_string()),
            data_type: None,
            value: None,
        });

        // Only wall #10 carries the property
        let ids = matching_elements(&facet, &model, "demo", &indexer).await;
        assert_eq!(ids, vec![10]);
    }

    #[tokio::test]
    async fn test_property_facet_value_constraint() {
        let (model, indexer) = setup();
        let matching = Facet::Property(PropertyFacet {
            property_set: IdsParameter::Simple("Pset_Custom".to_string()),
            base_name: IdsParameter::Simple("FireRating".to_string()),
            data_type: None,
            value: Some(IdsParameter::Simple("A".to_string())),
        });
        let other = Facet::Property(PropertyFacet {
            property_set: IdsParameter::Simple("Pset_Custom".to_string()),
            base_name: IdsParameter::Simple("FireRating".to_string()),
            data_type: None,
            value: Some(IdsParameter::Simple("B".to_string())),
        });

        assert_eq!(
            matching_elements(&matching, &model, "demo", &indexer).await,
            vec![10]
        );
        assert!(matching_elements(&other, &model, "demo", &indexer)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_unresolvable_facets_yield_empty() {
        let (model, indexer) = setup();
        let facet = Facet::Material(crate::types::MaterialFacet { value: None });
        assert!(matching_elements(&facet, &model, "demo", &indexer)
            .await
            .is_empty());
    }
}
