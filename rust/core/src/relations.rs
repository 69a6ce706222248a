// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relation indexing
//!
//! Builds a per-model forward index from relationship entities so that
//! "which property sets define this element" is a map lookup instead of a
//! graph scan, and creates new relationship entities when callers link an
//! element to a property definition.

use crate::error::Result;
use crate::guid::new_global_id;
use crate::model::Model;
use crate::schema::IfcType;
use crate::value::{AttrValue, EntityInstance};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Inverse relation kinds the index understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// element -> property definition (IfcRelDefinesByProperties)
    IsDefinedBy,
    /// element -> spatial structure (IfcRelContainedInSpatialStructure)
    ContainedInStructure,
    /// element -> material/classification (IfcRelAssociates*)
    HasAssociations,
}

/// Concrete relationship type plus the inverse it populates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationTag {
    pub rel_type: IfcType,
    pub inverse: RelationKind,
}

impl RelationTag {
    /// The tag used when attaching property sets to elements
    pub fn defines_by_properties() -> Self {
        Self {
            rel_type: IfcType::IfcRelDefinesByProperties,
            inverse: RelationKind::IsDefinedBy,
        }
    }
}

/// Most elements carry a handful of relations at most
type TargetList = SmallVec<[u32; 4]>;

type ModelIndex = FxHashMap<(u32, RelationKind), TargetList>;

/// Per-model relation index
///
/// `process` must be called once per loaded model before lookups; relations
/// added through `add_relation` keep the index current.
#[derive(Debug, Default)]
pub struct RelationsIndexer {
    indices: FxHashMap<String, ModelIndex>,
}

impl RelationsIndexer {
    /// Create an empty indexer
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a model's relationship entities into the index
    ///
    /// Re-processing a model replaces its previous index.
    pub fn process(&mut self, model_id: impl Into<String>, model: &Model) {
        let mut index = ModelIndex::default();

        for entity in model.entities() {
            let (kind, related_at, relating_at) = match entity.ifc_type {
                IfcType::IfcRelDefinesByProperties => (RelationKind::IsDefinedBy, 4, 5),
                IfcType::IfcRelContainedInSpatialStructure => {
                    (RelationKind::ContainedInStructure, 4, 5)
                }
                IfcType::IfcRelAssociatesMaterial | IfcType::IfcRelAssociatesClassification => {
                    (RelationKind::HasAssociations, 4, 5)
                }
                _ => continue,
            };

            let Some(target) = entity.get_ref(relating_at) else {
                continue;
            };
            let Some(related) = entity.get_list(related_at) else {
                continue;
            };

            for item in related {
                if let Some(element) = item.as_ref_id() {
                    index.entry((element, kind)).or_default().push(target);
                }
            }
        }

        let model_id = model_id.into();
        tracing::debug!(model = %model_id, entries = index.len(), "relation index built");
        self.indices.insert(model_id, index);
    }

    /// Relation targets of an element under one inverse kind
    /// Unknown models and unrelated elements yield an empty slice.
    pub fn get_relations(&self, model_id: &str, element: u32, kind: RelationKind) -> &[u32] {
        self.indices
            .get(model_id)
            .and_then(|index| index.get(&(element, kind)))
            .map(|targets| targets.as_slice())
            .unwrap_or(&[])
    }

    /// Create a relationship entity linking `element` to `target` and record
    /// it in the index
    ///
    /// Returns the express id of the new relationship entity.
    pub async fn add_relation(
        &mut self,
        model_id: &str,
        model: &mut Model,
        element: u32,
        tag: RelationTag,
        target: u32,
    ) -> Result<u32> {
        let rel = EntityInstance::new(
            0,
            tag.rel_type,
            vec![
                AttrValue::Text(new_global_id()),
                AttrValue::Null,
                AttrValue::Null,
                AttrValue::Null,
                AttrValue::List(vec![AttrValue::Ref(element)]),
                AttrValue::Ref(target),
            ],
        );
        let rel_id = model.register(rel).await;

        self.indices
            .entry(model_id.to_string())
            .or_default()
            .entry((element, tag.inverse))
            .or_default()
            .push(target);

        Ok(rel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"
#5=IFCOWNERHISTORY($,$,$,.ADDED.,$,$,$,1700000000);
#10=IFCWALL('a',#5,'Wall-001',$,$,$,$,$);
#11=IFCWALL('b',#5,'Wall-002',$,$,$,$,$);
#20=IFCPROPERTYSINGLEVALUE('FireRating',$,IFCLABEL('A'),$);
#21=IFCPROPERTYSET('c',#5,'Pset_Custom',$,(#20));
#22=IFCRELDEFINESBYPROPERTIES('d',#5,$,$,(#10,#11),#21);
"#;

    #[test]
    fn test_process_and_lookup() {
        let model = Model::from_step(CONTENT);
        let mut indexer = RelationsIndexer::new();
        indexer.process("demo", &model);

        assert_eq!(
            indexer.get_relations("demo", 10, RelationKind::IsDefinedBy),
            &[21]
        );
        assert_eq!(
            indexer.get_relations("demo", 11, RelationKind::IsDefinedBy),
            &[21]
        );
        // Wrong kind, unknown element, unknown model
        assert!(indexer
            .get_relations("demo", 10, RelationKind::HasAssociations)
            .is_empty());
        assert!(indexer
            .get_relations("demo", 99, RelationKind::IsDefinedBy)
            .is_empty());
        assert!(indexer
            .get_relations("other", 10, RelationKind::IsDefinedBy)
            .is_empty());
    }

    #[tokio::test]
    async fn test_add_relation() {
        let mut model = Model::from_step(CONTENT);
        let mut indexer = RelationsIndexer::new();
        indexer.process("demo", &model);

        let before = model.len();
        let rel_id = indexer
            .add_relation(
                "demo",
                &mut model,
                11,
                RelationTag::defines_by_properties(),
                40,
            )
            .await
            .unwrap();

        assert_eq!(model.len(), before + 1);
        let rel = model.attributes(rel_id).await.unwrap();
        assert_eq!(rel.ifc_type, IfcType::IfcRelDefinesByProperties);
        assert_eq!(rel.get_ref(5), Some(40));
        assert_eq!(
            indexer.get_relations("demo", 11, RelationKind::IsDefinedBy),
            &[21, 40]
        );
    }
}
