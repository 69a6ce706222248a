// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property set and property creation
//!
//! Creation primitives for the entities the reconciler writes back into a
//! model: property sets, single-value properties, and set membership.
//! `new_single_property` is deliberately loose about the value kind versus
//! the declared data type; callers validate at their own boundary.

use crate::error::{Error, Result};
use crate::guid::new_global_id;
use crate::model::Model;
use crate::schema::IfcType;
use crate::value::{AttrValue, EntityInstance, PropertyValue};

/// IfcPropertySet attribute positions: Name and HasProperties
pub const PSET_NAME: usize = 2;
pub const PSET_HAS_PROPERTIES: usize = 4;

/// IfcPropertySingleValue attribute positions: Name and NominalValue
pub const PROP_NAME: usize = 0;
pub const PROP_NOMINAL_VALUE: usize = 2;

/// Creation primitives over one model's graph
pub struct PropertyManager;

impl PropertyManager {
    /// Express id of the model's owner history
    ///
    /// The lowest-id IfcOwnerHistory entity wins when a file carries several.
    /// A model without one cannot receive new property sets.
    pub async fn owner_history(model: &Model) -> Result<u32> {
        model
            .ids_of_type(IfcType::IfcOwnerHistory)
            .first()
            .copied()
            .ok_or(Error::MissingOwnerHistory)
    }

    /// Create and register an empty property set
    pub async fn create_property_set(model: &mut Model, name: &str) -> Result<u32> {
        let owner = Self::owner_history(model).await?;

        let pset = EntityInstance::new(
            0,
            IfcType::IfcPropertySet,
            vec![
                AttrValue::Text(new_global_id()),
                AttrValue::Ref(owner),
                AttrValue::Text(name.to_string()),
                AttrValue::Null,
                AttrValue::List(vec![]),
            ],
        );

        Ok(model.register(pset).await)
    }

    /// Create and register a single-value property
    ///
    /// The nominal value is wrapped under the declared data type without
    /// checking that the two agree.
    pub async fn new_single_property(
        model: &mut Model,
        data_type: &str,
        name: &str,
        value: PropertyValue,
    ) -> u32 {
        let property = EntityInstance::new(
            0,
            IfcType::IfcPropertySingleValue,
            vec![
                AttrValue::Text(name.to_string()),
                AttrValue::Null,
                value.to_attr(data_type),
                AttrValue::Null,
            ],
        );

        model.register(property).await
    }

    /// Append a property reference to a set's HasProperties list
    pub async fn append_to_set(model: &mut Model, pset: u32, property: u32) -> Result<()> {
        model
            .push_list_item(pset, PSET_HAS_PROPERTIES, AttrValue::Ref(property))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"
#5=IFCOWNERHISTORY($,$,$,.ADDED.,$,$,$,1700000000);
#10=IFCWALL('a',#5,'Wall-001',$,$,$,$,$);
"#;

    #[tokio::test]
    async fn test_owner_history() {
        let model = Model::from_step(CONTENT);
        assert_eq!(PropertyManager::owner_history(&model).await.unwrap(), 5);

        let empty = Model::new();
        assert!(matches!(
            PropertyManager::owner_history(&empty).await,
            Err(Error::MissingOwnerHistory)
        ));
    }

    #[tokio::test]
    async fn test_create_property_set() {
        let mut model = Model::from_step(CONTENT);
        let pset = PropertyManager::create_property_set(&mut model, "Pset_Custom")
            .await
            .unwrap();

        let entity = model.attributes(pset).await.unwrap();
        assert_eq!(entity.ifc_type, IfcType::IfcPropertySet);
        assert_eq!(entity.get_text(PSET_NAME), Some("Pset_Custom"));
        assert_eq!(entity.get_ref(1), Some(5));
        assert!(entity.get_list(PSET_HAS_PROPERTIES).unwrap().is_empty());
        // GlobalId is a fresh 22-character id
        assert_eq!(entity.get_text(0).unwrap().len(), 22);
    }

    #[tokio::test]
    async fn test_create_property_set_requires_owner_history() {
        let mut model = Model::new();
        assert!(matches!(
            PropertyManager::create_property_set(&mut model, "Pset_Custom").await,
            Err(Error::MissingOwnerHistory)
        ));
    }

    #[tokio::test]
    async fn test_new_single_property_is_loose() {
        let mut model = Model::from_step(CONTENT);

        // A boolean under a label type is accepted; validation is the
        // caller's concern.
        let id = PropertyManager::new_single_property(
            &mut model,
            "IfcLabel",
            "FireRating",
            PropertyValue::Boolean(true),
        )
        .await;

        let entity = model.attributes(id).await.unwrap();
        assert_eq!(entity.get_text(PROP_NAME), Some("FireRating"));
        let (tag, inner) = entity.get(PROP_NOMINAL_VALUE).unwrap().as_typed().unwrap();
        assert_eq!(tag, "IFCLABEL");
        assert_eq!(inner.as_enum(), Some("T"));
    }

    #[tokio::test]
    async fn test_append_to_set() {
        let mut model = Model::from_step(CONTENT);
        let pset = PropertyManager::create_property_set(&mut model, "Pset_Custom")
            .await
            .unwrap();
        let prop = PropertyManager::new_single_property(
            &mut model,
            "IfcLabel",
            "FireRating",
            PropertyValue::from("A"),
        )
        .await;

        PropertyManager::append_to_set(&mut model, pset, prop)
            .await
            .unwrap();

        let entity = model.attributes(pset).await.unwrap();
        let members = entity.get_list(PSET_HAS_PROPERTIES).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].as_ref_id(), Some(prop));
    }
}
