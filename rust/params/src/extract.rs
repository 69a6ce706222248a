//! Requirement extraction
//!
//! Filters a specification's requirement facets down to the flat records the
//! component can work with: property facets whose set and name are plain
//! strings, whose data type is declared, and whose value is a single
//! literal. Everything else does not apply and is excluded without being
//! reported.

use crate::record::PropertyRecord;
use ids_lite_core::PropertyValue;
use ids_lite_spec::{Facet, Specification};

/// Flatten a specification's property requirements
///
/// Pure; output order follows requirement order.
pub fn extract(spec: &Specification) -> Vec<PropertyRecord> {
    let mut records = Vec::new();

    for requirement in &spec.requirements {
        let Facet::Property(property) = requirement else {
            continue;
        };

        let Some(pset) = property.property_set.as_simple() else {
            continue;
        };
        let Some(name) = property.base_name.as_simple() else {
            continue;
        };
        let Some(data_type) = property.data_type.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        let Some(value) = property.value.as_ref().and_then(|v| v.as_simple()) else {
            continue;
        };

        records.push(PropertyRecord {
            spec_id: spec.identifier.clone(),
            pset: pset.to_string(),
            name: name.to_string(),
            data_type: data_type.to_string(),
            value: PropertyValue::from(value),
        });
    }

    records
}
