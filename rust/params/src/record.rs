// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property records
//!
//! The flat, user-editable view of one property requirement. Records are
//! extracted from a specification and carried through restriction and
//! reconciliation; the presentation layer may rewrite any field before the
//! record is committed to a model.

use ids_lite_core::PropertyValue;

/// One property requirement, flattened
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyRecord {
    /// Identifier of the originating specification
    pub spec_id: String,
    /// Property set name
    pub pset: String,
    /// Property name
    pub name: String,
    /// Declared IFC data type, e.g. "IFCLABEL"
    pub data_type: String,
    /// Threshold value from the requirement, possibly edited by the user
    pub value: PropertyValue,
}

impl PropertyRecord {
    /// Value reinterpreted against the declared data type
    ///
    /// The creation primitive downstream accepts any value kind, so this is
    /// the one place where the literal and the data type are reconciled:
    /// boolean and numeric types parse the text form, everything else stays
    /// text. A literal that does not parse is passed through unchanged.
    pub fn coerced_value(&self) -> PropertyValue {
        let PropertyValue::Text(literal) = &self.value else {
            return self.value.clone();
        };
        let text = literal.trim();

        let data_type = self.data_type.to_ascii_uppercase();
        match data_type.as_str() {
            "IFCBOOLEAN" | "IFCLOGICAL" => match text.to_ascii_uppercase().as_str() {
                "TRUE" | "T" | ".T." | "1" => PropertyValue::Boolean(true),
                "FALSE" | "F" | ".F." | "0" => PropertyValue::Boolean(false),
                _ => self.value.clone(),
            },
            "IFCINTEGER" | "IFCCOUNTMEASURE" => text
                .parse::<i64>()
                .map(PropertyValue::Integer)
                .unwrap_or_else(|_| self.value.clone()),
            "IFCREAL" | "IFCNUMERICMEASURE" => text
                .parse::<f64>()
                .map(PropertyValue::Real)
                .unwrap_or_else(|_| self.value.clone()),
            other if other.ends_with("MEASURE") => text
                .parse::<f64>()
                .map(PropertyValue::Real)
                .unwrap_or_else(|_| self.value.clone()),
            _ => self.value.clone(),
        }
    }
}
