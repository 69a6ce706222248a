// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute values and entity instances
//!
//! Owned representation of STEP attribute data. Entities created at runtime
//! share the same value tree as entities decoded from file content.

use crate::schema::IfcType;
use std::fmt;

/// One STEP attribute value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    /// Entity reference: #123
    Ref(u32),
    /// String literal: 'text'
    Text(String),
    /// Integer: 42
    Integer(i64),
    /// Real: 3.14, 0.
    Real(f64),
    /// Enum literal: .T., .ELEMENT.
    Enum(String),
    /// Typed select value: IFCLABEL('A'), IFCBOOLEAN(.T.)
    ///
    /// Kept as a first-class variant because property nominal values round-trip
    /// through their type tag.
    Typed(String, Box<AttrValue>),
    /// List of values, possibly nested: (#1,#2)
    List(Vec<AttrValue>),
    /// Null value: $
    Null,
    /// Derived value: *
    Derived,
}

impl AttrValue {
    /// Get as entity reference
    #[inline]
    pub fn as_ref_id(&self) -> Option<u32> {
        match self {
            AttrValue::Ref(id) => Some(*id),
            _ => None,
        }
    }

    /// Get as plain string
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as enum literal (without the dots)
    #[inline]
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            AttrValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Get as real, widening integers
    #[inline]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            AttrValue::Real(f) => Some(*f),
            AttrValue::Integer(i) => Some(*i as f64),
            AttrValue::Typed(_, inner) => inner.as_real(),
            _ => None,
        }
    }

    /// Get as integer
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(i) => Some(*i),
            AttrValue::Typed(_, inner) => inner.as_int(),
            _ => None,
        }
    }

    /// Get as list
    #[inline]
    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the type tag and inner value of a typed select
    #[inline]
    pub fn as_typed(&self) -> Option<(&str, &AttrValue)> {
        match self {
            AttrValue::Typed(tag, inner) => Some((tag, inner)),
            _ => None,
        }
    }

    /// String content of either a plain string or a typed string
    ///
    /// Name and NominalValue attributes appear both ways in real files:
    /// `'FireRating'` and `IFCLABEL('FireRating')`.
    #[inline]
    pub fn string_content(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Typed(_, inner) => inner.string_content(),
            _ => None,
        }
    }

    /// Check if null/derived
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null | AttrValue::Derived)
    }
}

/// One entity instance of the model graph
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityInstance {
    /// Express id; 0 means "not yet registered with a model"
    pub id: u32,
    pub ifc_type: IfcType,
    pub attributes: Vec<AttrValue>,
}

impl EntityInstance {
    /// Create a new instance
    pub fn new(id: u32, ifc_type: IfcType, attributes: Vec<AttrValue>) -> Self {
        Self {
            id,
            ifc_type,
            attributes,
        }
    }

    /// Get attribute by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&AttrValue> {
        self.attributes.get(index)
    }

    /// Get entity reference attribute
    #[inline]
    pub fn get_ref(&self, index: usize) -> Option<u32> {
        self.get(index).and_then(|v| v.as_ref_id())
    }

    /// Get plain string attribute
    #[inline]
    pub fn get_text(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_text())
    }

    /// Get string content of a plain or typed string attribute
    #[inline]
    pub fn get_string_content(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.string_content())
    }

    /// Get real attribute
    #[inline]
    pub fn get_real(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|v| v.as_real())
    }

    /// Get list attribute
    #[inline]
    pub fn get_list(&self, index: usize) -> Option<&[AttrValue]> {
        self.get(index).and_then(|v| v.as_list())
    }

    /// Mutable access to a list attribute, for in-place membership updates
    pub fn get_list_mut(&mut self, index: usize) -> Option<&mut Vec<AttrValue>> {
        match self.attributes.get_mut(index) {
            Some(AttrValue::List(items)) => Some(items),
            _ => None,
        }
    }
}

/// Literal value of a property, tagged by kind
///
/// The data type of the enclosing property is carried separately as the
/// declared IFC type name; the creation primitive accepts any combination
/// of the two.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    Text(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
}

impl PropertyValue {
    /// Wrap into a typed STEP attribute under the declared data type
    pub fn to_attr(&self, data_type: &str) -> AttrValue {
        let inner = match self {
            PropertyValue::Text(s) => AttrValue::Text(s.clone()),
            PropertyValue::Real(f) => AttrValue::Real(*f),
            PropertyValue::Integer(i) => AttrValue::Integer(*i),
            PropertyValue::Boolean(b) => AttrValue::Enum(if *b { "T" } else { "F" }.to_string()),
        };
        AttrValue::Typed(data_type.to_ascii_uppercase(), Box::new(inner))
    }

    /// Get as plain text
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Real(v) => write!(f, "{}", v),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_content() {
        let plain = AttrValue::Text("Pset_Custom".to_string());
        assert_eq!(plain.string_content(), Some("Pset_Custom"));

        let typed = AttrValue::Typed(
            "IFCLABEL".to_string(),
            Box::new(AttrValue::Text("FireRating".to_string())),
        );
        assert_eq!(typed.string_content(), Some("FireRating"));

        assert_eq!(AttrValue::Null.string_content(), None);
    }

    #[test]
    fn test_entity_accessors() {
        let entity = EntityInstance::new(
            7,
            IfcType::IfcPropertySet,
            vec![
                AttrValue::Text("guid".to_string()),
                AttrValue::Ref(5),
                AttrValue::Text("Pset_Custom".to_string()),
                AttrValue::Null,
                AttrValue::List(vec![AttrValue::Ref(20)]),
            ],
        );

        assert_eq!(entity.get_text(2), Some("Pset_Custom"));
        assert_eq!(entity.get_ref(1), Some(5));
        assert_eq!(entity.get_list(4).map(|l| l.len()), Some(1));
        assert!(entity.get(3).unwrap().is_null());
    }

    #[test]
    fn test_list_mut_append() {
        let mut entity = EntityInstance::new(
            7,
            IfcType::IfcPropertySet,
            vec![AttrValue::List(vec![])],
        );

        entity.get_list_mut(0).unwrap().push(AttrValue::Ref(42));
        assert_eq!(entity.get_list(0).unwrap().len(), 1);
    }

    #[test]
    fn test_property_value_to_attr() {
        let value = PropertyValue::Text("A".to_string());
        let attr = value.to_attr("IfcLabel");
        assert_eq!(attr.as_typed().map(|(tag, _)| tag), Some("IFCLABEL"));
        assert_eq!(attr.string_content(), Some("A"));

        let flag = PropertyValue::Boolean(true).to_attr("IFCBOOLEAN");
        let (_, inner) = flag.as_typed().unwrap();
        assert_eq!(inner.as_enum(), Some("T"));
    }
}
