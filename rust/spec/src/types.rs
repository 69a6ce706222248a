// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDS data types
//!
//! A specification pairs an applicability facet list (which elements it
//! targets) with a requirement facet list (what those elements must
//! satisfy). Facet parameters are either a simple literal or a restriction.

/// One IDS specification
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Specification {
    /// Stable id; from the document when given, otherwise generated
    pub identifier: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Schema versions the specification applies to, e.g. "IFC4"
    pub ifc_versions: Vec<String>,
    /// Which elements the specification targets
    pub applicability: Vec<Facet>,
    /// What targeted elements must satisfy, in document order
    pub requirements: Vec<Facet>,
}

/// One facet of an applicability or requirement clause
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facet {
    Entity(EntityFacet),
    Property(PropertyFacet),
    Attribute(AttributeFacet),
    Classification(ClassificationFacet),
    Material(MaterialFacet),
}

impl Facet {
    /// Facet kind name, matching the IDS element names
    pub fn facet_type(&self) -> &'static str {
        match self {
            Facet::Entity(_) => "Entity",
            Facet::Property(_) => "Property",
            Facet::Attribute(_) => "Attribute",
            Facet::Classification(_) => "Classification",
            Facet::Material(_) => "Material",
        }
    }
}

/// Entity facet: matches elements by IFC type name
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityFacet {
    pub name: IdsParameter,
    pub predefined_type: Option<IdsParameter>,
}

/// Property facet: a property requirement or property-based applicability
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyFacet {
    pub property_set: IdsParameter,
    pub base_name: IdsParameter,
    /// Declared IFC data type name, e.g. "IFCLABEL"
    pub data_type: Option<String>,
    pub value: Option<IdsParameter>,
}

/// Attribute facet
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeFacet {
    pub name: IdsParameter,
    pub value: Option<IdsParameter>,
}

/// Classification facet
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationFacet {
    pub system: Option<IdsParameter>,
    pub value: Option<IdsParameter>,
}

/// Material facet
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialFacet {
    pub value: Option<IdsParameter>,
}

/// A facet parameter: a single literal or a constraint
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdsParameter {
    /// simpleValue literal
    Simple(String),
    /// xs:enumeration alternatives
    Enumeration(Vec<String>),
    /// xs:pattern regular expression, carried but not evaluated
    Pattern(String),
    /// xs:minInclusive / xs:maxInclusive numeric bounds
    Bounds { min: Option<f64>, max: Option<f64> },
}

impl IdsParameter {
    /// The literal of a simple parameter
    #[inline]
    pub fn as_simple(&self) -> Option<&str> {
        match self {
            IdsParameter::Simple(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is a single literal rather than a constraint
    #[inline]
    pub fn is_simple(&self) -> bool {
        matches!(self, IdsParameter::Simple(_))
    }

    /// Check a candidate value against the parameter
    ///
    /// Simple and enumeration parameters compare exactly; bounds parse the
    /// candidate as a number. Patterns are never evaluated and match nothing.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            IdsParameter::Simple(s) => s == candidate,
            IdsParameter::Enumeration(options) => options.iter().any(|o| o == candidate),
            IdsParameter::Pattern(_) => false,
            IdsParameter::Bounds { min, max } => {
                let Ok(v) = candidate.parse::<f64>() else {
                    return false;
                };
                min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m)
            }
        }
    }

    /// Case-insensitive variant of [`matches`](Self::matches), used for IFC
    /// type names
    pub fn matches_ignore_case(&self, candidate: &str) -> bool {
        match self {
            IdsParameter::Simple(s) => s.eq_ignore_ascii_case(candidate),
            IdsParameter::Enumeration(options) => {
                options.iter().any(|o| o.eq_ignore_ascii_case(candidate))
            }
            _ => self.matches(candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_matches() {
        let simple = IdsParameter::Simple("Pset_Custom".to_string());
        assert!(simple.matches("Pset_Custom"));
        assert!(!simple.matches("pset_custom"));
        assert!(simple.matches_ignore_case("PSET_CUSTOM"));

        let options = IdsParameter::Enumeration(vec!["A".to_string(), "B".to_string()]);
        assert!(options.matches("B"));
        assert!(!options.matches("C"));

        let bounds = IdsParameter::Bounds {
            min: Some(1.0),
            max: Some(2.0),
        };
        assert!(bounds.matches("1.5"));
        assert!(!bounds.matches("2.5"));
        assert!(!bounds.matches("not-a-number"));

        assert!(!IdsParameter::Pattern(".*".to_string()).matches("anything"));
    }

    #[test]
    fn test_facet_type_names() {
        let facet = Facet::Property(PropertyFacet {
            property_set: IdsParameter::Simple("Pset".to_string()),
            base_name: IdsParameter::Simple("Name".to_string()),
            data_type: None,
            value: None,
        });
        assert_eq!(facet.facet_type(), "Property");
    }
}
