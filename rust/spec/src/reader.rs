// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDS document reader
//!
//! Event-driven XML reading of IDS files. Element matching goes by local
//! name, so documents work with or without namespace prefixes. Unknown
//! elements are ignored; facets missing their required parameters are
//! dropped with a warning rather than failing the whole document.
//!
//! ```xml
//! <ids xmlns="http://standards.buildingsmart.org/IDS">
//!   <specifications>
//!     <specification name="Walls" ifcVersion="IFC4" identifier="SPEC-1">
//!       <applicability>
//!         <entity><name><simpleValue>IFCWALL</simpleValue></name></entity>
//!       </applicability>
//!       <requirements>
//!         <property dataType="IFCLABEL">
//!           <propertySet><simpleValue>Pset_Custom</simpleValue></propertySet>
//!           <baseName><simpleValue>FireRating</simpleValue></baseName>
//!           <value><simpleValue>A</simpleValue></value>
//!         </property>
//!       </requirements>
//!     </specification>
//!   </specifications>
//! </ids>
//! ```

use crate::error::{Error, Result};
use crate::types::{
    AttributeFacet, ClassificationFacet, EntityFacet, Facet, IdsParameter, MaterialFacet,
    PropertyFacet, Specification,
};
use ids_lite_core::new_global_id;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Read all specifications out of one IDS document
pub fn read_document(xml: &str) -> Result<Vec<Specification>> {
    IdsReader::default().read(xml)
}

/// Which facet list of the current specification is being filled
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Section {
    #[default]
    None,
    Applicability,
    Requirements,
}

/// Parameter slot of the facet currently being built
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Name,
    PredefinedType,
    PropertySet,
    BaseName,
    Value,
    System,
}

/// Facet under construction
#[derive(Debug, Default)]
struct FacetBuilder {
    tag: String,
    data_type: Option<String>,
    name: Option<IdsParameter>,
    predefined_type: Option<IdsParameter>,
    property_set: Option<IdsParameter>,
    base_name: Option<IdsParameter>,
    value: Option<IdsParameter>,
    system: Option<IdsParameter>,
}

impl FacetBuilder {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    fn assign(&mut self, slot: Slot, param: IdsParameter) {
        let field = match slot {
            Slot::Name => &mut self.name,
            Slot::PredefinedType => &mut self.predefined_type,
            Slot::PropertySet => &mut self.property_set,
            Slot::BaseName => &mut self.base_name,
            Slot::Value => &mut self.value,
            Slot::System => &mut self.system,
        };
        *field = Some(param);
    }

    /// Turn the builder into a facet; None when required parameters are
    /// missing
    fn finish(self) -> Option<Facet> {
        match self.tag.as_str() {
            "entity" => Some(Facet::Entity(EntityFacet {
                name: self.name?,
                predefined_type: self.predefined_type,
            })),
            "property" => Some(Facet::Property(PropertyFacet {
                property_set: self.property_set?,
                base_name: self.base_name?,
                data_type: self.data_type,
                value: self.value,
            })),
            "attribute" => Some(Facet::Attribute(AttributeFacet {
                name: self.name?,
                value: self.value,
            })),
            "classification" => Some(Facet::Classification(ClassificationFacet {
                system: self.system,
                value: self.value,
            })),
            "material" => Some(Facet::Material(MaterialFacet { value: self.value })),
            _ => None,
        }
    }
}

/// Restriction under construction (xs:restriction)
#[derive(Debug, Default)]
struct RestrictionBuilder {
    enumeration: Vec<String>,
    pattern: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
}

impl RestrictionBuilder {
    fn finish(self) -> Option<IdsParameter> {
        if !self.enumeration.is_empty() {
            Some(IdsParameter::Enumeration(self.enumeration))
        } else if let Some(pattern) = self.pattern {
            Some(IdsParameter::Pattern(pattern))
        } else if self.min.is_some() || self.max.is_some() {
            Some(IdsParameter::Bounds {
                min: self.min,
                max: self.max,
            })
        } else {
            None
        }
    }
}

#[derive(Default)]
struct IdsReader {
    specs: Vec<Specification>,
    current: Option<Specification>,
    section: Section,
    facet: Option<FacetBuilder>,
    slot: Option<Slot>,
    restriction: Option<RestrictionBuilder>,
    text: String,
    capturing: bool,
}

impl IdsReader {
    fn read(mut self, xml: &str) -> Result<Vec<Specification>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => self.handle_start(e)?,
                Ok(Event::Empty(ref e)) => {
                    self.handle_start(e)?;
                    let name = local_name(e).to_string();
                    self.handle_end(&name);
                }
                Ok(Event::End(ref e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.handle_end(&name);
                }
                Ok(Event::Text(ref t)) => {
                    if self.capturing {
                        let text = t
                            .unescape()
                            .map_err(|e| Error::xml(format!("invalid text content: {e}")))?;
                        self.text.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::xml(format!(
                        "parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
        }

        Ok(self.specs)
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) -> Result<()> {
        match local_name(e) {
            "specification" => {
                self.current = Some(Specification {
                    identifier: attr(e, "identifier")?.unwrap_or_default(),
                    name: attr(e, "name")?,
                    description: attr(e, "description")?,
                    ifc_versions: attr(e, "ifcVersion")?
                        .map(|v| v.split_whitespace().map(str::to_string).collect())
                        .unwrap_or_default(),
                    applicability: Vec::new(),
                    requirements: Vec::new(),
                });
            }
            "applicability" if self.current.is_some() => {
                self.section = Section::Applicability;
            }
            "requirements" if self.current.is_some() => {
                self.section = Section::Requirements;
            }
            tag @ ("entity" | "property" | "attribute" | "classification" | "material")
                if self.section != Section::None && self.facet.is_none() =>
            {
                let mut facet = FacetBuilder::new(tag);
                facet.data_type = attr(e, "dataType")?;
                self.facet = Some(facet);
            }
            "name" if self.facet.is_some() => self.slot = Some(Slot::Name),
            "predefinedType" if self.facet.is_some() => self.slot = Some(Slot::PredefinedType),
            "propertySet" if self.facet.is_some() => self.slot = Some(Slot::PropertySet),
            "baseName" if self.facet.is_some() => self.slot = Some(Slot::BaseName),
            "value" if self.facet.is_some() => self.slot = Some(Slot::Value),
            "system" if self.facet.is_some() => self.slot = Some(Slot::System),
            "simpleValue" => {
                self.capturing = true;
                self.text.clear();
            }
            "restriction" if self.slot.is_some() => {
                self.restriction = Some(RestrictionBuilder::default());
            }
            "enumeration" => {
                if let (Some(restriction), Some(value)) =
                    (self.restriction.as_mut(), attr(e, "value")?)
                {
                    restriction.enumeration.push(value);
                }
            }
            "pattern" => {
                if let Some(restriction) = self.restriction.as_mut() {
                    restriction.pattern = attr(e, "value")?;
                }
            }
            "minInclusive" | "minExclusive" => {
                if let Some(restriction) = self.restriction.as_mut() {
                    restriction.min = attr(e, "value")?.and_then(|v| v.parse().ok());
                }
            }
            "maxInclusive" | "maxExclusive" => {
                if let Some(restriction) = self.restriction.as_mut() {
                    restriction.max = attr(e, "value")?.and_then(|v| v.parse().ok());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_end(&mut self, name: &str) {
        match name {
            "simpleValue" => {
                self.capturing = false;
                let text = std::mem::take(&mut self.text);
                self.assign_param(IdsParameter::Simple(text));
            }
            "restriction" => {
                if let Some(param) = self.restriction.take().and_then(RestrictionBuilder::finish) {
                    self.assign_param(param);
                }
            }
            "name" | "predefinedType" | "propertySet" | "baseName" | "value" | "system" => {
                self.slot = None;
            }
            "entity" | "property" | "attribute" | "classification" | "material" => {
                if let Some(builder) = self.facet.take() {
                    let tag = builder.tag.clone();
                    match builder.finish() {
                        Some(facet) => self.push_facet(facet),
                        None => {
                            tracing::warn!(facet = %tag, "dropping facet with missing parameters")
                        }
                    }
                }
            }
            "applicability" | "requirements" => {
                self.section = Section::None;
            }
            "specification" => {
                if let Some(mut spec) = self.current.take() {
                    if spec.identifier.is_empty() {
                        spec.identifier = spec.name.clone().unwrap_or_else(new_global_id);
                    }
                    self.specs.push(spec);
                }
            }
            _ => {}
        }
    }

    fn assign_param(&mut self, param: IdsParameter) {
        if let (Some(facet), Some(slot)) = (self.facet.as_mut(), self.slot) {
            facet.assign(slot, param);
        }
    }

    fn push_facet(&mut self, facet: Facet) {
        let Some(spec) = self.current.as_mut() else {
            return;
        };
        match self.section {
            Section::Applicability => spec.applicability.push(facet),
            Section::Requirements => spec.requirements.push(facet),
            Section::None => {}
        }
    }
}

/// Local element name, prefix stripped
fn local_name<'a>(e: &'a BytesStart<'_>) -> &'a str {
    std::str::from_utf8(e.local_name().into_inner()).unwrap_or("")
}

/// Attribute by local name, unescaped
fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attribute in e.attributes() {
        let attribute =
            attribute.map_err(|e| Error::xml(format!("invalid attribute: {e}")))?;
        if attribute.key.local_name().as_ref() == name.as_bytes() {
            let value = attribute
                .unescape_value()
                .map_err(|e| Error::xml(format!("invalid attribute value: {e}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ids:ids xmlns:ids="http://standards.buildingsmart.org/IDS" xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <ids:info><ids:title>Demo</ids:title></ids:info>
  <ids:specifications>
    <ids:specification name="Walls need fire rating" ifcVersion="IFC4" identifier="SPEC-1">
      <ids:applicability>
        <ids:entity><ids:name><ids:simpleValue>IFCWALL</ids:simpleValue></ids:name></ids:entity>
      </ids:applicability>
      <ids:requirements>
        <ids:property dataType="IFCLABEL">
          <ids:propertySet><ids:simpleValue>Pset_Custom</ids:simpleValue></ids:propertySet>
          <ids:baseName><ids:simpleValue>FireRating</ids:simpleValue></ids:baseName>
          <ids:value><ids:simpleValue>A</ids:simpleValue></ids:value>
        </ids:property>
        <ids:property dataType="IFCLABEL">
          <ids:propertySet><ids:simpleValue>Pset_Custom</ids:simpleValue></ids:propertySet>
          <ids:baseName><ids:simpleValue>AcousticRating</ids:simpleValue></ids:baseName>
          <ids:value>
            <xs:restriction base="xs:string">
              <xs:enumeration value="R1"/>
              <xs:enumeration value="R2"/>
            </xs:restriction>
          </ids:value>
        </ids:property>
      </ids:requirements>
    </ids:specification>
  </ids:specifications>
</ids:ids>
"#;

    #[test]
    fn test_read_document() {
        let specs = read_document(IDS).unwrap();
        assert_eq!(specs.len(), 1);

        let spec = &specs[0];
        assert_eq!(spec.identifier, "SPEC-1");
        assert_eq!(spec.name.as_deref(), Some("Walls need fire rating"));
        assert_eq!(spec.ifc_versions, ["IFC4"]);
        assert_eq!(spec.applicability.len(), 1);
        assert_eq!(spec.requirements.len(), 2);

        let Facet::Entity(entity) = &spec.applicability[0] else {
            panic!("expected entity facet");
        };
        assert_eq!(entity.name.as_simple(), Some("IFCWALL"));

        let Facet::Property(simple) = &spec.requirements[0] else {
            panic!("expected property facet");
        };
        assert_eq!(simple.property_set.as_simple(), Some("Pset_Custom"));
        assert_eq!(simple.base_name.as_simple(), Some("FireRating"));
        assert_eq!(simple.data_type.as_deref(), Some("IFCLABEL"));
        assert_eq!(
            simple.value.as_ref().and_then(|v| v.as_simple()),
            Some("A")
        );

        let Facet::Property(restricted) = &spec.requirements[1] else {
            panic!("expected property facet");
        };
        assert_eq!(
            restricted.value,
            Some(IdsParameter::Enumeration(vec![
                "R1".to_string(),
                "R2".to_string()
            ]))
        );
    }

    #[test]
    fn test_identifier_falls_back_to_name() {
        let xml = r#"<ids xmlns="http://standards.buildingsmart.org/IDS">
  <specifications>
    <specification name="Unnamed check">
      <applicability/>
      <requirements/>
    </specification>
  </specifications>
</ids>"#;
        let specs = read_document(xml).unwrap();
        assert_eq!(specs[0].identifier, "Unnamed check");
    }

    #[test]
    fn test_facet_with_missing_parameters_is_dropped() {
        let xml = r#"<ids xmlns="http://standards.buildingsmart.org/IDS">
  <specifications>
    <specification identifier="S">
      <requirements>
        <property dataType="IFCLABEL">
          <baseName><simpleValue>Orphan</simpleValue></baseName>
        </property>
      </requirements>
    </specification>
  </specifications>
</ids>"#;
        let specs = read_document(xml).unwrap();
        assert!(specs[0].requirements.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(
            read_document("<ids><specifications></ids>"),
            Err(Error::Xml(_))
        ));
    }
}
