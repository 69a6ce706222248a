//! IFC Schema Types
//!
//! Fast type checking using an enum instead of string comparison. The set is
//! cut down to what property and relation handling needs; everything else
//! falls back to a hashed `Unknown`.

use std::fmt;

/// IFC Entity Types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IfcType {
    // Building elements
    IfcWall,
    IfcWallStandardCase,
    IfcSlab,
    IfcBeam,
    IfcColumn,
    IfcRoof,
    IfcStair,
    IfcRamp,
    IfcRailing,
    IfcCurtainWall,
    IfcPlate,
    IfcMember,
    IfcCovering,
    IfcFooting,
    IfcDoor,
    IfcWindow,
    IfcBuildingElementProxy,
    IfcFurnishingElement,

    // Spatial structure
    IfcSpace,
    IfcBuildingStorey,
    IfcBuilding,
    IfcSite,
    IfcProject,

    // Relationships
    IfcRelAggregates,
    IfcRelContainedInSpatialStructure,
    IfcRelDefinesByProperties,
    IfcRelDefinesByType,
    IfcRelAssociatesMaterial,
    IfcRelAssociatesClassification,

    // Property definitions
    IfcPropertySet,
    IfcPropertySingleValue,
    IfcPropertyEnumeratedValue,
    IfcComplexProperty,
    IfcElementQuantity,

    // Ownership chain
    IfcOwnerHistory,
    IfcPerson,
    IfcOrganization,
    IfcPersonAndOrganization,
    IfcApplication,

    // Fallback for everything else; stores a hash of the type name
    Unknown(u16),
}

impl IfcType {
    /// Parse an uppercase STEP type name
    pub fn from_name(s: &str) -> Self {
        match s {
            "IFCWALL" => Self::IfcWall,
            "IFCWALLSTANDARDCASE" => Self::IfcWallStandardCase,
            "IFCSLAB" => Self::IfcSlab,
            "IFCBEAM" => Self::IfcBeam,
            "IFCCOLUMN" => Self::IfcColumn,
            "IFCROOF" => Self::IfcRoof,
            "IFCSTAIR" => Self::IfcStair,
            "IFCRAMP" => Self::IfcRamp,
            "IFCRAILING" => Self::IfcRailing,
            "IFCCURTAINWALL" => Self::IfcCurtainWall,
            "IFCPLATE" => Self::IfcPlate,
            "IFCMEMBER" => Self::IfcMember,
            "IFCCOVERING" => Self::IfcCovering,
            "IFCFOOTING" => Self::IfcFooting,
            "IFCDOOR" => Self::IfcDoor,
            "IFCWINDOW" => Self::IfcWindow,
            "IFCBUILDINGELEMENTPROXY" => Self::IfcBuildingElementProxy,
            "IFCFURNISHINGELEMENT" => Self::IfcFurnishingElement,

            "IFCSPACE" => Self::IfcSpace,
            "IFCBUILDINGSTOREY" => Self::IfcBuildingStorey,
            "IFCBUILDING" => Self::IfcBuilding,
            "IFCSITE" => Self::IfcSite,
            "IFCPROJECT" => Self::IfcProject,

            "IFCRELAGGREGATES" => Self::IfcRelAggregates,
            "IFCRELCONTAINEDINSPATIALSTRUCTURE" => Self::IfcRelContainedInSpatialStructure,
            "IFCRELDEFINESBYPROPERTIES" => Self::IfcRelDefinesByProperties,
            "IFCRELDEFINESBYTYPE" => Self::IfcRelDefinesByType,
            "IFCRELASSOCIATESMATERIAL" => Self::IfcRelAssociatesMaterial,
            "IFCRELASSOCIATESCLASSIFICATION" => Self::IfcRelAssociatesClassification,

            "IFCPROPERTYSET" => Self::IfcPropertySet,
            "IFCPROPERTYSINGLEVALUE" => Self::IfcPropertySingleValue,
            "IFCPROPERTYENUMERATEDVALUE" => Self::IfcPropertyEnumeratedValue,
            "IFCCOMPLEXPROPERTY" => Self::IfcComplexProperty,
            "IFCELEMENTQUANTITY" => Self::IfcElementQuantity,

            "IFCOWNERHISTORY" => Self::IfcOwnerHistory,
            "IFCPERSON" => Self::IfcPerson,
            "IFCORGANIZATION" => Self::IfcOrganization,
            "IFCPERSONANDORGANIZATION" => Self::IfcPersonAndOrganization,
            "IFCAPPLICATION" => Self::IfcApplication,

            _ => Self::Unknown(simple_hash(s)),
        }
    }

    /// Get the uppercase STEP name
    pub fn name(&self) -> &'static str {
        match self {
            Self::IfcWall => "IFCWALL",
            Self::IfcWallStandardCase => "IFCWALLSTANDARDCASE",
            Self::IfcSlab => "IFCSLAB",
            Self::IfcBeam => "IFCBEAM",
            Self::IfcColumn => "IFCCOLUMN",
            Self::IfcRoof => "IFCROOF",
            Self::IfcStair => "IFCSTAIR",
            Self::IfcRamp => "IFCRAMP",
            Self::IfcRailing => "IFCRAILING",
            Self::IfcCurtainWall => "IFCCURTAINWALL",
            Self::IfcPlate => "IFCPLATE",
            Self::IfcMember => "IFCMEMBER",
            Self::IfcCovering => "IFCCOVERING",
            Self::IfcFooting => "IFCFOOTING",
            Self::IfcDoor => "IFCDOOR",
            Self::IfcWindow => "IFCWINDOW",
            Self::IfcBuildingElementProxy => "IFCBUILDINGELEMENTPROXY",
            Self::IfcFurnishingElement => "IFCFURNISHINGELEMENT",

            Self::IfcSpace => "IFCSPACE",
            Self::IfcBuildingStorey => "IFCBUILDINGSTOREY",
            Self::IfcBuilding => "IFCBUILDING",
            Self::IfcSite => "IFCSITE",
            Self::IfcProject => "IFCPROJECT",

            Self::IfcRelAggregates => "IFCRELAGGREGATES",
            Self::IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE",
            Self::IfcRelDefinesByProperties => "IFCRELDEFINESBYPROPERTIES",
            Self::IfcRelDefinesByType => "IFCRELDEFINESBYTYPE",
            Self::IfcRelAssociatesMaterial => "IFCRELASSOCIATESMATERIAL",
            Self::IfcRelAssociatesClassification => "IFCRELASSOCIATESCLASSIFICATION",

            Self::IfcPropertySet => "IFCPROPERTYSET",
            Self::IfcPropertySingleValue => "IFCPROPERTYSINGLEVALUE",
            Self::IfcPropertyEnumeratedValue => "IFCPROPERTYENUMERATEDVALUE",
            Self::IfcComplexProperty => "IFCCOMPLEXPROPERTY",
            Self::IfcElementQuantity => "IFCELEMENTQUANTITY",

            Self::IfcOwnerHistory => "IFCOWNERHISTORY",
            Self::IfcPerson => "IFCPERSON",
            Self::IfcOrganization => "IFCORGANIZATION",
            Self::IfcPersonAndOrganization => "IFCPERSONANDORGANIZATION",
            Self::IfcApplication => "IFCAPPLICATION",

            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Check if this is a spatial structure element
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            Self::IfcProject
                | Self::IfcSite
                | Self::IfcBuilding
                | Self::IfcBuildingStorey
                | Self::IfcSpace
        )
    }

    /// Check if this is a building element that can carry property sets
    pub fn is_element(&self) -> bool {
        matches!(
            self,
            Self::IfcWall
                | Self::IfcWallStandardCase
                | Self::IfcSlab
                | Self::IfcBeam
                | Self::IfcColumn
                | Self::IfcRoof
                | Self::IfcStair
                | Self::IfcRamp
                | Self::IfcRailing
                | Self::IfcCurtainWall
                | Self::IfcPlate
                | Self::IfcMember
                | Self::IfcCovering
                | Self::IfcFooting
                | Self::IfcDoor
                | Self::IfcWindow
                | Self::IfcBuildingElementProxy
                | Self::IfcFurnishingElement
        )
    }

    /// Check if this is a relationship
    pub fn is_relationship(&self) -> bool {
        matches!(
            self,
            Self::IfcRelAggregates
                | Self::IfcRelContainedInSpatialStructure
                | Self::IfcRelDefinesByProperties
                | Self::IfcRelDefinesByType
                | Self::IfcRelAssociatesMaterial
                | Self::IfcRelAssociatesClassification
        )
    }

    /// Check if this is a property definition that can sit behind IsDefinedBy
    pub fn is_property_definition(&self) -> bool {
        matches!(
            self,
            Self::IfcPropertySet | Self::IfcElementQuantity
        )
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Simple hash function for unknown IFC types
fn simple_hash(s: &str) -> u16 {
    let mut hash: u32 = 5381;
    for byte in s.bytes() {
        hash = ((hash << 5).wrapping_add(hash)).wrapping_add(byte as u32);
    }
    (hash & 0xFFFF) as u16
}
