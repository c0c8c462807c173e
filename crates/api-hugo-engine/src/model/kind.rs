use std::fmt;

use serde::Deserialize;

use super::excerpt::{Excerpt, Parameter, TypeParameter};

/// The kind of an API item, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum ApiItemKind {
    Model,
    Package,
    EntryPoint,
    Namespace,
    Class,
    Interface,
    Constructor,
    Method,
    MethodSignature,
    Property,
    PropertySignature,
    Function,
    Variable,
    TypeAlias,
    Enum,
    EnumMember,
}

impl ApiItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiItemKind::Model => "Model",
            ApiItemKind::Package => "Package",
            ApiItemKind::EntryPoint => "EntryPoint",
            ApiItemKind::Namespace => "Namespace",
            ApiItemKind::Class => "Class",
            ApiItemKind::Interface => "Interface",
            ApiItemKind::Constructor => "Constructor",
            ApiItemKind::Method => "Method",
            ApiItemKind::MethodSignature => "MethodSignature",
            ApiItemKind::Property => "Property",
            ApiItemKind::PropertySignature => "PropertySignature",
            ApiItemKind::Function => "Function",
            ApiItemKind::Variable => "Variable",
            ApiItemKind::TypeAlias => "TypeAlias",
            ApiItemKind::Enum => "Enum",
            ApiItemKind::EnumMember => "EnumMember",
        }
    }

    /// Packages, classes and interfaces get their own output document.
    /// Everything else is rendered inline within its nearest standalone ancestor.
    pub fn has_standalone_page(&self) -> bool {
        match self {
            ApiItemKind::Package | ApiItemKind::Class | ApiItemKind::Interface => true,
            ApiItemKind::Model
            | ApiItemKind::EntryPoint
            | ApiItemKind::Namespace
            | ApiItemKind::Constructor
            | ApiItemKind::Method
            | ApiItemKind::MethodSignature
            | ApiItemKind::Property
            | ApiItemKind::PropertySignature
            | ApiItemKind::Function
            | ApiItemKind::Variable
            | ApiItemKind::TypeAlias
            | ApiItemKind::Enum
            | ApiItemKind::EnumMember => false,
        }
    }

    /// Levels that never show up in breadcrumbs or file names.
    pub fn is_structural(&self) -> bool {
        matches!(self, ApiItemKind::Model | ApiItemKind::EntryPoint)
    }

    /// Kinds whose declaration can carry a `@returns` block.
    pub fn has_return_value(&self) -> bool {
        matches!(
            self,
            ApiItemKind::Function | ApiItemKind::Method | ApiItemKind::MethodSignature
        )
    }
}

impl fmt::Display for ApiItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of an API item.
///
/// Deserialized straight from the `kind` tag of an `.api.json` item, so adding a
/// variant here forces every `match` over item details to handle it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum ItemDetail {
    Model,
    Package,
    EntryPoint,
    Namespace,
    Class {
        #[serde(default)]
        extends_type: Option<Excerpt>,
        #[serde(default)]
        implements_types: Vec<Excerpt>,
        #[serde(default)]
        type_parameters: Vec<TypeParameter>,
    },
    Interface {
        #[serde(default)]
        extends_types: Vec<Excerpt>,
        #[serde(default)]
        type_parameters: Vec<TypeParameter>,
    },
    Constructor {
        #[serde(default)]
        parameters: Vec<Parameter>,
    },
    Method {
        #[serde(default)]
        parameters: Vec<Parameter>,
        #[serde(default)]
        return_type: Excerpt,
        #[serde(default)]
        type_parameters: Vec<TypeParameter>,
    },
    MethodSignature {
        #[serde(default)]
        parameters: Vec<Parameter>,
        #[serde(default)]
        return_type: Excerpt,
        #[serde(default)]
        type_parameters: Vec<TypeParameter>,
    },
    Property {
        #[serde(default)]
        property_type: Excerpt,
    },
    PropertySignature {
        #[serde(default)]
        property_type: Excerpt,
    },
    Function {
        #[serde(default)]
        parameters: Vec<Parameter>,
        #[serde(default)]
        return_type: Excerpt,
        #[serde(default)]
        type_parameters: Vec<TypeParameter>,
    },
    Variable {
        #[serde(default)]
        variable_type: Excerpt,
    },
    TypeAlias {
        #[serde(default)]
        type_excerpt: Excerpt,
        #[serde(default)]
        type_parameters: Vec<TypeParameter>,
    },
    Enum,
    EnumMember {
        #[serde(default)]
        initializer: Option<Excerpt>,
    },
}

impl ItemDetail {
    pub fn kind(&self) -> ApiItemKind {
        match self {
            ItemDetail::Model => ApiItemKind::Model,
            ItemDetail::Package => ApiItemKind::Package,
            ItemDetail::EntryPoint => ApiItemKind::EntryPoint,
            ItemDetail::Namespace => ApiItemKind::Namespace,
            ItemDetail::Class { .. } => ApiItemKind::Class,
            ItemDetail::Interface { .. } => ApiItemKind::Interface,
            ItemDetail::Constructor { .. } => ApiItemKind::Constructor,
            ItemDetail::Method { .. } => ApiItemKind::Method,
            ItemDetail::MethodSignature { .. } => ApiItemKind::MethodSignature,
            ItemDetail::Property { .. } => ApiItemKind::Property,
            ItemDetail::PropertySignature { .. } => ApiItemKind::PropertySignature,
            ItemDetail::Function { .. } => ApiItemKind::Function,
            ItemDetail::Variable { .. } => ApiItemKind::Variable,
            ItemDetail::TypeAlias { .. } => ApiItemKind::TypeAlias,
            ItemDetail::Enum => ApiItemKind::Enum,
            ItemDetail::EnumMember { .. } => ApiItemKind::EnumMember,
        }
    }

    /// The parameter list, for kinds that accept one.
    pub fn parameters(&self) -> Option<&[Parameter]> {
        match self {
            ItemDetail::Constructor { parameters }
            | ItemDetail::Method { parameters, .. }
            | ItemDetail::MethodSignature { parameters, .. }
            | ItemDetail::Function { parameters, .. } => Some(parameters),
            _ => None,
        }
    }

    pub fn type_parameters(&self) -> &[TypeParameter] {
        match self {
            ItemDetail::Class {
                type_parameters, ..
            }
            | ItemDetail::Interface {
                type_parameters, ..
            }
            | ItemDetail::Method {
                type_parameters, ..
            }
            | ItemDetail::MethodSignature {
                type_parameters, ..
            }
            | ItemDetail::Function {
                type_parameters, ..
            }
            | ItemDetail::TypeAlias {
                type_parameters, ..
            } => type_parameters,
            _ => &[],
        }
    }

    /// The declared type of property-like items (properties and variables).
    pub fn value_type(&self) -> Option<&Excerpt> {
        match self {
            ItemDetail::Property { property_type }
            | ItemDetail::PropertySignature { property_type } => Some(property_type),
            ItemDetail::Variable { variable_type } => Some(variable_type),
            _ => None,
        }
    }
}

/// API Extractor release tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ReleaseTag {
    #[default]
    None,
    Internal,
    Alpha,
    Beta,
    Public,
}
