//! Custom Elements Manifest document model.
//!
//! Every field beyond the few the index relies on is optional, so manifests
//! produced by different analyzer versions deserialize without complaint.

use serde::{Deserialize, Deserializer, Serialize};

/// A versioned manifest describing one package's modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// One source file in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default = "default_module_kind")]
    pub kind: String,
    pub path: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<Export>>,
}

fn default_module_kind() -> String {
    "javascript-module".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<Reference>,
}

/// A `{ name, module }` pointer to a declaration elsewhere in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnInfo {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeText>,
}

/// Deprecation marker: either a bare flag or a migration message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deprecation {
    Flag(bool),
    Message(String),
}

impl Deprecation {
    pub fn is_deprecated(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Message(_) => true,
        }
    }

    /// The migration hint, if the manifest author wrote one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Implemented by every manifest entry that can carry a deprecation marker.
pub trait Deprecatable {
    fn deprecation(&self) -> Option<&Deprecation>;

    fn is_deprecated(&self) -> bool {
        self.deprecation().is_some_and(Deprecation::is_deprecated)
    }
}

/// One component (or any other declaration kind) inside a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, deserialize_with = "truthy", skip_serializing_if = "is_false")]
    pub custom_element: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_properties: Vec<CssProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_parts: Vec<NamedItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<NamedItem>,
    #[serde(default, alias = "states", skip_serializing_if = "Vec::is_empty")]
    pub css_states: Vec<NamedItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_classes: Vec<NamedItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<NamedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
}

impl Declaration {
    /// The non-empty tag name of a class declaration flagged as a custom element.
    ///
    /// Anything else (functions, mixins, plain classes, unnamed elements) yields `None`.
    pub fn custom_element_tag(&self) -> Option<&str> {
        if self.kind != "class" || !self.custom_element {
            return None;
        }
        self.tag_name.as_deref().filter(|tag| !tag.is_empty())
    }

    /// Tag name, or an empty string for declarations without one.
    pub fn tag(&self) -> &str {
        self.tag_name.as_deref().unwrap_or_default()
    }

    /// Summary first, falling back to the description.
    pub fn blurb(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .or(self.description.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    pub fn public_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.privacy == Privacy::Public)
    }

    /// Public fields, i.e. the JavaScript property surface.
    pub fn properties(&self) -> impl Iterator<Item = &Member> {
        self.public_members().filter(|m| m.kind == MemberKind::Field)
    }

    pub fn methods(&self) -> impl Iterator<Item = &Member> {
        self.public_members().filter(|m| m.kind == MemberKind::Method)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    #[default]
    Field,
    Method,
    #[serde(other)]
    Other,
}

/// Member visibility. Absent in the manifest means public.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    #[serde(default)]
    pub privacy: Privacy,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(rename = "static", default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "return", default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<Reference>,
}

impl Member {
    pub fn type_text(&self) -> Option<&str> {
        self.ty.as_ref().map(|t| t.text.as_str())
    }

    pub fn return_type(&self) -> Option<&str> {
        self.returns
            .as_ref()
            .and_then(|r| r.ty.as_ref())
            .map(|t| t.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CssProperty {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
}

/// Shape shared by slots, CSS parts, CSS states, CSS classes and dependencies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
}

macro_rules! impl_deprecatable {
    ($($ty:ty),* $(,)?) => {
        $(impl Deprecatable for $ty {
            fn deprecation(&self) -> Option<&Deprecation> {
                self.deprecated.as_ref()
            }
        })*
    };
}

impl_deprecatable!(Declaration, Member, Attribute, Event, CssProperty, NamedItem);

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Interpret a JSON value the way JavaScript would in a boolean context.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
