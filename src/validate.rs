//! Checking API names used in generated code against a component's manifest.

use crate::manifest::{Declaration, Deprecatable, Deprecation};
use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// Category of a component API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiKind {
    Property,
    Attribute,
    Event,
    Method,
    Slot,
    CssProperty,
    CssPart,
    CssClass,
}

impl ApiKind {
    pub const ALL: [Self; 8] = [
        Self::Property,
        Self::Attribute,
        Self::Event,
        Self::Method,
        Self::Slot,
        Self::CssProperty,
        Self::CssPart,
        Self::CssClass,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Attribute => "attribute",
            Self::Event => "event",
            Self::Method => "method",
            Self::Slot => "slot",
            Self::CssProperty => "cssProperty",
            Self::CssPart => "cssPart",
            Self::CssClass => "cssClass",
        }
    }

    /// Plural heading used when listing available APIs.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Property => "Properties",
            Self::Attribute => "Attributes",
            Self::Event => "Events",
            Self::Method => "Methods",
            Self::Slot => "Slots",
            Self::CssProperty => "CSS Custom Properties",
            Self::CssPart => "CSS Parts",
            Self::CssClass => "CSS Classes",
        }
    }
}

impl std::fmt::Display for ApiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API names to check, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRequest {
    /// Property names (e.g. ["disabled", "value"])
    pub properties: Vec<String>,
    /// Attribute names (e.g. ["disabled", "variant"])
    pub attributes: Vec<String>,
    /// Event names (e.g. ["forge-button-click"])
    pub events: Vec<String>,
    /// Method names (e.g. ["focus"])
    pub methods: Vec<String>,
    /// Slot names (e.g. ["start", "end"])
    pub slots: Vec<String>,
    /// CSS custom property names (e.g. ["--forge-button-primary-color"])
    pub css_properties: Vec<String>,
    /// CSS part names (e.g. ["root", "label"])
    pub css_parts: Vec<String>,
    /// CSS class names (e.g. ["forge-button--raised"])
    pub css_classes: Vec<String>,
}

impl ApiRequest {
    pub fn names(&self, kind: ApiKind) -> &[String] {
        match kind {
            ApiKind::Property => &self.properties,
            ApiKind::Attribute => &self.attributes,
            ApiKind::Event => &self.events,
            ApiKind::Method => &self.methods,
            ApiKind::Slot => &self.slots,
            ApiKind::CssProperty => &self.css_properties,
            ApiKind::CssPart => &self.css_parts,
            ApiKind::CssClass => &self.css_classes,
        }
    }

    pub fn is_requested(&self, kind: ApiKind) -> bool {
        !self.names(kind).is_empty()
    }

    /// Number of names across every category.
    pub fn total(&self) -> usize {
        ApiKind::ALL.iter().map(|&kind| self.names(kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Outcome for one requested name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCheck {
    pub name: String,
    pub api_type: ApiKind,
    pub is_valid: bool,
    pub is_deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
}

/// Name and description of an API the component does offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Available APIs, filled in only for the categories that were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableApis {
    pub properties: Vec<ApiItem>,
    pub attributes: Vec<ApiItem>,
    pub events: Vec<ApiItem>,
    pub methods: Vec<ApiItem>,
    pub slots: Vec<ApiItem>,
    pub css_properties: Vec<ApiItem>,
    pub css_parts: Vec<ApiItem>,
    pub css_classes: Vec<ApiItem>,
}

impl AvailableApis {
    pub fn get(&self, kind: ApiKind) -> &[ApiItem] {
        match kind {
            ApiKind::Property => &self.properties,
            ApiKind::Attribute => &self.attributes,
            ApiKind::Event => &self.events,
            ApiKind::Method => &self.methods,
            ApiKind::Slot => &self.slots,
            ApiKind::CssProperty => &self.css_properties,
            ApiKind::CssPart => &self.css_parts,
            ApiKind::CssClass => &self.css_classes,
        }
    }

    fn slot_mut(&mut self, kind: ApiKind) -> &mut Vec<ApiItem> {
        match kind {
            ApiKind::Property => &mut self.properties,
            ApiKind::Attribute => &mut self.attributes,
            ApiKind::Event => &mut self.events,
            ApiKind::Method => &mut self.methods,
            ApiKind::Slot => &mut self.slots,
            ApiKind::CssProperty => &mut self.css_properties,
            ApiKind::CssPart => &mut self.css_parts,
            ApiKind::CssClass => &mut self.css_classes,
        }
    }
}

/// Validation of one component's requested API names.
///
/// Every requested name lands in exactly one of `valid_apis`,
/// `deprecated_apis` or `invalid_apis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub component: String,
    pub tag_name: String,
    pub valid_apis: Vec<ApiCheck>,
    pub invalid_apis: Vec<ApiCheck>,
    pub deprecated_apis: Vec<ApiCheck>,
    pub total_validated: usize,
    pub available_apis: AvailableApis,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.invalid_apis.is_empty() && self.deprecated_apis.is_empty()
    }
}

/// One entry of a component's API surface, as the validator sees it.
struct Surface<'a> {
    name: &'a str,
    description: Option<&'a str>,
    deprecation: Option<&'a Deprecation>,
}

impl<'a> Surface<'a> {
    fn of<T: Deprecatable>(name: &'a str, description: Option<&'a str>, item: &'a T) -> Self {
        Self {
            name,
            description,
            deprecation: item.deprecation(),
        }
    }
}

fn surface(component: &Declaration, kind: ApiKind) -> Vec<Surface<'_>> {
    match kind {
        ApiKind::Property => component
            .properties()
            .map(|m| Surface::of(&m.name, m.description.as_deref(), m))
            .collect(),
        ApiKind::Method => component
            .methods()
            .map(|m| Surface::of(&m.name, m.description.as_deref(), m))
            .collect(),
        ApiKind::Attribute => component
            .attributes
            .iter()
            .map(|a| Surface::of(&a.name, a.description.as_deref(), a))
            .collect(),
        ApiKind::Event => component
            .events
            .iter()
            .map(|e| Surface::of(&e.name, e.description.as_deref(), e))
            .collect(),
        ApiKind::CssProperty => component
            .css_properties
            .iter()
            .map(|p| Surface::of(&p.name, p.description.as_deref(), p))
            .collect(),
        ApiKind::Slot => named(&component.slots),
        ApiKind::CssPart => named(&component.css_parts),
        ApiKind::CssClass => named(&component.css_classes),
    }
}

fn named(items: &[crate::manifest::NamedItem]) -> Vec<Surface<'_>> {
    items
        .iter()
        .map(|item| Surface::of(&item.name, item.description.as_deref(), item))
        .collect()
}

/// Validate requested API names against a component.
///
/// Names compare exactly (case-sensitive). Only public members count as
/// properties and methods. Available APIs are listed only for requested
/// categories.
pub fn validate(component: &Declaration, request: &ApiRequest) -> ValidationReport {
    let mut valid_apis = Vec::new();
    let mut invalid_apis = Vec::new();
    let mut deprecated_apis = Vec::new();
    let mut available_apis = AvailableApis::default();

    for kind in ApiKind::ALL {
        let names = request.names(kind);
        if names.is_empty() {
            continue;
        }
        let surface = surface(component, kind);

        for name in names {
            let check = match surface.iter().find(|entry| entry.name == name.as_str()) {
                Some(entry) => {
                    let deprecated = entry.deprecation.is_some_and(Deprecation::is_deprecated);
                    ApiCheck {
                        name: name.clone(),
                        api_type: kind,
                        is_valid: true,
                        is_deprecated: deprecated,
                        deprecation_message: entry
                            .deprecation
                            .and_then(Deprecation::message)
                            .filter(|_| deprecated)
                            .map(str::to_string),
                    }
                }
                None => ApiCheck {
                    name: name.clone(),
                    api_type: kind,
                    is_valid: false,
                    is_deprecated: false,
                    deprecation_message: None,
                },
            };

            match (check.is_valid, check.is_deprecated) {
                (false, _) => invalid_apis.push(check),
                (true, true) => deprecated_apis.push(check),
                (true, false) => valid_apis.push(check),
            }
        }

        *available_apis.slot_mut(kind) = surface
            .into_iter()
            .map(|entry| ApiItem {
                name: entry.name.to_string(),
                description: entry.description.map(str::to_string),
            })
            .collect();
    }

    let total_validated = valid_apis.len() + invalid_apis.len() + deprecated_apis.len();
    tracing::debug!(
        tag_name = component.tag(),
        total_validated,
        invalid = invalid_apis.len(),
        deprecated = deprecated_apis.len(),
        "Validated component APIs"
    );

    ValidationReport {
        component: component.name.clone(),
        tag_name: component.tag().to_string(),
        valid_apis,
        invalid_apis,
        deprecated_apis,
        total_validated,
        available_apis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Attribute, Event, Member, MemberKind, NamedItem, Privacy};
    use assert2::check;
    use rstest::{fixture, rstest};

    #[fixture]
    fn button() -> Declaration {
        Declaration {
            kind: "class".into(),
            name: "ButtonComponent".into(),
            tag_name: Some("forge-button".into()),
            custom_element: true,
            members: vec![
                Member {
                    kind: MemberKind::Field,
                    name: "disabled".into(),
                    description: Some("Disables the button.".into()),
                    ..Member::default()
                },
                Member {
                    kind: MemberKind::Field,
                    name: "raised".into(),
                    deprecated: Some(Deprecation::Message("Use variant instead.".into())),
                    ..Member::default()
                },
                Member {
                    kind: MemberKind::Field,
                    name: "internalState".into(),
                    privacy: Privacy::Private,
                    ..Member::default()
                },
                Member {
                    kind: MemberKind::Method,
                    name: "focus".into(),
                    ..Member::default()
                },
            ],
            attributes: vec![Attribute {
                name: "dense".into(),
                deprecated: Some(Deprecation::Flag(true)),
                ..Attribute::default()
            }],
            events: vec![Event {
                name: "forge-button-click".into(),
                ..Event::default()
            }],
            slots: vec![NamedItem {
                name: "start".into(),
                ..NamedItem::default()
            }],
            ..Declaration::default()
        }
    }

    fn names(checks: &[ApiCheck]) -> Vec<&str> {
        checks.iter().map(|c| c.name.as_str()).collect()
    }

    #[rstest]
    fn properties_split_into_buckets(button: Declaration) {
        let request = ApiRequest {
            properties: vec!["disabled".into(), "raised".into(), "missing".into()],
            ..ApiRequest::default()
        };
        let report = validate(&button, &request);

        check!(report.tag_name == "forge-button");
        check!(report.component == "ButtonComponent");
        check!(names(&report.valid_apis) == ["disabled"]);
        check!(names(&report.deprecated_apis) == ["raised"]);
        check!(names(&report.invalid_apis) == ["missing"]);
        check!(report.total_validated == 3);
        check!(report.deprecated_apis[0].deprecation_message.as_deref() == Some("Use variant instead."));

        let available: Vec<_> = report
            .available_apis
            .properties
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        check!(available == ["disabled", "raised"]);
        check!(report.available_apis.attributes.is_empty());
        check!(report.available_apis.events.is_empty());
    }

    #[rstest]
    fn private_members_are_invalid(button: Declaration) {
        let request = ApiRequest {
            properties: vec!["internalState".into()],
            ..ApiRequest::default()
        };
        check!(names(&validate(&button, &request).invalid_apis) == ["internalState"]);
    }

    #[rstest]
    fn deprecation_applies_to_every_kind(button: Declaration) {
        let request = ApiRequest {
            attributes: vec!["dense".into()],
            ..ApiRequest::default()
        };
        let report = validate(&button, &request);
        check!(names(&report.deprecated_apis) == ["dense"]);
        check!(report.deprecated_apis[0].api_type == ApiKind::Attribute);
        check!(report.deprecated_apis[0].deprecation_message.is_none());
    }

    #[rstest]
    fn names_are_case_sensitive(button: Declaration) {
        let request = ApiRequest {
            methods: vec!["focus".into(), "Focus".into()],
            ..ApiRequest::default()
        };
        let report = validate(&button, &request);
        check!(names(&report.valid_apis) == ["focus"]);
        check!(names(&report.invalid_apis) == ["Focus"]);
    }

    #[rstest]
    fn mixed_request_partitions_every_name(button: Declaration) {
        let request = ApiRequest {
            properties: vec!["disabled".into()],
            events: vec!["forge-button-click".into(), "click".into()],
            slots: vec!["start".into(), "end".into()],
            css_parts: vec!["root".into()],
            ..ApiRequest::default()
        };
        let report = validate(&button, &request);
        check!(report.total_validated == request.total());
        check!(
            report.valid_apis.len() + report.invalid_apis.len() + report.deprecated_apis.len()
                == request.total()
        );
        check!(report.available_apis.css_parts.is_empty());
        check!(report.available_apis.slots.len() == 1);
        check!(!report.is_clean());
    }

    #[test]
    fn request_deserializes_camel_case_with_defaults() {
        let request: ApiRequest = serde_json::from_value(serde_json::json!({
            "cssProperties": ["--forge-button-color"],
        }))
        .unwrap();
        check!(request.css_properties == ["--forge-button-color"]);
        check!(request.total() == 1);
        check!(!request.is_requested(ApiKind::Property));
        check!(ApiRequest::default().is_empty());
    }
}
