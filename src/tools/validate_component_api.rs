use super::loaded_catalog;
use crate::catalog::ComponentCatalog;
use crate::format::{Render, ValidationContext};
use crate::validate::{ApiRequest, validate};
use rmcp::schemars;
use serde::Deserialize;

/// Reply when the request names no APIs at all.
pub const NOTHING_TO_VALIDATE: &str =
    "No APIs provided for validation. Component usage is correct.";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ValidateComponentApiRequest {
    /// Component tag name (e.g. "forge-button", "forge-card")
    pub component: String,
    /// Component-specific APIs to validate, grouped by category
    #[serde(default)]
    pub apis: ApiRequest,
}

/// Check requested API names against a component's manifest entry.
pub async fn handle_validate_component_api(
    catalog: &ComponentCatalog,
    request: ValidateComponentApiRequest,
) -> Result<String, String> {
    let loaded = loaded_catalog(catalog).await?;
    let component = loaded
        .index
        .require(request.component.trim())
        .map_err(|e| e.to_string())?;

    if request.apis.is_empty() {
        return Ok(NOTHING_TO_VALIDATE.to_string());
    }

    let report = validate(component, &request.apis);
    Ok(ValidationContext { report: &report }.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::fixtures;
    use assert2::check;

    #[tokio::test]
    async fn empty_request_short_circuits() {
        let catalog = fixtures::catalog();
        let out = handle_validate_component_api(
            &catalog,
            ValidateComponentApiRequest {
                component: "forge-button".into(),
                apis: ApiRequest::default(),
            },
        )
        .await
        .unwrap();
        check!(out == NOTHING_TO_VALIDATE);
    }

    #[tokio::test]
    async fn unknown_component_is_checked_first() {
        let catalog = fixtures::catalog();
        let err = handle_validate_component_api(
            &catalog,
            ValidateComponentApiRequest {
                component: "forge-nope".into(),
                apis: ApiRequest::default(),
            },
        )
        .await
        .unwrap_err();
        check!(err.starts_with("Component not found: forge-nope"));
    }

    #[tokio::test]
    async fn renders_report() {
        let catalog = fixtures::catalog();
        let out = handle_validate_component_api(
            &catalog,
            ValidateComponentApiRequest {
                component: "forge-button".into(),
                apis: ApiRequest {
                    properties: vec!["disabled".into(), "raised".into(), "missing".into()],
                    ..ApiRequest::default()
                },
            },
        )
        .await
        .unwrap();
        check!(out.contains("1 valid, 1 deprecated, 1 invalid"));
        check!(out.contains("- `raised` (property): Use variant instead."));
    }
}
