//! Markdown rendering for each context type.

use super::builders::{code_or_blank, component_link, escape_cell, write_table};
use super::{
    ComponentDocContext, ComponentListContext, ComponentNamesContext, DocSection, DocView,
    IconResultsContext, Render, SearchResultsContext, ValidationContext,
};
use crate::manifest::{Declaration, Deprecatable, Deprecation, NamedItem};
use crate::search::MatchType;
use crate::validate::{ApiCheck, ApiKind};
use std::fmt::{self, Write as _};

const NO_DESCRIPTION: &str = "No description available";

/// How many properties the summary view names.
const KEY_PROPERTY_COUNT: usize = 5;

impl Render for ComponentListContext<'_> {
    fn write_to(&self, output: &mut String) -> fmt::Result {
        if self.components.is_empty() {
            return writeln!(output, "No components available.");
        }
        let shown = self.limit.unwrap_or(usize::MAX).min(self.components.len());
        let components = &self.components[..shown];

        writeln!(output, "# Forge Components\n")?;
        write_table(
            output,
            &["Component", "Summary"],
            components.iter().map(|c| {
                vec![
                    c.tag().to_string(),
                    c.blurb().unwrap_or(NO_DESCRIPTION).to_string(),
                ]
            }),
        )?;
        if shown < self.components.len() {
            writeln!(
                output,
                "\nShowing {} of {} components.",
                shown,
                self.components.len()
            )?;
        }
        write_links(output, components.iter().map(|c| c.tag()))
    }
}

fn write_links<'a>(output: &mut String, tags: impl Iterator<Item = &'a str>) -> fmt::Result {
    writeln!(output, "\n## Individual Documentation\n")?;
    writeln!(output, "For detailed documentation of each component:")?;
    for tag in tags {
        writeln!(output, "- [{}]({})", tag, component_link(tag))?;
    }
    Ok(())
}

impl Render for ComponentNamesContext {
    fn write_to(&self, output: &mut String) -> fmt::Result {
        if self.names.is_empty() {
            return writeln!(output, "No components available.");
        }
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        for name in names {
            writeln!(output, "{name}")?;
        }
        Ok(())
    }
}

impl Render for ComponentDocContext<'_> {
    fn write_to(&self, output: &mut String) -> fmt::Result {
        match &self.view {
            DocView::Full => render_full(output, self.component),
            DocView::Summary => render_summary(output, self.component),
            DocView::Sections(sections) => {
                render_sections(output, self.component, sections, &self.unknown_sections)
            }
        }
    }
}

fn render_full(output: &mut String, component: &Declaration) -> fmt::Result {
    write_heading(output, component)?;
    for section in DocSection::ALL {
        if section_len(component, section) > 0 {
            writeln!(output, "\n## {}\n", section.title())?;
            write_section_body(output, component, section)?;
        }
    }
    Ok(())
}

fn write_heading(output: &mut String, component: &Declaration) -> fmt::Result {
    writeln!(output, "# {}\n", component.name)?;
    writeln!(output, "`<{}>`", component.tag())?;
    if let Some(deprecation) = component.deprecation()
        && deprecation.is_deprecated()
    {
        writeln!(output, "\n{}", deprecation_note(deprecation))?;
    }
    if let Some(summary) = non_blank(component.summary.as_deref()) {
        writeln!(output, "\n{summary}")?;
    }
    if let Some(description) = non_blank(component.description.as_deref())
        && Some(description) != non_blank(component.summary.as_deref())
    {
        writeln!(output, "\n{description}")?;
    }
    Ok(())
}

fn render_summary(output: &mut String, component: &Declaration) -> fmt::Result {
    write_heading(output, component)?;

    writeln!(output, "\n## API Overview\n")?;
    write_table(
        output,
        &["API", "Count"],
        DocSection::ALL
            .into_iter()
            .map(|section| (section, section_len(component, section)))
            .filter(|(_, count)| *count > 0)
            .map(|(section, count)| vec![section.title().to_string(), count.to_string()]),
    )?;

    let key_properties: Vec<String> = component
        .properties()
        .take(KEY_PROPERTY_COUNT)
        .map(|p| format!("`{}`", p.name))
        .collect();
    if !key_properties.is_empty() {
        writeln!(output, "\n**Key properties:** {}", key_properties.join(", "))?;
    }
    writeln!(
        output,
        "\n*Use `get_component_docs` with `format: \"full\"` for the complete reference.*"
    )
}

fn render_sections(
    output: &mut String,
    component: &Declaration,
    sections: &[DocSection],
    unknown: &[String],
) -> fmt::Result {
    writeln!(output, "# API REFERENCE: {}\n", component.name)?;
    writeln!(
        output,
        "**Tyler Forge Component** | **Tag:** `<{}>` | **Type:** Web Component",
        component.tag()
    )?;
    if let Some(summary) = non_blank(component.summary.as_deref()) {
        writeln!(output, "\n**PURPOSE:** {summary}")?;
    }
    if let Some(description) = non_blank(component.description.as_deref()) {
        writeln!(output, "\n**DESCRIPTION:** {description}")?;
    }

    for &section in sections {
        writeln!(output, "\n## {}\n", section.title())?;
        if section_len(component, section) == 0 {
            writeln!(output, "No {} documented.", section.title().to_lowercase())?;
        } else {
            write_section_body(output, component, section)?;
        }
    }

    if !unknown.is_empty() {
        let valid: Vec<&str> = DocSection::ALL.iter().map(|s| s.key()).collect();
        writeln!(
            output,
            "\n*Unknown sections ignored: {}. Valid sections: {}.*",
            unknown.join(", "),
            valid.join(", ")
        )?;
    }
    Ok(())
}

fn section_len(component: &Declaration, section: DocSection) -> usize {
    match section {
        DocSection::Attributes => component.attributes.len(),
        DocSection::Properties => component.properties().count(),
        DocSection::Methods => component.methods().count(),
        DocSection::Events => component.events.len(),
        DocSection::Slots => component.slots.len(),
        DocSection::CssCustomProperties => component.css_properties.len(),
        DocSection::CssParts => component.css_parts.len(),
        DocSection::CssClasses => component.css_classes.len(),
        DocSection::States => component.css_states.len(),
        DocSection::Dependencies => component.dependencies.len(),
    }
}

fn write_section_body(
    output: &mut String,
    component: &Declaration,
    section: DocSection,
) -> fmt::Result {
    match section {
        DocSection::Attributes => write_table(
            output,
            &["Name", "Type", "Default", "Description"],
            component.attributes.iter().map(|a| {
                vec![
                    format!("`{}`", a.name),
                    code_or_blank(a.ty.as_ref().map(|t| t.text.as_str())),
                    code_or_blank(a.default.as_deref()),
                    describe(a.description.as_deref(), a),
                ]
            }),
        ),
        DocSection::Properties => write_table(
            output,
            &["Name", "Type", "Default", "Attribute", "Description"],
            component.properties().map(|p| {
                let mut name = format!("`{}`", p.name);
                if p.readonly {
                    name.push_str(" (readonly)");
                }
                vec![
                    name,
                    code_or_blank(p.type_text()),
                    code_or_blank(p.default.as_deref()),
                    code_or_blank(p.attribute.as_deref()),
                    describe(p.description.as_deref(), p),
                ]
            }),
        ),
        DocSection::Methods => write_table(
            output,
            &["Signature", "Description"],
            component.methods().map(|m| {
                vec![
                    format!("`{}`", super::method_signature(m)),
                    describe(m.description.as_deref(), m),
                ]
            }),
        ),
        DocSection::Events => write_table(
            output,
            &["Name", "Type", "Description"],
            component.events.iter().map(|e| {
                vec![
                    format!("`{}`", e.name),
                    code_or_blank(e.ty.as_ref().map(|t| t.text.as_str())),
                    describe(e.description.as_deref(), e),
                ]
            }),
        ),
        DocSection::Slots => write_named(output, &component.slots, "default"),
        DocSection::CssCustomProperties => write_table(
            output,
            &["Name", "Default", "Description"],
            component.css_properties.iter().map(|p| {
                vec![
                    format!("`{}`", p.name),
                    code_or_blank(p.default.as_deref()),
                    describe(p.description.as_deref(), p),
                ]
            }),
        ),
        DocSection::CssParts => write_named(output, &component.css_parts, ""),
        DocSection::CssClasses => write_named(output, &component.css_classes, ""),
        DocSection::States => write_named(output, &component.css_states, ""),
        DocSection::Dependencies => {
            for dependency in &component.dependencies {
                writeln!(
                    output,
                    "- [{}]({})",
                    dependency.name,
                    component_link(&dependency.name)
                )?;
            }
            Ok(())
        }
    }
}

fn write_named(output: &mut String, items: &[NamedItem], unnamed: &str) -> fmt::Result {
    write_table(
        output,
        &["Name", "Description"],
        items.iter().map(|item| {
            let name = if item.name.is_empty() {
                unnamed
            } else {
                item.name.as_str()
            };
            vec![
                code_or_blank(Some(name)),
                describe(item.description.as_deref(), item),
            ]
        }),
    )
}

/// Description cell text, with a deprecation note appended when present.
fn describe<T: Deprecatable>(description: Option<&str>, item: &T) -> String {
    let description = description.unwrap_or_default().trim();
    match item.deprecation().filter(|d| d.is_deprecated()) {
        Some(deprecation) if description.is_empty() => deprecation_note(deprecation),
        Some(deprecation) => format!("{description} {}", deprecation_note(deprecation)),
        None => description.to_string(),
    }
}

fn deprecation_note(deprecation: &Deprecation) -> String {
    match deprecation.message() {
        Some(message) => format!("**Deprecated**: {message}"),
        None => "**Deprecated**".to_string(),
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Rounded to one decimal place; whole numbers print without a fraction.
fn display_score(score: f64) -> String {
    format!("{}", (score * 10.0).round() / 10.0)
}

impl Render for SearchResultsContext<'_> {
    fn write_to(&self, output: &mut String) -> fmt::Result {
        writeln!(output, "# Search Results for \"{}\"\n", self.query)?;
        if self.terms.len() > 1 {
            writeln!(output, "**Search terms:** {}\n", self.terms.join(", "))?;
        }
        writeln!(
            output,
            "Found {} matching component{}{}:\n",
            self.results.len(),
            if self.results.len() == 1 { "" } else { "s" },
            if self.has_more {
                " (showing top results)"
            } else {
                ""
            }
        )?;

        write_table(
            output,
            &["Component", "Summary", "Matches", "Match", "Score"],
            self.results.iter().map(|result| {
                let matches = match &result.related_to {
                    Some(origin) if result.match_type == MatchType::RelatedComponent => {
                        format!("{} (via {})", MatchType::RelatedComponent, origin)
                    }
                    _ => result.match_reasons().join(", "),
                };
                vec![
                    result.tag_name().to_string(),
                    result.component.blurb().unwrap_or(NO_DESCRIPTION).to_string(),
                    matches,
                    result.match_type.to_string(),
                    display_score(result.score),
                ]
            }),
        )?;

        write_links(output, self.results.iter().map(|r| r.tag_name()))?;

        if self.has_more {
            writeln!(
                output,
                "\n*Tip: Use the `limit` parameter to see more results, or refine your search terms for more specific matches.*"
            )?;
        }
        Ok(())
    }
}

impl Render for ValidationContext<'_> {
    fn write_to(&self, output: &mut String) -> fmt::Result {
        let report = self.report;
        writeln!(output, "# API Validation: {}\n", report.tag_name)?;
        writeln!(
            output,
            "Validated {} API{}: {} valid, {} deprecated, {} invalid.",
            report.total_validated,
            if report.total_validated == 1 { "" } else { "s" },
            report.valid_apis.len(),
            report.deprecated_apis.len(),
            report.invalid_apis.len()
        )?;

        if report.is_clean() {
            writeln!(output, "\nAll requested APIs are valid.")?;
        }

        if !report.valid_apis.is_empty() {
            writeln!(output, "\n## Valid APIs\n")?;
            write_checks(output, &report.valid_apis)?;
        }

        if !report.deprecated_apis.is_empty() {
            writeln!(output, "\n## Deprecated APIs\n")?;
            for check in &report.deprecated_apis {
                write!(output, "- `{}` ({})", check.name, check.api_type)?;
                if let Some(message) = &check.deprecation_message {
                    write!(output, ": {message}")?;
                }
                writeln!(output)?;
            }
        }

        if !report.invalid_apis.is_empty() {
            writeln!(output, "\n## Invalid APIs\n")?;
            write_checks(output, &report.invalid_apis)?;
        }

        let requested: Vec<ApiKind> = ApiKind::ALL
            .into_iter()
            .filter(|&kind| {
                report
                    .valid_apis
                    .iter()
                    .chain(&report.deprecated_apis)
                    .chain(&report.invalid_apis)
                    .any(|check| check.api_type == kind)
            })
            .collect();
        if requested.is_empty() {
            return Ok(());
        }

        writeln!(output, "\n## Available APIs")?;
        for kind in requested {
            writeln!(output, "\n### {}\n", kind.plural())?;
            let available = report.available_apis.get(kind);
            if available.is_empty() {
                writeln!(output, "None documented.")?;
                continue;
            }
            for item in available {
                match non_blank(item.description.as_deref()) {
                    Some(description) => writeln!(
                        output,
                        "- `{}`: {}",
                        item.name,
                        escape_cell(description)
                    )?,
                    None => writeln!(output, "- `{}`", item.name)?,
                }
            }
        }
        Ok(())
    }
}

fn write_checks(output: &mut String, checks: &[ApiCheck]) -> fmt::Result {
    for check in checks {
        writeln!(output, "- `{}` ({})", check.name, check.api_type)?;
    }
    Ok(())
}

impl Render for IconResultsContext<'_> {
    fn write_to(&self, output: &mut String) -> fmt::Result {
        writeln!(output, "# Icon Search Results for \"{}\"\n", self.query)?;
        writeln!(
            output,
            "Found {} icon{}:\n",
            self.icons.len(),
            if self.icons.len() == 1 { "" } else { "s" }
        )?;
        write_table(
            output,
            &["Icon", "Import", "Match", "Score", "Keywords"],
            self.icons.iter().map(|icon| {
                vec![
                    format!("`{}`", icon.name),
                    format!("`{}`", icon.esm_import_name),
                    icon.match_type.to_string(),
                    display_score(icon.score),
                    icon.keywords.join(", "),
                ]
            }),
        )?;

        if let Some(first) = self.icons.first() {
            writeln!(output, "\n## Usage\n")?;
            writeln!(output, "```ts")?;
            writeln!(
                output,
                "import {{ {} }} from '@tylertech/tyler-icons';",
                first.esm_import_name
            )?;
            writeln!(output, "IconRegistry.define({});", first.esm_import_name)?;
            writeln!(output, "```\n")?;
            writeln!(output, "```html")?;
            writeln!(output, "<forge-icon name=\"{}\"></forge-icon>", first.name)?;
            writeln!(output, "```")?;
        }
        Ok(())
    }
}
