//! Markdown rendering of catalog data.
//!
//! Each document kind has its own context type; renderers write into a
//! `String` and never look anything up on their own.

mod builders;
mod renderers;

pub use builders::{component_link, escape_cell, method_signature};

use crate::icons::IconMatch;
use crate::manifest::Declaration;
use crate::search::SearchResult;
use crate::validate::ValidationReport;
use std::fmt;

/// Render a context to markdown.
pub trait Render {
    fn write_to(&self, out: &mut String) -> fmt::Result;

    fn render(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_to(&mut out);
        out
    }
}

/// Components table with links to each component's documentation.
#[derive(Debug, Clone)]
pub struct ComponentListContext<'a> {
    pub components: Vec<&'a Declaration>,
    /// Show only the first `limit` rows.
    pub limit: Option<usize>,
}

/// Sorted tag names, one per line.
#[derive(Debug, Clone)]
pub struct ComponentNamesContext {
    pub names: Vec<String>,
}

/// One API section of a component reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocSection {
    Attributes,
    Properties,
    Methods,
    Events,
    Slots,
    CssCustomProperties,
    CssParts,
    CssClasses,
    States,
    Dependencies,
}

impl DocSection {
    /// Order sections appear in a full reference.
    pub const ALL: [Self; 10] = [
        Self::Attributes,
        Self::Properties,
        Self::Methods,
        Self::Events,
        Self::Slots,
        Self::CssCustomProperties,
        Self::CssParts,
        Self::CssClasses,
        Self::States,
        Self::Dependencies,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Some(match name.trim() {
            "attributes" => Self::Attributes,
            "properties" => Self::Properties,
            "methods" => Self::Methods,
            "events" => Self::Events,
            "slots" => Self::Slots,
            "css-custom-properties" | "css-properties" | "cssProperties" => {
                Self::CssCustomProperties
            }
            "css-parts" | "cssParts" => Self::CssParts,
            "css-classes" | "cssClasses" => Self::CssClasses,
            "states" | "css-states" | "cssStates" => Self::States,
            "dependencies" => Self::Dependencies,
            _ => return None,
        })
    }

    /// Name accepted by [`parse`](Self::parse).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Properties => "properties",
            Self::Methods => "methods",
            Self::Events => "events",
            Self::Slots => "slots",
            Self::CssCustomProperties => "css-custom-properties",
            Self::CssParts => "css-parts",
            Self::CssClasses => "css-classes",
            Self::States => "states",
            Self::Dependencies => "dependencies",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Attributes => "Attributes",
            Self::Properties => "Properties",
            Self::Methods => "Methods",
            Self::Events => "Events",
            Self::Slots => "Slots",
            Self::CssCustomProperties => "CSS Custom Properties",
            Self::CssParts => "CSS Parts",
            Self::CssClasses => "CSS Classes",
            Self::States => "States",
            Self::Dependencies => "Dependencies",
        }
    }
}

/// Which rendition of a component's documentation to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocView {
    /// Every non-empty section.
    Full,
    /// Short overview with API counts.
    Summary,
    /// Only the named sections, in the order given.
    Sections(Vec<DocSection>),
}

#[derive(Debug, Clone)]
pub struct ComponentDocContext<'a> {
    pub component: &'a Declaration,
    pub view: DocView,
    /// Requested section names that were not recognized.
    pub unknown_sections: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SearchResultsContext<'a> {
    pub query: &'a str,
    pub terms: Vec<String>,
    pub results: &'a [SearchResult<'a>],
    /// More matches exist beyond `results`.
    pub has_more: bool,
}

#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    pub report: &'a ValidationReport,
}

#[derive(Debug, Clone)]
pub struct IconResultsContext<'a> {
    pub query: &'a str,
    pub icons: &'a [IconMatch],
}
