//! Weighted multi-field component search.

use super::related::related_to;
use super::scoring::{
    BoundaryMatcher, MULTI_TERM_BONUS, MatchType, RELATED_SCORE_FACTOR, WORD_BOUNDARY_BONUS,
    TierMatch, compare_ranked, match_keywords, match_term, match_words,
};
use super::tokenize::query_terms;
use crate::catalog::ComponentIndex;
use crate::manifest::Declaration;
use ahash::AHashSet;
use serde::Serialize;
use std::fmt::Write as _;

/// Results returned when no explicit limit is given.
pub const DEFAULT_LIMIT: usize = 10;

/// Keeps related components below the weakest direct match.
const RELATED_CEILING: f64 = 0.99;

/// A named projection of a component used as one unit of text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    TagName,
    Name,
    Summary,
    Description,
    Properties,
    Methods,
    Events,
    Slots,
    CssParts,
    States,
    /// Attribute, CSS custom property and CSS class names. Only consulted for
    /// a term that matched no other field.
    Keywords,
}

impl SearchField {
    pub const ALL: [Self; 11] = [
        Self::TagName,
        Self::Name,
        Self::Summary,
        Self::Description,
        Self::Properties,
        Self::Methods,
        Self::Events,
        Self::Slots,
        Self::CssParts,
        Self::States,
        Self::Keywords,
    ];

    /// Multiplier applied to every tier score earned in this field.
    pub const fn weight(self) -> f64 {
        match self {
            Self::TagName | Self::Name => 10.0,
            Self::Summary | Self::Description => 5.0,
            Self::Properties => 3.0,
            Self::Methods
            | Self::Events
            | Self::Slots
            | Self::CssParts
            | Self::States
            | Self::Keywords => 2.0,
        }
    }

    /// Name shown to users in match explanations.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TagName | Self::Name => "name",
            Self::Summary | Self::Description => "description",
            Self::Properties => "properties",
            Self::Methods => "methods",
            Self::Events => "events",
            Self::Slots => "slots",
            Self::CssParts => "css-parts",
            Self::States => "css-states",
            Self::Keywords => "keywords",
        }
    }

    /// Fields selected by one `searchIn` entry, or `None` for an unknown name.
    pub fn from_selector(selector: &str) -> Option<&'static [Self]> {
        let fields: &'static [Self] = match selector.trim() {
            "all" => &Self::ALL,
            "name" => &[Self::TagName, Self::Name],
            "tagName" | "tag-name" | "tag" => &[Self::TagName],
            "className" | "class-name" => &[Self::Name],
            "description" => &[Self::Summary, Self::Description],
            "summary" => &[Self::Summary],
            "properties" => &[Self::Properties],
            "methods" => &[Self::Methods],
            "events" => &[Self::Events],
            "slots" => &[Self::Slots],
            "css-parts" | "cssParts" => &[Self::CssParts],
            "states" | "css-states" | "cssStates" => &[Self::States],
            "keywords" => &[Self::Keywords],
            _ => return None,
        };
        Some(fields)
    }

    /// Resolve `searchIn` names to fields.
    ///
    /// Unknown names are ignored. An empty result means "search everything".
    pub fn resolve<S: AsRef<str>>(selectors: &[S]) -> Vec<Self> {
        let mut fields = Vec::new();
        for selector in selectors {
            let selector = selector.as_ref();
            let Some(selected) = Self::from_selector(selector) else {
                tracing::debug!(selector, "Ignoring unknown search field");
                continue;
            };
            for field in selected {
                if !fields.contains(field) {
                    fields.push(*field);
                }
            }
        }
        fields
    }

    /// Tier of `term` in this field's text. Name fields are matched word by
    /// word so `button` is an exact hit on `forge-button`; prose and member
    /// lists are matched as a whole.
    fn match_text(self, text: &str, term: &str) -> Option<TierMatch> {
        match self {
            Self::TagName | Self::Name => match_words(text, term),
            _ => match_term(text, term),
        }
    }

    /// Lowercase searchable text of this field for one component.
    fn text(self, component: &Declaration) -> String {
        let text = match self {
            Self::TagName => component.tag().to_string(),
            Self::Name => component.name.clone(),
            Self::Summary => component.summary.clone().unwrap_or_default(),
            Self::Description => component.description.clone().unwrap_or_default(),
            Self::Properties => join_described(
                component
                    .properties()
                    .map(|m| (m.name.as_str(), m.description.as_deref())),
            ),
            Self::Methods => join_described(
                component
                    .methods()
                    .map(|m| (m.name.as_str(), m.description.as_deref())),
            ),
            Self::Events => join_described(
                component
                    .events
                    .iter()
                    .map(|e| (e.name.as_str(), e.description.as_deref())),
            ),
            Self::Slots => join_named(&component.slots),
            Self::CssParts => join_named(&component.css_parts),
            Self::States => join_named(&component.css_states),
            Self::Keywords => keywords(component).join(" "),
        };
        text.to_lowercase()
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn join_described<'a>(items: impl Iterator<Item = (&'a str, Option<&'a str>)>) -> String {
    let mut out = String::new();
    for (name, description) in items {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{name} {}", description.unwrap_or_default());
    }
    out
}

fn join_named(items: &[crate::manifest::NamedItem]) -> String {
    join_described(
        items
            .iter()
            .map(|item| (item.name.as_str(), item.description.as_deref())),
    )
}

/// Auxiliary keyword list of a component.
pub fn keywords(component: &Declaration) -> Vec<&str> {
    component
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .chain(component.css_properties.iter().map(|p| p.name.as_str()))
        .chain(component.css_classes.iter().map(|c| c.name.as_str()))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Search knobs. The default searches every field, OR semantics, no related
/// expansion, [`DEFAULT_LIMIT`] results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Fields to search; empty means all.
    pub fields: Vec<SearchField>,
    /// Maximum results; `None` or zero means [`DEFAULT_LIMIT`].
    pub limit: Option<usize>,
    /// Require every query term to match somewhere.
    pub match_all: bool,
    /// Append companions from the related-components table.
    pub include_related: bool,
}

impl SearchOptions {
    pub fn effective_limit(&self) -> usize {
        self.limit.filter(|&n| n > 0).unwrap_or(DEFAULT_LIMIT)
    }
}

/// One ranked component.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a> {
    pub component: &'a Declaration,
    pub score: f64,
    pub match_type: MatchType,
    /// Fields that contributed, in search order. Empty for related entries.
    pub matched_fields: Vec<SearchField>,
    /// Query terms that matched, in query order.
    pub matched_terms: Vec<String>,
    /// The direct match that pulled this component in, for related entries.
    pub related_to: Option<String>,
}

impl SearchResult<'_> {
    pub fn tag_name(&self) -> &str {
        self.component.tag()
    }

    /// Distinct field labels, e.g. `name, description`.
    pub fn match_reasons(&self) -> Vec<&'static str> {
        if self.match_type == MatchType::RelatedComponent {
            return vec![MatchType::RelatedComponent.as_str()];
        }
        let mut reasons: Vec<&'static str> = Vec::new();
        for field in &self.matched_fields {
            if !reasons.contains(&field.label()) {
                reasons.push(field.label());
            }
        }
        reasons
    }
}

/// Rank components against `query` and keep the top `limit`.
///
/// A query with no terms yields nothing; listing every component is the
/// caller's job.
pub fn search<'a>(
    index: &'a ComponentIndex,
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult<'a>> {
    let mut results = search_all(index, query, options);
    results.truncate(options.effective_limit());
    results
}

/// Like [`search`] but without the limit, so callers can tell whether
/// anything was cut off.
pub fn search_all<'a>(
    index: &'a ComponentIndex,
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult<'a>> {
    let terms = query_terms(query);
    if terms.is_empty() {
        tracing::debug!(query, "Query has no search terms");
        return Vec::new();
    }

    let fields: &[SearchField] = if options.fields.is_empty() {
        &SearchField::ALL
    } else {
        &options.fields
    };
    let matchers: Vec<BoundaryMatcher> = terms.iter().map(|t| BoundaryMatcher::new(t)).collect();

    let mut results: Vec<SearchResult<'a>> = index
        .all()
        .filter_map(|component| {
            score_component(component, &terms, &matchers, fields, options.match_all)
        })
        .collect();
    results.sort_by(compare);

    if options.include_related && !results.is_empty() {
        let related = related_results(index, &results);
        results.extend(related);
        results.sort_by(compare);
    }

    tracing::debug!(
        query,
        terms = terms.len(),
        results = results.len(),
        "Component search finished"
    );
    results
}

fn compare(a: &SearchResult<'_>, b: &SearchResult<'_>) -> std::cmp::Ordering {
    compare_ranked(
        (a.score, a.match_type, a.tag_name()),
        (b.score, b.match_type, b.tag_name()),
    )
}

fn score_component<'a>(
    component: &'a Declaration,
    terms: &[String],
    matchers: &[BoundaryMatcher],
    fields: &[SearchField],
    match_all: bool,
) -> Option<SearchResult<'a>> {
    let texts: Vec<(SearchField, String)> = fields
        .iter()
        .filter(|field| **field != SearchField::Keywords)
        .map(|field| (*field, field.text(component)))
        .collect();
    let keyword_list = fields
        .contains(&SearchField::Keywords)
        .then(|| keywords(component));

    let mut total = 0.0;
    let mut best: Option<MatchType> = None;
    let mut matched_fields: Vec<SearchField> = Vec::new();
    let mut matched_terms: Vec<String> = Vec::new();

    for (term, boundary) in terms.iter().zip(matchers) {
        let mut term_matched = false;

        for (field, text) in &texts {
            let Some(hit) = field.match_text(text, term) else {
                continue;
            };
            let mut contribution = hit.score * field.weight();
            if boundary.is_match(text) {
                contribution *= WORD_BOUNDARY_BONUS;
            }
            total += contribution;
            best = best.max(Some(hit.match_type));
            term_matched = true;
            if !matched_fields.contains(field) {
                matched_fields.push(*field);
            }
        }

        if !term_matched
            && let Some(hit) = keyword_list
                .as_deref()
                .and_then(|list| match_keywords(list, term))
        {
            total += hit.score * SearchField::Keywords.weight();
            best = best.max(Some(hit.match_type));
            term_matched = true;
            if !matched_fields.contains(&SearchField::Keywords) {
                matched_fields.push(SearchField::Keywords);
            }
        }

        if term_matched {
            matched_terms.push(term.clone());
        }
    }

    if match_all && matched_terms.len() < terms.len() {
        return None;
    }
    if matched_terms.len() > 1 {
        total *= 1.0 + MULTI_TERM_BONUS * (matched_terms.len() - 1) as f64;
    }
    let match_type = best?;
    if total <= 0.0 {
        return None;
    }

    Some(SearchResult {
        component,
        score: total,
        match_type,
        matched_fields,
        matched_terms,
        related_to: None,
    })
}

/// Companions of the ranked direct matches, first origin wins.
fn related_results<'a>(
    index: &'a ComponentIndex,
    direct: &[SearchResult<'a>],
) -> Vec<SearchResult<'a>> {
    let weakest = direct
        .iter()
        .map(|r| r.score)
        .fold(f64::INFINITY, f64::min);
    let ceiling = weakest * RELATED_CEILING;

    let mut seen: AHashSet<&str> = direct.iter().map(SearchResult::tag_name).collect();
    let mut related = Vec::new();

    for origin in direct {
        for &tag in related_to(origin.tag_name()) {
            if seen.contains(tag) {
                continue;
            }
            let Some(component) = index.get(tag) else {
                continue;
            };
            seen.insert(tag);
            related.push(SearchResult {
                component,
                score: (origin.score * RELATED_SCORE_FACTOR).min(ceiling),
                match_type: MatchType::RelatedComponent,
                matched_fields: Vec::new(),
                matched_terms: origin.matched_terms.clone(),
                related_to: Some(origin.tag_name().to_string()),
            });
        }
    }

    related
}
