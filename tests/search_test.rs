mod common;

use assert2::check;
use forge_docs_mcp::catalog::ComponentIndex;
use forge_docs_mcp::search::{MatchType, SearchField, SearchOptions, search, search_all};
use forge_docs_mcp::validate::{ApiRequest, validate};
use rstest::{fixture, rstest};

#[fixture]
fn index() -> ComponentIndex {
    ComponentIndex::from_manifests(vec![common::library_manifest()]).unwrap()
}

fn tags<'a>(results: &'a [forge_docs_mcp::search::SearchResult<'a>]) -> Vec<&'a str> {
    results.iter().map(|r| r.tag_name()).collect()
}

#[rstest]
fn button_query_finds_forge_button_first(index: ComponentIndex) {
    let results = search(&index, "button", &SearchOptions::default());
    check!(!results.is_empty());
    check!(results[0].tag_name() == "forge-button");
    check!(results[0].match_type == MatchType::Exact);
}

#[rstest]
fn exact_tag_outranks_longer_tags(index: ComponentIndex) {
    let results = search(&index, "forge-button", &SearchOptions::default());
    let button = results.iter().position(|r| r.tag_name() == "forge-button");
    let group = results
        .iter()
        .position(|r| r.tag_name() == "forge-button-toggle-group");
    check!(button == Some(0));
    check!(group.is_some_and(|group| group > 0));
    check!(results[0].match_type == MatchType::Exact);
}

#[rstest]
fn match_all_requires_every_term(index: ComponentIndex) {
    let any = search(
        &index,
        "toggle card",
        &SearchOptions::default(),
    );
    check!(tags(&any).contains(&"forge-card"));
    check!(tags(&any).contains(&"forge-button-toggle-group"));

    let all = search(
        &index,
        "groups toggle",
        &SearchOptions {
            match_all: true,
            ..SearchOptions::default()
        },
    );
    check!(tags(&all) == ["forge-button-toggle-group"]);
    check!(all[0].matched_terms.len() == 2);
}

#[rstest]
fn ordering_is_deterministic(index: ComponentIndex) {
    let options = SearchOptions {
        limit: Some(50),
        ..SearchOptions::default()
    };
    let first: Vec<(String, f64)> = search(&index, "group", &options)
        .iter()
        .map(|r| (r.tag_name().to_string(), r.score))
        .collect();
    for _ in 0..5 {
        let again: Vec<(String, f64)> = search(&index, "group", &options)
            .iter()
            .map(|r| (r.tag_name().to_string(), r.score))
            .collect();
        check!(again == first);
    }
}

#[rstest]
fn related_entries_rank_below_direct_matches(index: ComponentIndex) {
    let options = SearchOptions {
        include_related: true,
        ..SearchOptions::default()
    };
    let results = search_all(&index, "modal", &options);

    let (direct, related): (Vec<_>, Vec<_>) = results
        .iter()
        .partition(|r| r.match_type != MatchType::RelatedComponent);
    check!(tags_of(&direct) == ["forge-dialog"]);
    check!(related.iter().any(|r| r.tag_name() == "forge-button"));

    let weakest = direct.iter().map(|r| r.score).fold(f64::INFINITY, f64::min);
    for entry in &related {
        check!(entry.score < weakest);
        check!(entry.related_to.as_deref() == Some("forge-dialog"));
    }
}

fn tags_of<'a>(results: &[&'a forge_docs_mcp::search::SearchResult<'a>]) -> Vec<&'a str> {
    results.iter().map(|r| r.tag_name()).collect()
}

#[rstest]
fn search_in_limits_fields(index: ComponentIndex) {
    let results = search(
        &index,
        "focus",
        &SearchOptions {
            fields: SearchField::resolve(&["methods"]),
            ..SearchOptions::default()
        },
    );
    check!(tags(&results) == ["forge-button"]);
    check!(results[0].matched_fields == [SearchField::Methods]);
}

#[rstest]
fn blank_query_does_not_score(index: ComponentIndex) {
    check!(search(&index, "   ", &SearchOptions::default()).is_empty());
}

#[rstest]
fn end_to_end_validation(index: ComponentIndex) {
    let button = index.get("forge-button").unwrap();
    let report = validate(
        button,
        &ApiRequest {
            properties: vec!["disabled".into(), "raised".into(), "missing".into()],
            ..ApiRequest::default()
        },
    );

    let names = |checks: &[forge_docs_mcp::validate::ApiCheck]| -> Vec<String> {
        checks.iter().map(|c| c.name.clone()).collect()
    };
    check!(names(&report.valid_apis) == ["disabled"]);
    check!(names(&report.deprecated_apis) == ["raised"]);
    check!(names(&report.invalid_apis) == ["missing"]);

    let available: Vec<&str> = report
        .available_apis
        .properties
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    check!(available == ["disabled", "raised"]);
    check!(report.available_apis.attributes.is_empty());
    check!(report.available_apis.events.is_empty());
}
