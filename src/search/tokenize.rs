//! Query tokenization.

/// Split a component query into lowercase terms.
///
/// Whitespace, hyphens and underscores all separate terms, so `app-bar drawer`
/// and `app bar drawer` search for the same thing. Repeated terms are dropped
/// keeping the first occurrence.
pub fn query_terms(query: &str) -> Vec<String> {
    dedup(
        query
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|term| !term.is_empty())
            .map(str::to_string),
    )
}

/// Split an icon query into lowercase terms on whitespace only.
///
/// Icon names use underscores (`photo_album`), so an underscore-joined query
/// stays a single term and can match a name exactly.
pub fn whitespace_terms(query: &str) -> Vec<String> {
    dedup(query.to_lowercase().split_whitespace().map(str::to_string))
}

fn dedup(terms: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for term in terms {
        if !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("button", &["button"])]
    #[case("App Bar  drawer", &["app", "bar", "drawer"])]
    #[case("app-bar_drawer", &["app", "bar", "drawer"])]
    #[case("  --  ", &[])]
    #[case("", &[])]
    #[case("card card CARD", &["card"])]
    fn splits_component_queries(#[case] query: &str, #[case] expected: &[&str]) {
        check!(query_terms(query) == expected);
    }

    #[rstest]
    #[case("photo_album", &["photo_album"])]
    #[case("Photo  camera", &["photo", "camera"])]
    #[case("   ", &[])]
    fn splits_icon_queries(#[case] query: &str, #[case] expected: &[&str]) {
        check!(whitespace_terms(query) == expected);
    }
}
