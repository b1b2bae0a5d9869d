//! Match tiers and relevance scoring.
//!
//! A term is matched against a piece of text on a fixed ladder of tiers:
//! exact, prefix, contains, fuzzy (normalized Levenshtein similarity) and
//! finally keyword. The same ladder scores component fields and icon names.

use rapidfuzz::distance::levenshtein;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;

/// Minimum normalized similarity for a fuzzy match.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;
/// Score floor of the fuzzy tier.
pub const FUZZY_MIN_SCORE: f64 = 0.6;
/// Slope applied to similarity above the threshold.
pub const FUZZY_SCORE_MULTIPLIER: f64 = 0.19;
/// Keyword equal to the term. Deliberately just below [`FUZZY_MIN_SCORE`].
pub const KEYWORD_EXACT_SCORE: f64 = 0.59;
/// Keyword containing the term.
pub const KEYWORD_PARTIAL_SCORE: f64 = 0.4;
/// Multiplier when the term appears between word boundaries.
pub const WORD_BOUNDARY_BONUS: f64 = 1.5;
/// Extra weight per additional distinct term matched.
pub const MULTI_TERM_BONUS: f64 = 0.3;
/// Fraction of the originating score given to a related component.
pub const RELATED_SCORE_FACTOR: f64 = 0.3;

/// Scores closer than this are treated as ties when ranking.
const SCORE_RESOLUTION: f64 = 1000.0;

/// How a result matched, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    RelatedComponent,
    Keyword,
    Fuzzy,
    Contains,
    Prefix,
    Exact,
}

impl MatchType {
    /// Tie-break priority; higher wins.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Exact => 5,
            Self::Prefix => 4,
            Self::Contains => 3,
            Self::Fuzzy => 2,
            Self::Keyword => 1,
            Self::RelatedComponent => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Contains => "contains",
            Self::Fuzzy => "fuzzy",
            Self::Keyword => "keyword",
            Self::RelatedComponent => "related-component",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single term's match against one piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierMatch {
    pub match_type: MatchType,
    pub score: f64,
}

impl TierMatch {
    const fn new(match_type: MatchType, score: f64) -> Self {
        Self { match_type, score }
    }

    /// Keep whichever match is stronger, preferring the higher tier on equal scores.
    pub fn best(self, other: Self) -> Self {
        match self.score.total_cmp(&other.score) {
            Ordering::Less => other,
            Ordering::Greater => self,
            Ordering::Equal if other.match_type > self.match_type => other,
            Ordering::Equal => self,
        }
    }
}

/// Normalized Levenshtein similarity in `[0, 1]`, compared case-insensitively.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    1.0 - distance as f64 / max_len as f64
}

fn fuzzy_score(similarity: f64) -> f64 {
    FUZZY_MIN_SCORE + (similarity - FUZZY_MIN_SCORE) * FUZZY_SCORE_MULTIPLIER
}

/// Match a lowercase term against the whole of a lowercase text.
///
/// Returns `None` when the text is not even a fuzzy match; keyword matching is
/// a separate step because only some callers have keywords.
pub fn match_term(text: &str, term: &str) -> Option<TierMatch> {
    if text.is_empty() || term.is_empty() {
        return None;
    }
    if text == term {
        return Some(TierMatch::new(MatchType::Exact, 1.0));
    }
    if text.starts_with(term) {
        return Some(TierMatch::new(MatchType::Prefix, 0.9));
    }
    if text.contains(term) {
        return Some(TierMatch::new(MatchType::Contains, 0.8));
    }
    let sim = similarity(text, term);
    (sim >= SIMILARITY_THRESHOLD).then(|| TierMatch::new(MatchType::Fuzzy, fuzzy_score(sim)))
}

/// Match a lowercase term against a text and each of its words.
///
/// A term equal to one word of the text (`button` in `forge-button`) is an
/// exact match, a term starting a word is a prefix match, and fuzzy similarity
/// is taken as the best over the whole text and every word.
pub fn match_words(text: &str, term: &str) -> Option<TierMatch> {
    if text.is_empty() || term.is_empty() {
        return None;
    }

    let mut starts_word = text.starts_with(term);
    for word in words(text) {
        if word == term {
            return Some(TierMatch::new(MatchType::Exact, 1.0));
        }
        starts_word |= word.starts_with(term);
    }

    if text == term {
        return Some(TierMatch::new(MatchType::Exact, 1.0));
    }
    if starts_word {
        return Some(TierMatch::new(MatchType::Prefix, 0.9));
    }
    if text.contains(term) {
        return Some(TierMatch::new(MatchType::Contains, 0.8));
    }

    let term_len = term.chars().count();
    let best = std::iter::once(text)
        .chain(words(text))
        .filter(|candidate| could_be_similar(candidate.chars().count(), term_len))
        .map(|candidate| similarity(candidate, term))
        .fold(0.0_f64, f64::max);

    (best >= SIMILARITY_THRESHOLD).then(|| TierMatch::new(MatchType::Fuzzy, fuzzy_score(best)))
}

/// Edit distance is at least the length difference, so skip hopeless pairs.
fn could_be_similar(a: usize, b: usize) -> bool {
    let max = a.max(b);
    max > 0 && (a.abs_diff(b) as f64 / max as f64) <= 1.0 - SIMILARITY_THRESHOLD
}

/// Keyword tier: exact keyword equality or a keyword containing the term.
pub fn match_keywords<S: AsRef<str>>(keywords: &[S], term: &str) -> Option<TierMatch> {
    if term.is_empty() {
        return None;
    }
    keywords
        .iter()
        .filter_map(|keyword| {
            let keyword = keyword.as_ref().to_lowercase();
            if keyword == term {
                Some(TierMatch::new(MatchType::Keyword, KEYWORD_EXACT_SCORE))
            } else if keyword.contains(term) {
                Some(TierMatch::new(MatchType::Keyword, KEYWORD_PARTIAL_SCORE))
            } else {
                None
            }
        })
        .reduce(TierMatch::best)
}

/// Split text into words on anything that is not alphanumeric.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Compiled `\bterm\b` matcher for the word-boundary bonus.
#[derive(Debug, Clone)]
pub struct BoundaryMatcher {
    regex: Option<Regex>,
}

impl BoundaryMatcher {
    pub fn new(term: &str) -> Self {
        let regex = Regex::new(&format!(r"\b{}\b", regex::escape(term))).ok();
        Self { regex }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }
}

/// Integer ranking key: scores within the same thousandth compare equal.
pub fn score_key(score: f64) -> i64 {
    (score * SCORE_RESOLUTION).round() as i64
}

/// Ranking order: score descending, then match tier descending, then name ascending.
///
/// Scores tie when they round to the same thousandth (see [`score_key`]).
/// Two scores closer than 0.001 but on opposite sides of a rounding edge are
/// still ordered by score: a "within 0.001" window is not transitive, so no
/// total order can honour it exactly.
pub fn compare_ranked(
    (a_score, a_type, a_name): (f64, MatchType, &str),
    (b_score, b_type, b_name): (f64, MatchType, &str),
) -> Ordering {
    score_key(b_score)
        .cmp(&score_key(a_score))
        .then_with(|| b_type.priority().cmp(&a_type.priority()))
        .then_with(|| a_name.cmp(b_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("camera", "camera", MatchType::Exact, 1.0)]
    #[case("camera_alt", "camera", MatchType::Prefix, 0.9)]
    #[case("add_a_photo", "photo", MatchType::Contains, 0.8)]
    fn ladder_tiers(
        #[case] text: &str,
        #[case] term: &str,
        #[case] tier: MatchType,
        #[case] score: f64,
    ) {
        let hit = match_term(text, term).unwrap();
        check!(hit.match_type == tier);
        check!((hit.score - score).abs() < 1e-9);
    }

    #[test]
    fn fuzzy_score_follows_similarity() {
        // one substitution in six characters
        let hit = match_term("camera", "camara").unwrap();
        check!(hit.match_type == MatchType::Fuzzy);
        let expected = 0.6 + (1.0 - 1.0 / 6.0 - 0.6) * 0.19;
        check!((hit.score - expected).abs() < 1e-9);
        check!(hit.score >= FUZZY_MIN_SCORE);
        check!(hit.score < 0.8);
    }

    #[test]
    fn dissimilar_text_does_not_match() {
        check!(match_term("camera", "keyboard").is_none());
    }

    #[test]
    fn keyword_exact_sits_below_fuzzy_floor() {
        check!(KEYWORD_EXACT_SCORE < FUZZY_MIN_SCORE);
        let exact = match_keywords(&["photo", "picture"], "photo").unwrap();
        check!(exact.match_type == MatchType::Keyword);
        check!((exact.score - 0.59).abs() < 1e-9);

        let partial = match_keywords(&["photography"], "photo").unwrap();
        check!((partial.score - 0.4).abs() < 1e-9);

        check!(match_keywords(&["video"], "photo").is_none());
    }

    #[test]
    fn keyword_prefers_exact_over_partial() {
        let hit = match_keywords(&["photography", "photo"], "photo").unwrap();
        check!((hit.score - KEYWORD_EXACT_SCORE).abs() < 1e-9);
    }

    #[rstest]
    #[case("forge-button", "button", MatchType::Exact)]
    #[case("forge-buttons-group", "button", MatchType::Prefix)]
    #[case("forge-togglebutton", "button", MatchType::Contains)]
    #[case("forge-button", "buton", MatchType::Fuzzy)]
    fn word_aware_tiers(#[case] text: &str, #[case] term: &str, #[case] tier: MatchType) {
        check!(match_words(text, term).map(|m| m.match_type) == Some(tier));
    }

    #[test]
    fn word_boundary_matcher() {
        let matcher = BoundaryMatcher::new("button");
        check!(matcher.is_match("forge-button"));
        check!(matcher.is_match("a button that submits"));
        check!(!matcher.is_match("forge-buttons-group"));
    }

    #[test]
    fn boundary_matcher_escapes_metacharacters() {
        let matcher = BoundaryMatcher::new("a.b");
        check!(matcher.is_match("x a.b y"));
        check!(!matcher.is_match("x acb y"));
    }

    #[test]
    fn similarity_bounds() {
        check!((similarity("", "") - 1.0).abs() < 1e-9);
        check!((similarity("abc", "abc") - 1.0).abs() < 1e-9);
        check!(similarity("abc", "xyz").abs() < 1e-9);
        check!((similarity("ABC", "abc") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ranking_breaks_ties_deterministically() {
        let mut rows = vec![
            (1.0004, MatchType::Fuzzy, "b"),
            (1.0, MatchType::Exact, "c"),
            (1.0, MatchType::Exact, "a"),
            (2.0, MatchType::Keyword, "z"),
        ];
        rows.sort_by(|a, b| compare_ranked(*a, *b));
        let names: Vec<_> = rows.iter().map(|r| r.2).collect();
        check!(names == ["z", "a", "c", "b"]);
    }

    #[test]
    fn ties_are_decided_per_thousandth() {
        let mut same_bucket = vec![(1.0012, MatchType::Keyword, "a"), (1.0008, MatchType::Exact, "b")];
        same_bucket.sort_by(|a, b| compare_ranked(*a, *b));
        check!(same_bucket.iter().map(|r| r.2).collect::<Vec<_>>() == ["b", "a"]);

        // 1.0006 rounds up and 1.0004 rounds down, so score alone decides
        let mut across_edge = vec![(1.0004, MatchType::Exact, "b"), (1.0006, MatchType::Keyword, "a")];
        across_edge.sort_by(|a, b| compare_ranked(*a, *b));
        check!(across_edge.iter().map(|r| r.2).collect::<Vec<_>>() == ["a", "b"]);
    }

    #[test]
    fn match_type_priority_order() {
        check!(MatchType::Exact.priority() > MatchType::Prefix.priority());
        check!(MatchType::Prefix.priority() > MatchType::Contains.priority());
        check!(MatchType::Contains.priority() > MatchType::Fuzzy.priority());
        check!(MatchType::Fuzzy.priority() > MatchType::Keyword.priority());
        check!(MatchType::Keyword.priority() > MatchType::RelatedComponent.priority());
    }
}
