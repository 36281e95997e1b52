//! Fuzzy search over font descriptors.
//!
//! A query matches a target when its characters occur, in order and ignoring
//! case, somewhere in the target. An empty query matches everything.

use crate::descriptor::FontDescriptor;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

fn matcher() -> SkimMatcherV2 {
    SkimMatcherV2::default().respect_case()
}

/// Lowercase `s` with full Unicode rules. The second value maps each char of
/// the result back to the index of the char it came from.
fn fold_case(s: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(s.len());
    let mut origin = Vec::with_capacity(s.len());
    for (index, c) in s.chars().enumerate() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.push(index);
        }
    }
    (folded, origin)
}

fn lowercase(s: &str) -> String {
    fold_case(s).0
}

/// Case-insensitive ordered-subsequence test.
pub fn fuzzy_match(target: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    matcher()
        .fuzzy_match(&lowercase(target), &lowercase(query))
        .is_some()
}

/// Character indices in `target` matched by `query`, for highlighting.
///
/// Empty when the query is empty or does not match.
pub fn match_indices(target: &str, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let (folded, origin) = fold_case(target);
    let Some((_, indices)) = matcher().fuzzy_indices(&folded, &lowercase(query)) else {
        return Vec::new();
    };
    let mut mapped: Vec<usize> = indices
        .into_iter()
        .filter_map(|i| origin.get(i).copied())
        .collect();
    mapped.dedup();
    mapped
}

/// Descriptors whose family, category, any variant or any subset matches `query`.
///
/// Catalog order is preserved.
pub fn filter_fonts<'a, I>(fonts: I, query: &str) -> Vec<&'a FontDescriptor>
where
    I: IntoIterator<Item = &'a FontDescriptor>,
{
    if query.is_empty() {
        return fonts.into_iter().collect();
    }

    let matcher = matcher();
    let query = lowercase(query);
    let matches = |target: &str| matcher.fuzzy_match(&lowercase(target), &query).is_some();

    fonts
        .into_iter()
        .filter(|font| {
            matches(font.family.as_str())
                || matches(font.category.as_str())
                || font.variants.iter().any(|v| matches(v.as_str()))
                || font.subsets.iter().any(|s| matches(s.as_str()))
        })
        .collect()
}
