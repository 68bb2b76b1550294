//! Content matching between proposed edits and ground-truth document text.
//!
//! Suggestion sources reproduce document text imperfectly: markdown
//! emphasis gets dropped, whitespace collapses, short passages drift a few
//! characters. The matcher runs a three-tier cascade, cheapest first, and
//! decides which substring of the document a proposal actually refers to.
//! A proposal that matches nothing under any tier is an invented citation
//! and never reaches review.

/// Fixed confidence ceiling for fuzzy matches. The proposal's exact
/// wording was not trusted, so neither is the generator's score.
pub const FUZZY_CONFIDENCE_CEILING: f64 = 0.6;

/// Minimum share of the proposed text that the longest common substring
/// must cover for a fuzzy match: strictly more than 80%.
const FUZZY_NUMERATOR: usize = 4;
const FUZZY_DENOMINATOR: usize = 5;

/// Which strategy validated a proposal against real document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Literal substring of the document.
    Exact,
    /// Substring after markdown/whitespace/case normalization.
    Normalized,
    /// Longest-common-substring overlap above the threshold.
    Fuzzy,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Normalized => "normalized",
            Self::Fuzzy => "fuzzy",
        }
    }

    /// Cap applied to the generator's claimed confidence for this tier.
    pub fn confidence_cap(&self) -> f64 {
        match self {
            Self::Exact | Self::Normalized => 1.0,
            Self::Fuzzy => FUZZY_CONFIDENCE_CEILING,
        }
    }
}

/// A successful match. `authoritative_text` is the string the patch
/// executor should search for: the proposal verbatim for the exact and
/// normalized tiers, the document-side substring for the fuzzy tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMatch {
    pub tier: MatchTier,
    pub authoritative_text: String,
}

/// Decide whether `proposed` genuinely exists in `document`.
///
/// Tiers are tried in order and the first hit wins. `None` means the
/// proposal corresponds to no real passage and should be dropped before
/// persistence: not recorded, not reported as failed.
pub fn match_content(proposed: &str, document: &str) -> Option<ContentMatch> {
    if proposed.is_empty() {
        return None;
    }

    // Tier 1: literal containment.
    if document.contains(proposed) {
        return Some(ContentMatch {
            tier: MatchTier::Exact,
            authoritative_text: proposed.to_string(),
        });
    }

    // Tier 2: containment after normalization. The proposal is accepted
    // verbatim even though it differs cosmetically from the document; the
    // patch executor's own exact-substring check decides what that means
    // at apply time.
    let normalized_proposed = normalize(proposed);
    if !normalized_proposed.is_empty() && normalize(document).contains(&normalized_proposed) {
        return Some(ContentMatch {
            tier: MatchTier::Normalized,
            authoritative_text: proposed.to_string(),
        });
    }

    // Tier 3: longest common contiguous substring. Taking the matched text
    // from the document side self-corrects minor transcription drift.
    let proposed_len = proposed.chars().count();
    let lcs = longest_common_substring(proposed, document);
    if lcs.chars().count() * FUZZY_DENOMINATOR > proposed_len * FUZZY_NUMERATOR {
        return Some(ContentMatch {
            tier: MatchTier::Fuzzy,
            authoritative_text: lcs,
        });
    }

    None
}

/// Shared normalizer for the matcher and the section resolver: strip
/// markdown emphasis and code markers, collapse whitespace runs to a
/// single space, lowercase.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`'))
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Longest common contiguous substring, returned from the `document` side.
///
/// Classic O(n*m) dynamic program over chars with a rolling row. Operating
/// on chars rather than bytes keeps the returned slice on UTF-8 boundaries.
fn longest_common_substring(proposed: &str, document: &str) -> String {
    let p: Vec<char> = proposed.chars().collect();
    let d: Vec<char> = document.chars().collect();
    if p.is_empty() || d.is_empty() {
        return String::new();
    }

    let mut prev = vec![0usize; d.len() + 1];
    let mut best_len = 0usize;
    let mut best_end = 0usize; // exclusive end index into `d`

    for i in 1..=p.len() {
        let mut curr = vec![0usize; d.len() + 1];
        for j in 1..=d.len() {
            if p[i - 1] == d[j - 1] {
                curr[j] = prev[j - 1] + 1;
                if curr[j] > best_len {
                    best_len = curr[j];
                    best_end = j;
                }
            }
        }
        prev = curr;
    }

    d[best_end - best_len..best_end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Install\n\nRun `make install` to build the project.\nThe *default* prefix is /usr/local.\n";

    #[test]
    fn exact_substring_matches_at_tier_one() {
        let m = match_content("Run `make install` to build", DOC).unwrap();
        assert_eq!(m.tier, MatchTier::Exact);
        assert_eq!(m.authoritative_text, "Run `make install` to build");
    }

    #[test]
    fn markdown_and_whitespace_drift_matches_normalized() {
        // Document says "Run `make install` to build the project."
        let m = match_content("run make  install to build the project.", DOC).unwrap();
        assert_eq!(m.tier, MatchTier::Normalized);
        // The proposal is kept verbatim, not corrected to the document.
        assert_eq!(m.authoritative_text, "run make  install to build the project.");
    }

    #[test]
    fn small_drift_matches_fuzzy_with_document_text() {
        // One word wrong; the shared run covers well over 80% of the proposal.
        let proposed = "The *default* prefix is /usr/share.";
        let m = match_content(proposed, DOC).unwrap();
        assert_eq!(m.tier, MatchTier::Fuzzy);
        // Authoritative text comes from the document side.
        assert!(DOC.contains(&m.authoritative_text));
        assert!(m.authoritative_text.contains("prefix is /usr/"));
    }

    #[test]
    fn fuzzy_tier_caps_confidence() {
        assert_eq!(MatchTier::Fuzzy.confidence_cap(), 0.6);
        assert_eq!(MatchTier::Exact.confidence_cap(), 1.0);
        let claimed: f64 = 0.95;
        assert!(claimed.min(MatchTier::Fuzzy.confidence_cap()) <= 0.6);
    }

    #[test]
    fn unrelated_text_matches_nothing() {
        assert!(match_content("xyz-not-present", DOC).is_none());
        assert!(match_content("completely different sentence about databases", DOC).is_none());
    }

    #[test]
    fn empty_proposal_is_dropped() {
        assert!(match_content("", DOC).is_none());
        assert!(match_content("   ", DOC).is_none());
    }

    #[test]
    fn normalize_strips_markers_and_collapses_whitespace() {
        assert_eq!(normalize("The  *Default*\n`prefix`"), "the default prefix");
    }

    #[test]
    fn lcs_returns_document_side_substring() {
        assert_eq!(longest_common_substring("abcxyz", "zzabcqq"), "abc");
        assert_eq!(longest_common_substring("", "anything"), "");
    }
}
