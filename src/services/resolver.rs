//! Section resolution for imprecisely-named suggestion targets.
//!
//! Generators rarely reproduce section titles exactly, so resolution runs
//! through widening strategies: exact normalized title, partial title
//! containment, then content containment. The resolver never manufactures
//! a section; when nothing resolves the caller decides between a lenient
//! first-candidate fallback and dropping the suggestion.

use crate::domain::models::Section;

use super::matcher::normalize;

/// Resolve a generator-supplied section title and original-content snippet
/// to a concrete candidate section.
///
/// Ties at every step break toward the first candidate in input order, so
/// callers should pass candidates in relevance order.
pub fn resolve<'a>(
    ai_title: &str,
    ai_original: &str,
    candidates: &'a [Section],
) -> Option<&'a Section> {
    if candidates.is_empty() {
        return None;
    }

    let title = normalize(ai_title);

    if !title.is_empty() {
        // Exact normalized title equality wins outright.
        if let Some(section) = candidates.iter().find(|s| normalize(&s.title) == title) {
            return Some(section);
        }

        // Partial containment in either direction. Among partial hits,
        // a file path containing the title disambiguates sections that
        // share a title across files.
        let partial: Vec<&Section> = candidates
            .iter()
            .filter(|s| {
                let candidate_title = normalize(&s.title);
                !candidate_title.is_empty()
                    && (candidate_title.contains(&title) || title.contains(&candidate_title))
            })
            .collect();
        if !partial.is_empty() {
            return Some(
                partial
                    .iter()
                    .find(|s| path_contains(s, &title))
                    .copied()
                    .unwrap_or(partial[0]),
            );
        }
    }

    // No title-based candidate: fall back to content containment.
    let original = normalize(ai_original);
    if !original.is_empty() {
        let by_content: Vec<&Section> = candidates
            .iter()
            .filter(|s| normalize(&s.content).contains(&original))
            .collect();
        match by_content.len() {
            0 => {}
            1 => return Some(by_content[0]),
            _ => {
                if !title.is_empty() {
                    if let Some(section) = by_content
                        .iter()
                        .find(|s| path_contains(s, &title) || normalize(&s.title).contains(&title))
                        .copied()
                    {
                        return Some(section);
                    }
                }
                return Some(by_content[0]);
            }
        }
    }

    None
}

fn path_contains(section: &Section, needle: &str) -> bool {
    normalize(&section.file_path.to_string_lossy()).contains(needle)
}
