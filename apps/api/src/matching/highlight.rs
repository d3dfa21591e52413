use crate::matching::tokens::{tokenize, KeywordSet};

/// Wrapper put around each highlighted word. Defaults to Markdown bold.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub open: String,
    pub close: String,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            open: "**".to_string(),
            close: "**".to_string(),
        }
    }
}

/// Marks every resume word that also appears in the job description.
///
/// The matched set is `tokens(resume) ∩ tokens(job_description)`; role skills are not
/// involved.
pub fn highlight(resume_text: &str, job_description: &str, marker: &Marker) -> String {
    let resume_tokens = tokenize(resume_text);
    let matched: KeywordSet = tokenize(job_description)
        .intersection(&resume_tokens)
        .cloned()
        .collect();
    highlight_matches(resume_text, &matched, marker)
}

/// One pass over `text`: each whitespace-delimited word whose lowercase form is in
/// `matched` is wrapped in `marker`. Whitespace is copied through unchanged and words
/// are never split, so a keyword that is a substring of another (`a` in `java`) cannot
/// cause a partial or nested wrap.
pub fn highlight_matches(text: &str, matched: &KeywordSet, marker: &Marker) -> String {
    if matched.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut word_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = word_start.take() {
                push_word(&mut out, &text[start..idx], matched, marker);
            }
            out.push(ch);
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }
    if let Some(start) = word_start {
        push_word(&mut out, &text[start..], matched, marker);
    }

    out
}

fn push_word(out: &mut String, word: &str, matched: &KeywordSet, marker: &Marker) {
    if matched.contains(&word.to_lowercase()) {
        out.push_str(&marker.open);
        out.push_str(word);
        out.push_str(&marker.close);
    } else {
        out.push_str(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> Marker {
        Marker::default()
    }

    #[test]
    fn test_matching_words_are_wrapped_case_insensitively() {
        let out = highlight("Built APIs in Python and Docker", "python docker go", &bold());
        assert_eq!(out, "Built APIs in **Python** and **Docker**");
    }

    #[test]
    fn test_every_occurrence_is_wrapped() {
        let out = highlight("rust and more rust", "rust", &bold());
        assert_eq!(out, "**rust** and more **rust**");
    }

    #[test]
    fn test_substring_keywords_do_not_corrupt_longer_words() {
        let out = highlight("a java developer", "a java", &bold());
        assert_eq!(out, "**a** **java** developer");

        let out = highlight("javascript developer", "java", &bold());
        assert_eq!(out, "javascript developer");
    }

    #[test]
    fn test_whitespace_is_preserved_exactly() {
        let text = "  python\n\n\tdocker  ";
        let out = highlight(text, "docker", &bold());
        assert_eq!(out, "  python\n\n\t**docker**  ");
    }

    #[test]
    fn test_no_overlap_returns_text_unchanged() {
        let text = "Cooking and gardening";
        assert_eq!(highlight(text, "rust go", &bold()), text);
        assert_eq!(highlight(text, "", &bold()), text);
    }

    #[test]
    fn test_custom_marker() {
        let marker = Marker {
            open: "<mark>".to_string(),
            close: "</mark>".to_string(),
        };
        let out = highlight("python, rust", "rust", &marker);
        assert_eq!(out, "python, <mark>rust</mark>");
    }

    #[test]
    fn test_punctuation_must_match_like_scoring() {
        // "python," is its own token, same as in scoring.
        let out = highlight("python, rust", "python", &bold());
        assert_eq!(out, "python, rust");
    }

    #[test]
    fn test_multibyte_text_is_handled() {
        let out = highlight("Café in Zürich", "zürich", &bold());
        assert_eq!(out, "Café in **Zürich**");
    }
}
