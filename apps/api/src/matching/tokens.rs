use std::collections::BTreeSet;

/// A deduplicated set of lowercase, whitespace-delimited words.
///
/// Ordered so that matched/missing lists serialize the same way on every call.
pub type KeywordSet = BTreeSet<String>;

/// Lowercases `text` and splits it on Unicode whitespace. Punctuation stays attached:
/// `"python,"` and `"python"` are different tokens.
pub fn tokenize(text: &str) -> KeywordSet {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Tokenizes each phrase and unions the results. `"data structures"` yields
/// `"data"` and `"structures"`, not the phrase itself.
pub fn tokenize_phrases<'a, I>(phrases: I) -> KeywordSet
where
    I: IntoIterator<Item = &'a str>,
{
    phrases.into_iter().flat_map(tokenize).collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
