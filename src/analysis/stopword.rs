use std::collections::HashSet;

/// English stopword list applied when analysis is asked to deduplicate.
pub fn english() -> HashSet<String> {
    [
        "a", "about", "above", "after", "again", "all", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being",
        "below", "between", "both", "but", "by", "could", "did", "do",
        "does", "doing", "down", "during", "each", "few", "for", "from",
        "further", "had", "has", "have", "having", "he", "her", "here",
        "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it",
        "its", "just", "me", "more", "most", "my", "no", "nor", "not", "now",
        "of", "off", "on", "once", "only", "or", "other", "our", "out",
        "over", "own", "same", "she", "should", "so", "some", "such", "than",
        "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which",
        "while", "who", "whom", "why", "will", "with", "you", "your",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
