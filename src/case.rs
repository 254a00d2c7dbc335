//! Identifier conversion for URL slugs: CamelCase model names -> underscored plural slugs.

/// Convert a CamelCase identifier to snake_case, keeping acronyms together.
/// e.g. "Bill" -> "bill", "CommitteeHearing" -> "committee_hearing", "HTTPRequest" -> "http_request"
pub fn underscore(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map(|n| n.is_lowercase()).unwrap_or(false);
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Pluralize the last word of a lower-case identifier.
/// e.g. "bill" -> "bills", "address" -> "addresses", "committee_entry" -> "committee_entries"
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| word.ends_with(suffix)) {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if before.map(|c| !"aeiou".contains(c)).unwrap_or(false) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", word)
}

/// Plural slug for a model name: underscore, then pluralize.
pub fn plural_slug(model_name: &str) -> String {
    pluralize(&underscore(model_name))
}
