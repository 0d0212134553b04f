//! Food name normalization and fuzzy table matching

/// Trim, lowercase and collapse internal whitespace runs
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Find the table entry matching `name`.
///
/// Exact match on the normalized name wins; otherwise the first entry (in
/// table order) whose key contains the name or is contained by it. Keys are
/// expected to be normalized already. A blank name matches nothing.
pub fn match_name<'a, T, F>(name: &str, table: &'a [T], key: F) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    let normalized = normalize_name(name);
    if normalized.is_empty() {
        return None;
    }

    table
        .iter()
        .find(|entry| key(entry) == normalized)
        .or_else(|| {
            table.iter().find(|entry| {
                let k = key(entry);
                normalized.contains(k) || k.contains(normalized.as_str())
            })
        })
}
