//! Dish name search patterns.

/// Build an `ILIKE` pattern from a free-text query.
///
/// Whitespace between tokens becomes a `%` wildcard, so `"curry rice"`
/// matches `"Curry Rice"` and `"Curry and Rice"`. LIKE metacharacters in the
/// query are escaped with `\` (PostgreSQL's default escape character).
/// Returns `None` when the query has no tokens.
pub fn name_pattern(query: &str) -> Option<String> {
    let tokens: Vec<String> = query.split_whitespace().map(escape_like).collect();
    if tokens.is_empty() {
        return None;
    }
    Some(format!("%{}%", tokens.join("%")))
}

fn escape_like(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_token() {
        assert_eq!(name_pattern("curry").as_deref(), Some("%curry%"));
    }

    #[test]
    fn spaces_become_wildcards() {
        assert_eq!(name_pattern("curry rice").as_deref(), Some("%curry%rice%"));
        assert_eq!(name_pattern("  curry   rice ").as_deref(), Some("%curry%rice%"));
    }

    #[test]
    fn japanese_query() {
        assert_eq!(name_pattern("カレー").as_deref(), Some("%カレー%"));
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(name_pattern("100%").as_deref(), Some("%100\\%%"));
        assert_eq!(name_pattern("a_b").as_deref(), Some("%a\\_b%"));
        assert_eq!(name_pattern("a\\b").as_deref(), Some("%a\\\\b%"));
    }

    #[test]
    fn blank_query_has_no_pattern() {
        assert_eq!(name_pattern(""), None);
        assert_eq!(name_pattern("   "), None);
    }
}
