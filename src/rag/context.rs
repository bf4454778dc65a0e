use super::store::ContextMatch;

/// Concatenate match texts, in rank order, separated by single spaces.
/// Zero matches yield the empty string.
pub fn join_matches(matches: &[ContextMatch]) -> String {
    matches
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(text: &str) -> ContextMatch {
        ContextMatch {
            text: text.to_string(),
            score: 0.9,
        }
    }

    #[test]
    fn joins_in_rank_order_with_single_spaces() {
        assert_eq!(join_matches(&[m("a"), m("b")]), "a b");
    }

    #[test]
    fn empty_matches_yield_empty_context() {
        assert_eq!(join_matches(&[]), "");
    }
}
