use std::collections::BTreeSet;

/// Parse a compact answer string ("AB", "b,d", "") into the canonical answer set.
///
/// Letters are upper-cased, anything else is dropped, duplicates collapse.
pub fn parse_correct_answers(answer: &str) -> BTreeSet<char> {
    answer
        .chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(set: &BTreeSet<char>) -> String {
        set.iter().collect()
    }

    #[test]
    fn test_sorted_and_uppercased() {
        assert_eq!(letters(&parse_correct_answers("ba")), "AB");
    }

    #[test]
    fn test_empty() {
        assert!(parse_correct_answers("").is_empty());
    }

    #[test]
    fn test_drops_non_letters_and_duplicates() {
        assert_eq!(letters(&parse_correct_answers("C, a; c 1")), "AC");
        assert_eq!(letters(&parse_correct_answers("DDD")), "D");
    }
}
