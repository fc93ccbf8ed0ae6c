use std::fmt::Write as _;

/// Longest proper prefix that is also a suffix, for every prefix of `pattern` (the KMP failure
/// table). Works on chars. Linear: every fall back shortens the current match, and the match
/// only grows by one per char visited.
pub fn lps(pattern: &str) -> Vec<usize> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut table = vec![0; chars.len()];
    if chars.is_empty() {
        return table;
    }

    let mut matched = 0;
    let mut i = 1;
    while i < chars.len() {
        if chars[i] == chars[matched] {
            matched += 1;
            table[i] = matched;
            i += 1;
        } else if matched > 0 {
            // Retry with the longest border of the current match
            matched = table[matched - 1];
        } else {
            table[i] = 0;
            i += 1;
        }
    }
    table
}

/// The two display lines: pattern chars and table entries, space separated.
pub fn format_lps(pattern: &str, table: &[usize]) -> String {
    debug_assert_eq!(pattern.chars().count(), table.len());

    let spaced: Vec<String> = pattern.chars().map(String::from).collect();
    let entries: Vec<String> = table.iter().map(usize::to_string).collect();

    let mut out = String::new();
    let _ = writeln!(out, "Pattern: {}", spaced.join(" "));
    let _ = writeln!(out, "LPS:     {}", entries.join(" "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tables() {
        assert_eq!(lps("aabaaab"), vec![0, 1, 0, 1, 2, 2, 3]);
        assert_eq!(lps("abcdabca"), vec![0, 0, 0, 0, 1, 2, 3, 1]);
        assert_eq!(lps("aaaa"), vec![0, 1, 2, 3]);
        assert_eq!(lps("abab"), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(lps("").is_empty());
        assert_eq!(lps("x"), vec![0]);
    }

    #[test]
    fn test_multibyte_chars() {
        assert_eq!(lps("éaé"), vec![0, 0, 1]);
    }

    #[test]
    fn test_format() {
        let text = format_lps("aab", &lps("aab"));
        assert_eq!(text, "Pattern: a a b\nLPS:     0 1 0\n");
        assert_eq!(format_lps("", &[]), "Pattern: \nLPS:     \n");
    }
}
