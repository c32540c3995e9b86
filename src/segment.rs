//! Splits pasted text into per-file chunks.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// A run of five or more `=` or `-` characters separates two chunks.
static DIVIDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"={5,}|-{5,}").expect("valid divider pattern"));

/// Splits `raw` on divider runs and returns the trimmed, non-empty pieces in
/// order of appearance.
///
/// # Examples
///
/// ```
/// use paste_scaffold::segment;
///
/// let chunks = segment("A\n=====\nB\n-----\nC");
/// assert_eq!(chunks, vec!["A", "B", "C"]);
/// ```
#[must_use]
pub fn segment(raw: &str) -> Vec<&str> {
    let chunks: Vec<&str> = DIVIDER
        .split(raw)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();

    trace!("Segmented input into {} chunks", chunks.len());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_dividers() {
        assert_eq!(segment("A=====B-----C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_leading_and_trailing_dividers() {
        let raw = "=====\nfirst\n-----\nsecond\n==========\n";
        assert_eq!(segment(raw), vec!["first", "second"]);
    }

    #[test]
    fn test_long_runs_are_single_dividers() {
        let raw = "one\n------------------------------\ntwo";
        assert_eq!(segment(raw), vec!["one", "two"]);
    }

    #[test]
    fn test_short_runs_are_content() {
        let raw = "<!-- comment -->\nx == y\n---";
        assert_eq!(segment(raw), vec![raw]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\t  ").is_empty());
        assert!(segment("=====\n\n-----\n   \n=====").is_empty());
    }

    #[test]
    fn test_chunks_are_trimmed() {
        let raw = "\n\n  package a;\n\n=====\n\t<?xml?>  \n";
        assert_eq!(segment(raw), vec!["package a;", "<?xml?>"]);
    }
}
