//! Whitespace tokenizer for quote text.
//!
//! Tokens are borrowed slices of the input. Runs of whitespace (space, tab,
//! newline and other Unicode whitespace) form one delimiter, so no empty token
//! is ever produced: `""` and `"  \n"` both tokenize to nothing.

use super::config::TokenNormalization;

/// Split `text` into its whitespace-delimited tokens, in order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Tokens re-joined with single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    tokenize(text).join(" ")
}

/// Key used for membership tests under the given normalization.
///
/// A token made only of punctuation keeps its surface form so it still
/// compares against itself.
pub fn normalize_token(token: &str, normalization: TokenNormalization) -> &str {
    match normalization {
        TokenNormalization::Literal => token,
        TokenNormalization::StripTrailingPunctuation => {
            let trimmed = token.trim_end_matches(is_trailing_punctuation);
            if trimmed.is_empty() {
                token
            } else {
                trimmed
            }
        }
    }
}

fn is_trailing_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '…' | '·' | '“' | '”' | '‘' | '’' | '」' | '』' | '》' | '〉' | '。' | '、' | '！' | '？'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("새는 알에서 나오려고 투쟁한다.");
        assert_eq!(tokens, vec!["새는", "알에서", "나오려고", "투쟁한다."]);
    }

    #[test]
    fn empty_and_blank_input_yield_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("\t\n ").is_empty());
    }

    #[test]
    fn consecutive_whitespace_is_one_delimiter() {
        let tokens = tokenize("  알은\t\t세계이다.\n\n 알은 ");
        assert_eq!(tokens, vec!["알은", "세계이다.", "알은"]);
        assert_eq!(normalize_whitespace("  알은\t\t세계이다.\n"), "알은 세계이다.");
    }

    #[test]
    fn literal_normalization_keeps_punctuation() {
        assert_eq!(normalize_token("세계이다.", TokenNormalization::Literal), "세계이다.");
    }

    #[test]
    fn strip_normalization_trims_trailing_punctuation_only() {
        let mode = TokenNormalization::StripTrailingPunctuation;
        assert_eq!(normalize_token("세계이다.", mode), "세계이다");
        assert_eq!(normalize_token("정말?!…", mode), "정말");
        assert_eq!(normalize_token("“시작", mode), "“시작");
        assert_eq!(normalize_token("...", mode), "...");
    }
}
