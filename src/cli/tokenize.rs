use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
}

/// Split a session line into words. Single or double quotes group words;
/// a backslash escapes the next character outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"') | None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(TokenizeError::UnterminatedQuote(q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(
            split_line("  invoice --client Acme  ").unwrap(),
            vec!["invoice", "--client", "Acme"]
        );
        assert!(split_line("   ").unwrap().is_empty());
    }

    #[test]
    fn test_quotes_group_words() {
        assert_eq!(
            split_line(r#"expense --title "New laptop" --receipt 'my receipts/a.pdf'"#).unwrap(),
            vec!["expense", "--title", "New laptop", "--receipt", "my receipts/a.pdf"]
        );
    }

    #[test]
    fn test_empty_quotes_make_an_empty_word() {
        assert_eq!(split_line(r#"a "" b"#).unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            split_line(r#"say "she said \"hi\"" a\ b"#).unwrap(),
            vec!["say", r#"she said "hi""#, "a b"]
        );
        assert_eq!(split_line(r"'c:\temp'").unwrap(), vec![r"c:\temp"]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            split_line(r#"invoice --client "Acme"#),
            Err(TokenizeError::UnterminatedQuote('"'))
        );
    }
}
