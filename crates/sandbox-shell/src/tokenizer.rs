//! Command line tokenizer.
//!
//! Whitespace separates tokens except inside a quoted region. Either `'` or
//! `"` opens a region that runs until the same character appears again; the
//! quote characters themselves are dropped. There are no escapes, and an
//! unterminated region simply runs to the end of the line.

/// Split a raw input line into tokens.
///
/// Empty tokens (such as `""`) are dropped.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
