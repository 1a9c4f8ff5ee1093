//! Text Scanner
//!
//! Brace matching and selector list splitting over raw stylesheet text.
//! All scans here treat the contents of quoted strings (and backslash
//! escaped characters) as opaque text, never as structure.

use crate::chars;

/// Tracks whether a left-to-right scan is currently inside a string literal.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteState {
    open_quote: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Feeds the next character. Returns true when the character is literal
    /// text: a quote delimiter, anything inside a string, or an escaped char.
    pub(crate) fn consume(&mut self, ch: char) -> bool {
        if std::mem::take(&mut self.escaped) {
            return true;
        }
        if ch == chars::BACKSLASH {
            self.escaped = true;
            return true;
        }
        match self.open_quote {
            Some(quote) => {
                if ch == quote {
                    self.open_quote = None;
                }
                true
            }
            None if chars::is_quote(ch) => {
                self.open_quote = Some(ch);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn in_string(&self) -> bool {
        self.open_quote.is_some()
    }
}

/// Returns the index of the `}` balancing the `{` at `open_index`.
///
/// Depth starts at 1 just after the opening brace. Braces inside quoted
/// strings do not count, so `content: "}"` does not close a rule early.
/// `None` means the brace is unmatched (or `open_index` is not a `{`).
pub fn find_matching_brace(text: &str, open_index: usize) -> Option<usize> {
    find_matching_delimiter(text, open_index, chars::LBRACE, chars::RBRACE)
}

/// Same as [`find_matching_brace`] for parentheses.
pub fn find_matching_paren(text: &str, open_index: usize) -> Option<usize> {
    find_matching_delimiter(text, open_index, chars::LPAREN, chars::RPAREN)
}

fn find_matching_delimiter(text: &str, open_index: usize, open: char, close: char) -> Option<usize> {
    let rest = text.get(open_index..)?;
    let mut iter = rest.char_indices();
    match iter.next() {
        Some((_, ch)) if ch == open => {}
        _ => return None,
    }

    let mut depth = 1usize;
    let mut quotes = QuoteState::default();
    for (offset, ch) in iter {
        if quotes.consume(ch) {
            continue;
        }
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(open_index + offset);
            }
        }
    }
    None
}

/// Finds the next `target` at or after `from` that is not part of a string.
pub fn find_unquoted(text: &str, from: usize, target: char) -> Option<usize> {
    let rest = text.get(from..)?;
    let mut quotes = QuoteState::default();
    rest.char_indices()
        .find(|&(_, ch)| !quotes.consume(ch) && ch == target)
        .map(|(offset, _)| from + offset)
}

/// Splits a selector list on its top-level commas.
///
/// Commas nested in parentheses (`:is(.a, .b)`) or inside quoted strings
/// (`[title="a,b"]`) stay part of the current selector. Elements are not
/// trimmed; a trailing empty buffer is not emitted.
pub fn split_on_top_level_commas(text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut parens: i32 = 0;
    let mut quotes = QuoteState::default();

    for ch in text.chars() {
        if quotes.consume(ch) {
            current.push(ch);
            continue;
        }
        match ch {
            chars::LPAREN => parens += 1,
            chars::RPAREN => parens -= 1,
            chars::COMMA if parens == 0 => {
                result.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// Splits `text` into maximal runs that are either structural or literal,
/// in order. Literal runs are quoted strings (quotes included) and escaped
/// characters. Concatenating the runs gives back `text`.
pub(crate) fn quote_segments(text: &str) -> Vec<(bool, &str)> {
    let mut segments = Vec::new();
    let mut quotes = QuoteState::default();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let literal = quotes.consume(ch);
        match current {
            Some(kind) if kind == literal => {}
            Some(kind) => {
                segments.push((kind, &text[start..i]));
                start = i;
                current = Some(literal);
            }
            None => current = Some(literal),
        }
    }
    if let Some(kind) = current {
        segments.push((kind, &text[start..]));
    }
    segments
}

/// Drops body-less statements (`color: red;`, `@import "x";`) that precede a
/// rule header, returning only the text after the last top-level `;`.
pub fn strip_statement_prefix(header: &str) -> &str {
    let mut nesting: i32 = 0;
    let mut quotes = QuoteState::default();
    let mut start = 0;

    for (i, ch) in header.char_indices() {
        if quotes.consume(ch) {
            continue;
        }
        match ch {
            chars::LPAREN | chars::LBRACKET => nesting += 1,
            chars::RPAREN | chars::RBRACKET => nesting -= 1,
            chars::SEMICOLON if nesting <= 0 => start = i + 1,
            _ => {}
        }
    }
    &header[start..]
}
