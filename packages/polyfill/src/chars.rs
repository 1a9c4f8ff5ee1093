/*
 * Character Codes
 *
 * Structural characters recognized by the stylesheet scanners.
 */

// Quotes
pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const BACKSLASH: char = '\\';

// Punctuation
pub const AMPERSAND: char = '&';
pub const AT: char = '@';
pub const COMMA: char = ',';
pub const SEMICOLON: char = ';';
pub const SPACE: char = ' ';

// Parens and brackets
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const LBRACKET: char = '[';
pub const RBRACKET: char = ']';

// Braces
pub const LBRACE: char = '{';
pub const RBRACE: char = '}';

/// Check if character opens or closes a CSS string
pub fn is_quote(ch: char) -> bool {
    ch == SQ || ch == DQ
}
