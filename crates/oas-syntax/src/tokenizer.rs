use text_size::{TextRange, TextSize};

use crate::SyntaxKind::{self, *};
use crate::cursor::{Cursor, EOF_CHAR};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    const EOF: Self = Self { kind: EOF, range: TextRange::empty(TextSize::new(0)) };
}

/// Splits JSON text into tokens. Whitespace, `//` line comments and a
/// leading byte order mark are trivia and never surface as tokens.
pub struct Tokenizer<'t> {
    text: &'t str,
    cursor: Cursor<'t>,
    current: Token,
}

impl<'t> Tokenizer<'t> {
    pub fn new(text: &'t str) -> Self {
        let mut tokenizer = Self { text, cursor: Cursor::new(text), current: Token::EOF };
        if tokenizer.cursor.peek() == BOM {
            tokenizer.cursor.advance();
        }
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> Token {
        self.current
    }

    pub fn text(&self, token: Token) -> &'t str {
        &self.text[token.range]
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let kind = self.syntax_kind();
        let range = self.range();
        self.cursor.reset_pos_within_token();
        std::mem::replace(&mut self.current, Token { kind, range })
    }

    fn trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n');
                }
                c if c.is_whitespace() => {
                    self.cursor.advance_while(char::is_whitespace);
                }
                _ => break,
            }
        }
        self.cursor.reset_pos_within_token();
    }

    fn syntax_kind(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() {
            return EOF;
        }

        match self.cursor.advance() {
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            ':' => COLON,
            ',' => COMMA,
            '"' => self.string(),
            '-' | '0'..='9' => self.number(),
            'A'..='Z' | 'a'..='z' => {
                self.cursor.advance_while(|c| c.is_ascii_alphanumeric());
                match &self.text[self.range()] {
                    "true" => TRUE_KW,
                    "false" => FALSE_KW,
                    "null" => NULL_KW,
                    _ => UNKNOWN,
                }
            }
            _ => UNKNOWN,
        }
    }

    /// Consumes up to and including the closing quote. An unterminated string
    /// stops at the end of the line; the parser reports it.
    fn string(&mut self) -> SyntaxKind {
        loop {
            match self.cursor.peek() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    if !matches!(self.cursor.peek(), '\n' | EOF_CHAR) {
                        self.cursor.advance();
                    }
                }
                '\n' => break,
                _ if self.cursor.is_eof() => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }
        STRING
    }

    fn number(&mut self) -> SyntaxKind {
        self.cursor.advance_while(|c| c.is_ascii_digit());
        if self.cursor.peek() == '.' {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }
        if matches!(self.cursor.peek(), 'e' | 'E') {
            self.cursor.advance();
            if matches!(self.cursor.peek(), '+' | '-') {
                self.cursor.advance();
            }
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }
        NUMBER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<(SyntaxKind, &str)> {
        let mut tokenizer = Tokenizer::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token();
            if token.kind == EOF {
                break;
            }
            tokens.push((token.kind, &text[token.range]));
        }
        tokens
    }

    #[test]
    fn punctuation_and_literals() {
        assert_eq!(
            tokens(r#"{"a": [1, -2.5e3, true, false, null]}"#),
            vec![
                (LEFT_BRACE, "{"),
                (STRING, "\"a\""),
                (COLON, ":"),
                (LEFT_BRACKET, "["),
                (NUMBER, "1"),
                (COMMA, ","),
                (NUMBER, "-2.5e3"),
                (COMMA, ","),
                (TRUE_KW, "true"),
                (COMMA, ","),
                (FALSE_KW, "false"),
                (COMMA, ","),
                (NULL_KW, "null"),
                (RIGHT_BRACKET, "]"),
                (RIGHT_BRACE, "}"),
            ]
        );
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        assert_eq!(tokens(r#""a\"b" "c""#), vec![(STRING, r#""a\"b""#), (STRING, "\"c\"")]);
    }

    #[test]
    fn comments_and_whitespace_are_trivia() {
        let text = "// leading\n  1 // trailing\n";
        let mut tokenizer = Tokenizer::new(text);

        let token = tokenizer.next_token();
        assert_eq!(token.kind, NUMBER);
        assert_eq!(tokenizer.text(token), "1");
        assert_eq!(u32::from(token.range.start()), 13);

        assert_eq!(tokenizer.next_token().kind, EOF);
    }

    #[test]
    fn leading_byte_order_mark_is_trivia() {
        let text = "\u{feff}{}";
        let mut tokenizer = Tokenizer::new(text);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, LEFT_BRACE);
        assert_eq!(u32::from(token.range.start()), 3);

        assert_eq!(
            tokens("{}\u{feff}"),
            vec![(LEFT_BRACE, "{"), (RIGHT_BRACE, "}"), (UNKNOWN, "\u{feff}")]
        );
    }

    #[test]
    fn unknown_words_and_unterminated_strings() {
        assert_eq!(tokens("nope"), vec![(UNKNOWN, "nope")]);
        assert_eq!(tokens("\"open\n1"), vec![(STRING, "\"open"), (NUMBER, "1")]);
    }
}
