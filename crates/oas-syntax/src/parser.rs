use oas_span::{LineIndex, SourceSpan};
use serde_json::Number;
use text_size::{TextRange, TextSize};

use crate::SyntaxKind::{self, *};
use crate::ast::{Content, Entry, Key, Node, Scalar};
use crate::tokenizer::{Token, Tokenizer};

/// Containers nested deeper than this are rejected, which bounds the
/// recursion of every later pass over the tree.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    range: TextRange,
}

impl ParseError {
    fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }
}

/// Parses a JSON document into a [`Node`] tree.
pub fn parse(text: &str) -> Result<Node, ParseError> {
    let mut parser = Parser::new(text);
    let root = parser.value()?;
    let token = parser.tokens.peek();
    if token.kind != EOF {
        return Err(parser.unexpected(token, "end of input"));
    }
    Ok(root)
}

struct Parser<'t> {
    tokens: Tokenizer<'t>,
    index: LineIndex,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn new(text: &'t str) -> Self {
        Self { tokens: Tokenizer::new(text), index: LineIndex::new(text), depth: 0 }
    }

    fn span(&self, range: TextRange) -> SourceSpan {
        SourceSpan::from_range(&self.index, range)
    }

    fn node(&self, content: Content, range: TextRange) -> Node {
        Node::new(content, range, self.span(range))
    }

    fn unexpected(&self, token: Token, expected: &str) -> ParseError {
        let found = match token.kind {
            UNKNOWN => format!("`{}`", self.tokens.text(token)),
            kind => kind.describe().to_owned(),
        };
        ParseError::new(format!("expected {expected}, found {found}"), token.range)
    }

    fn expect(&mut self, kind: SyntaxKind) -> Result<Token, ParseError> {
        let token = self.tokens.peek();
        if token.kind != kind {
            return Err(self.unexpected(token, kind.describe()));
        }
        Ok(self.tokens.next_token())
    }

    fn value(&mut self) -> Result<Node, ParseError> {
        let token = self.tokens.peek();
        let scalar = match token.kind {
            LEFT_BRACE => return self.mapping(),
            LEFT_BRACKET => return self.sequence(),
            STRING => Scalar::String(self.string(token)?),
            NUMBER => Scalar::Number(self.number(token)?),
            TRUE_KW => Scalar::Bool(true),
            FALSE_KW => Scalar::Bool(false),
            NULL_KW => Scalar::Null,
            _ => return Err(self.unexpected(token, "a value")),
        };
        self.tokens.next_token();
        Ok(self.node(Content::Scalar(scalar), token.range))
    }

    fn enter(&mut self, open: Token) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::new(
                format!("nesting deeper than {MAX_DEPTH} levels"),
                open.range,
            ));
        }
        self.tokens.next_token();
        Ok(())
    }

    fn mapping(&mut self) -> Result<Node, ParseError> {
        let open = self.tokens.peek();
        self.enter(open)?;

        let mut entries = Vec::new();
        if self.tokens.peek().kind != RIGHT_BRACE {
            loop {
                let token = self.tokens.peek();
                if token.kind != STRING {
                    return Err(self.unexpected(token, "a string key"));
                }
                let text = self.string(token)?;
                self.tokens.next_token();
                let key = Key::new(text, token.range, self.span(token.range));

                self.expect(COLON)?;
                let value = self.value()?;
                entries.push(Entry { key, value });

                let token = self.tokens.peek();
                match token.kind {
                    COMMA => {
                        self.tokens.next_token();
                    }
                    RIGHT_BRACE => break,
                    _ => return Err(self.unexpected(token, "`,` or `}`")),
                }
            }
        }

        let close = self.expect(RIGHT_BRACE)?;
        self.depth -= 1;
        let range = TextRange::new(open.range.start(), close.range.end());
        Ok(self.node(Content::Mapping(entries), range))
    }

    fn sequence(&mut self) -> Result<Node, ParseError> {
        let open = self.tokens.peek();
        self.enter(open)?;

        let mut items = Vec::new();
        if self.tokens.peek().kind != RIGHT_BRACKET {
            loop {
                items.push(self.value()?);
                let token = self.tokens.peek();
                match token.kind {
                    COMMA => {
                        self.tokens.next_token();
                    }
                    RIGHT_BRACKET => break,
                    _ => return Err(self.unexpected(token, "`,` or `]`")),
                }
            }
        }

        let close = self.expect(RIGHT_BRACKET)?;
        self.depth -= 1;
        let range = TextRange::new(open.range.start(), close.range.end());
        Ok(self.node(Content::Sequence(items), range))
    }

    fn string(&self, token: Token) -> Result<String, ParseError> {
        let raw = self.tokens.text(token);
        if raw.len() < 2 || !raw.ends_with('"') || !closes(raw) {
            return Err(ParseError::new("unterminated string", token.range));
        }
        unescape(&raw[1..raw.len() - 1], token.range.start() + TextSize::new(1))
    }

    fn number(&self, token: Token) -> Result<Number, ParseError> {
        let text = self.tokens.text(token);
        if !is_json_number(text) {
            return Err(ParseError::new(format!("invalid number `{text}`"), token.range));
        }
        if !text.contains(['.', 'e', 'E']) {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(Number::from(value));
            }
            if let Ok(value) = text.parse::<u64>() {
                return Ok(Number::from(value));
            }
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .ok_or_else(|| ParseError::new(format!("number `{text}` is out of range"), token.range))
    }
}

/// Whether the closing quote of `raw` is real rather than escaped.
fn closes(raw: &str) -> bool {
    let body = &raw[1..raw.len() - 1];
    let backslashes = body.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 0
}

fn is_json_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = usize::from(bytes.first() == Some(&b'-'));

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let int_len = pos - int_start;
    if int_len == 0 || (int_len > 1 && bytes[int_start] == b'0') {
        return false;
    }

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        if pos == start {
            return false;
        }
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        if pos == start {
            return false;
        }
    }

    pos == bytes.len()
}

/// Decodes the escapes of a string body starting at `offset` in the text.
fn unescape(body: &str, offset: TextSize) -> Result<String, ParseError> {
    let error = |message: &str, at: usize, len: usize| {
        let start = offset + TextSize::new(at as u32);
        ParseError::new(message, TextRange::at(start, TextSize::new(len as u32)))
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((at, c)) = chars.next() {
        match c {
            '\\' => {}
            c if c < '\u{20}' => return Err(error("control character in string", at, 1)),
            c => {
                out.push(c);
                continue;
            }
        }

        let Some((_, escape)) = chars.next() else {
            return Err(error("unterminated escape", at, 1));
        };
        let decoded = match escape {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                let high = hex4(body, at + 2).ok_or_else(|| error("invalid unicode escape", at, 2))?;
                skip(&mut chars, 4);
                let code = if (0xD800..0xDC00).contains(&high) {
                    let low = body
                        .get(at + 6..at + 8)
                        .filter(|prefix| *prefix == "\\u")
                        .and_then(|_| hex4(body, at + 8))
                        .filter(|low| (0xDC00..0xE000).contains(low))
                        .ok_or_else(|| error("unpaired surrogate", at, 6))?;
                    skip(&mut chars, 6);
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                char::from_u32(code).ok_or_else(|| error("unpaired surrogate", at, 6))?
            }
            other => return Err(error("invalid escape", at, 1 + other.len_utf8())),
        };
        out.push(decoded);
    }
    Ok(out)
}

fn hex4(body: &str, at: usize) -> Option<u32> {
    let digits = body.get(at..at + 4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn skip(chars: &mut std::str::CharIndices<'_>, n: usize) {
    for _ in 0..n {
        chars.next();
    }
}
