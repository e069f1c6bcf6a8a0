#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    LEFT_BRACE,
    RIGHT_BRACE,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    COLON,
    COMMA,

    STRING,
    NUMBER,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,

    UNKNOWN,
    EOF,
}

impl SyntaxKind {
    pub fn describe(self) -> &'static str {
        match self {
            Self::LEFT_BRACE => "`{`",
            Self::RIGHT_BRACE => "`}`",
            Self::LEFT_BRACKET => "`[`",
            Self::RIGHT_BRACKET => "`]`",
            Self::COLON => "`:`",
            Self::COMMA => "`,`",
            Self::STRING => "string",
            Self::NUMBER => "number",
            Self::TRUE_KW => "`true`",
            Self::FALSE_KW => "`false`",
            Self::NULL_KW => "`null`",
            Self::UNKNOWN => "unknown token",
            Self::EOF => "end of input",
        }
    }
}
