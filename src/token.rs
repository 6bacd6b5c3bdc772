//! The token model: a closed set of [TokenKind]s plus the (kind, literal)
//! pairs the lexer yields. [Token] pairs a [TokenKind] with the actual
//! source text that produced it.

/// Every kind of token Sloth's lexer can produce: structural, classes,
/// operators, delimiters, keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum TokenKind {
    // Structural
    Eof, Illegal,

    // Classes
    Ident, Int, StringLit,

    // Operators
    Assign, Plus, Minus, Asterisk, Slash, Bang,
    Gt, Lt, Eq, NotEq,

    // Delimiters
    Semicolon, Comma,
    LParen, RParen, LBrace, RBrace,

    // Keywords
    Var, Func, Return, If, Else, True, False,
}

/// A single token: its [TokenKind] plus the literal text that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    /// Builds an [Ident][TokenKind::Ident] token, or the matching keyword
    /// token if `word` is one of Sloth's reserved words.
    pub fn from_word(word: &str) -> Self {
        let kind = lookup_keyword(word).unwrap_or(TokenKind::Ident);
        Token::new(kind, word)
    }
}

/// Looks up `word` in the keyword table. Returns `None` for plain identifiers.
fn lookup_keyword(word: &str) -> Option<TokenKind> {
    match word {
        "var" => Some(TokenKind::Var),
        "func" => Some(TokenKind::Func),
        "return" => Some(TokenKind::Return),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keywords_resolve_to_their_own_kind() {
        assert_eq!(TokenKind::Var, Token::from_word("var").kind);
        assert_eq!(TokenKind::Func, Token::from_word("func").kind);
        assert_eq!(TokenKind::Return, Token::from_word("return").kind);
        assert_eq!(TokenKind::If, Token::from_word("if").kind);
        assert_eq!(TokenKind::Else, Token::from_word("else").kind);
        assert_eq!(TokenKind::True, Token::from_word("true").kind);
        assert_eq!(TokenKind::False, Token::from_word("false").kind);
    }

    #[test]
    fn non_keywords_are_identifiers() {
        assert_eq!(TokenKind::Ident, Token::from_word("x").kind);
        assert_eq!(TokenKind::Ident, Token::from_word("variable").kind);
        assert_eq!(TokenKind::Ident, Token::from_word("_private").kind);
    }
}
