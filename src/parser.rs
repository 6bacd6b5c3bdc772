//! The Pratt parser: turns a [Lexer]'s token stream into a [Program] AST.
//!
//! Built around a precedence table and a `get_rule`-style prefix/infix
//! dispatch, but never panics or raises to its caller: every failure to
//! parse something pushes a message onto `self.errors` and returns `None`
//! instead.

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Precedence levels, ascending.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // unary - !
    Call,        // f(...)
}

fn precedence_of(kind: TokenKind) -> Precedence {
    use TokenKind::*;
    match kind {
        Eq | NotEq => Precedence::Equals,
        Lt | Gt => Precedence::LessGreater,
        Plus | Minus => Precedence::Sum,
        Asterisk | Slash => Precedence::Product,
        LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// A two-token-window Pratt parser over a [Lexer].
pub struct Parser {
    lexer: Lexer,
    current: Token,
    current_line: usize,
    peek: Token,
    peek_line: usize,
    errors: Vec<String>,
}

impl Parser {
    /// Primes `current`/`peek` by pulling twice from the lexer.
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let current_line = lexer.line();
        let peek = lexer.next_token();
        let peek_line = lexer.line();

        Parser {
            lexer,
            current,
            current_line,
            peek,
            peek_line,
            errors: Vec::new(),
        }
    }

    /// Parses a whole program: every statement up to [TokenKind::Eof].
    /// Never fails outright — see [Parser::errors] for diagnostics.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while self.current.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.advance();
        }
        program
    }

    /// The parser's accumulated diagnostics. Non-empty means "do not
    /// evaluate this program".
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.peek);
        self.current_line = self.peek_line;
        self.peek = self.lexer.next_token();
        self.peek_line = self.lexer.line();
    }

    fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("[line {}] {message}", self.current_line);
        self.errors.push(format!("[line {}] {message}", self.current_line));
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.advance();
            true
        } else {
            self.push_error(format!(
                "expected next token to be {kind:?}, got {:?} instead",
                self.peek.kind
            ));
            false
        }
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }
    }

    //////////////////////////////////////////// Statements ///////////////////////////////////////////

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Var => self.parse_var_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_var_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current.literal.clone();

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Var { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Some(Statement::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Some(Statement::Expression(expr))
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let mut block = BlockStatement::default();
        self.advance(); // consume '{'

        while self.current.kind != TokenKind::RBrace && self.current.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                block.statements.push(statement);
            }
            self.advance();
        }

        block
    }

    //////////////////////////////////////////// Expressions //////////////////////////////////////////

    /// The Pratt core: parse a prefix, then repeatedly fold in infix
    /// operators whose precedence exceeds `min_precedence`.
    fn parse_expression(&mut self, min_precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while self.current.kind != TokenKind::Semicolon
            && min_precedence < precedence_of(self.peek.kind)
        {
            if !has_infix(self.peek.kind) {
                return Some(left);
            }
            self.advance();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Ident => Some(Expression::Identifier(self.current.literal.clone())),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::StringLit => Some(Expression::StringLiteral(self.current.literal.clone())),
            TokenKind::True => Some(Expression::BooleanLiteral(true)),
            TokenKind::False => Some(Expression::BooleanLiteral(false)),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Func => self.parse_function_literal(),
            other => {
                self.push_error(format!("no prefix parser for {other:?}"));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        if self.current.kind == TokenKind::LParen {
            return self.parse_call_expression(left);
        }
        self.parse_infix_expression(left)
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.current.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(value)),
            Err(_) => {
                self.push_error(format!("could not parse {:?} as integer", self.current.literal));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = self.current.literal.clone();
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = self.current.literal.clone();
        let precedence = precedence_of(self.current.kind);
        self.advance();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek.kind == TokenKind::Else {
            self.advance();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::IfElse {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function { parameters, body })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut parameters = Vec::new();

        if self.peek.kind == TokenKind::RParen {
            self.advance();
            return Some(parameters);
        }

        self.advance();
        if self.current.kind != TokenKind::Ident {
            self.push_error(format!(
                "expected parameter name, got {:?} instead",
                self.current.kind
            ));
            return None;
        }
        parameters.push(self.current.literal.clone());

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            if self.current.kind != TokenKind::Ident {
                self.push_error(format!(
                    "expected parameter name, got {:?} instead",
                    self.current.kind
                ));
                return None;
            }
            parameters.push(self.current.literal.clone());
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(parameters)
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call {
            callee: Box::new(callee),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();

        if self.peek.kind == TokenKind::RParen {
            self.advance();
            return Some(arguments);
        }

        self.advance();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(arguments)
    }
}

fn has_infix(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        Eq | NotEq | Lt | Gt | Plus | Minus | Asterisk | Slash | LParen
    )
}
