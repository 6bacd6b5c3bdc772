//! The abstract syntax tree: a closed set of [Statement]/[Expression]
//! variants, plus [std::fmt::Display] impls that pretty-print expressions
//! fully parenthesized, which makes precedence checkable as plain string
//! equality instead of by inspecting tree shape.

use std::fmt;

/// An ordered sequence of top-level statements — the root of every parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A braced sequence of statements sharing the enclosing environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

/// One of Sloth's four statement forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var <name> = <value>;`
    Var { name: String, value: Expression },
    /// `return <expression>;`
    Return(Expression),
    /// A bare expression used as a statement.
    Expression(Expression),
    /// `{ ... }`
    Block(BlockStatement),
}

/// One of Sloth's nine expression forms. Operators are stored as their
/// literal surface text (e.g. `"+"`, `"!"`) so pretty-printing can reproduce
/// them without a separate lookup table.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    StringLiteral(String),
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    IfElse {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function {
        parameters: Vec<String>,
        body: BlockStatement,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Var { name, value } => write!(f, "var {name} = {value};"),
            Statement::Return(expr) => write!(f, "return {expr};"),
            Statement::Expression(expr) => write!(f, "{expr}"),
            Statement::Block(block) => write!(f, "{{{block}}}"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{name}"),
            Expression::IntegerLiteral(value) => write!(f, "{value}"),
            Expression::BooleanLiteral(value) => write!(f, "{value}"),
            Expression::StringLiteral(value) => write!(f, "{value}"),
            Expression::Prefix { operator, right } => write!(f, "({operator}{right})"),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Expression::IfElse {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{condition} {{{consequence}}}")?;
                if let Some(alt) = alternative {
                    write!(f, " else {{{alt}}}")?;
                }
                Ok(())
            }
            Expression::Function { parameters, body } => {
                write!(f, "func({}) {{{body}}}", parameters.join(", "))
            }
            Expression::Call { callee, arguments } => {
                let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "{callee}({})", args.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn boxed(expr: Expression) -> Box<Expression> {
        Box::new(expr)
    }

    #[test]
    fn infix_is_fully_parenthesized() {
        let expr = Expression::Infix {
            operator: "+".into(),
            left: boxed(Expression::Identifier("a".into())),
            right: boxed(Expression::Identifier("b".into())),
        };
        assert_eq!("(a + b)", expr.to_string());
    }

    #[test]
    fn prefix_wraps_operand() {
        let expr = Expression::Prefix {
            operator: "-".into(),
            right: boxed(Expression::Identifier("a".into())),
        };
        assert_eq!("(-a)", expr.to_string());
    }

    #[test]
    fn nested_infix_shows_structure() {
        // -a * b
        let expr = Expression::Infix {
            operator: "*".into(),
            left: boxed(Expression::Prefix {
                operator: "-".into(),
                right: boxed(Expression::Identifier("a".into())),
            }),
            right: boxed(Expression::Identifier("b".into())),
        };
        assert_eq!("((-a) * b)", expr.to_string());
    }
}
