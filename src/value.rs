//! Runtime values: the closed sum type [Value] the evaluator produces, plus
//! the canonical `TRUE`/`FALSE`/`NULL` singletons.

use std::fmt;
use std::rc::Rc;

use crate::ast::BlockStatement;
use crate::environment::Environment;

/// A function value: its parameter names, its body, and the [Environment]
/// it closed over at the point it was defined (lexical scoping).
///
/// Wrapped in [Rc] so cloning a [Value::Function] (which happens every time
/// a closure is looked up or passed around) is a pointer bump, not a deep
/// copy of the body AST.
#[derive(Debug)]
pub struct FunctionValue {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Environment,
}

/// The runtime value model: a closed sum of every shape a Sloth expression
/// can evaluate to.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Function(Rc<FunctionValue>),
    /// A first-class runtime error. Never an operand of further evaluation
    /// — callers must check for it and short-circuit.
    Fault(String),
}

/// Canonical `true`. Two booleans both evaluate to this value, so equality
/// comparisons double as identity comparisons.
pub const TRUE: Value = Value::Boolean(true);
/// Canonical `false`.
pub const FALSE: Value = Value::Boolean(false);
/// Canonical null.
pub const NULL: Value = Value::Null;

impl Value {
    /// Wraps a native `bool` into the canonical [TRUE]/[FALSE].
    pub fn from_bool(native: bool) -> Value {
        if native {
            TRUE
        } else {
            FALSE
        }
    }

    /// The short type name used in fault messages like `"INTEGER and
    /// STRING combination not supported"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::String(_) => "STRING",
            Value::Function(_) => "FUNCTION",
            Value::Fault(_) => "FAULT",
        }
    }

    /// Truthiness used by `if` and logical contexts: only `FALSE`, `NULL`,
    /// and `Integer(0)` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null | Value::Integer(0))
    }

    /// The REPL collaborator's Inspect format. Implemented here because it
    /// is part of the value model's public contract, even though the REPL
    /// itself is out of scope.
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => if *b { "True" } else { "False" }.to_string(),
            Value::Null => "Null".to_string(),
            Value::String(s) => s.clone(),
            Value::Function(func) => {
                format!("func({}) {{{}}}", func.parameters.join(", "), func.body)
            }
            Value::Fault(_) => "Fault".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Fault(a), Value::Fault(b)) => a == b,
            _ => false,
        }
    }
}
