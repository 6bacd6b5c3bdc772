//! The tree-walking evaluator: `evaluate(node, env) -> Value`, with
//! non-local control flow for `return` and faults modeled as a [Signal]
//! rather than host exceptions.

use std::rc::Rc;

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::environment::Environment;
use crate::value::{FunctionValue, Value, NULL};

/// The result of evaluating one statement: either a plain value, an
/// in-flight `return` unwinding toward the nearest function boundary, or a
/// fault unwinding toward the nearest statement sequence.
enum Signal {
    Normal(Value),
    Return(Value),
    Fault(Value),
}

impl Signal {
    /// Unwraps any variant down to its carried [Value]. Used at the two
    /// places a signal gets absorbed: the top-level program and a
    /// function call boundary.
    fn into_value(self) -> Value {
        match self {
            Signal::Normal(v) | Signal::Return(v) | Signal::Fault(v) => v,
        }
    }

    fn is_normal(&self) -> bool {
        matches!(self, Signal::Normal(_))
    }
}

fn fault(message: impl Into<String>) -> Signal {
    let message = message.into();
    log::warn!("fault: {message}");
    Signal::Fault(Value::Fault(message))
}

/// Evaluates a whole [Program]: statements run in order, and the overall
/// result is whatever value the last one's signal carries — `return` or a
/// `Fault` at the top level simply becomes the program's result, since
/// there is no enclosing function to catch them.
pub fn evaluate_program(program: &Program, env: &Environment) -> Value {
    eval_statements(&program.statements, env).into_value()
}

/// Evaluates a sequence of statements sharing `env`, short-circuiting as
/// soon as a statement's signal is not [Signal::Normal] — subsequent
/// statements in that sequence are not executed.
fn eval_statements(statements: &[Statement], env: &Environment) -> Signal {
    let mut result = Signal::Normal(NULL);
    for statement in statements {
        result = eval_statement(statement, env);
        if !result.is_normal() {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Environment) -> Signal {
    match statement {
        Statement::Var { name, value } => {
            let signal = eval_expression(value, env);
            match signal {
                Signal::Normal(v) => {
                    env.set(name.clone(), v);
                    Signal::Normal(NULL)
                }
                other => other,
            }
        }
        Statement::Return(expr) => match eval_expression(expr, env) {
            Signal::Normal(v) => Signal::Return(v),
            other => other,
        },
        Statement::Expression(expr) => eval_expression(expr, env),
        // A block statement shares the enclosing environment — it is not
        // a new scope, unlike a function call.
        Statement::Block(block) => eval_statements(&block.statements, env),
    }
}

fn eval_expression(expr: &Expression, env: &Environment) -> Signal {
    match expr {
        Expression::Identifier(name) => match env.get(name) {
            Some(v) => Signal::Normal(v),
            None => fault(format!("name {name} is not defined")),
        },
        Expression::IntegerLiteral(n) => Signal::Normal(Value::Integer(*n)),
        Expression::BooleanLiteral(b) => Signal::Normal(Value::from_bool(*b)),
        Expression::StringLiteral(s) => Signal::Normal(Value::String(s.clone())),
        Expression::Prefix { operator, right } => eval_prefix(operator, right, env),
        Expression::Infix {
            operator,
            left,
            right,
        } => eval_infix(operator, left, right, env),
        Expression::IfElse {
            condition,
            consequence,
            alternative,
        } => eval_if_else(condition, consequence, alternative.as_ref(), env),
        Expression::Function { parameters, body } => Signal::Normal(Value::Function(Rc::new(
            FunctionValue {
                parameters: parameters.clone(),
                body: body.clone(),
                env: env.clone(),
            },
        ))),
        Expression::Call { callee, arguments } => eval_call(callee, arguments, env),
    }
}

//////////////////////////////////////////// Prefix operators ///////////////////////////////////////////

fn eval_prefix(operator: &str, right: &Expression, env: &Environment) -> Signal {
    let right = match eval_expression(right, env) {
        Signal::Normal(v) => v,
        other => return other,
    };

    let value = match operator {
        "!" => eval_bang(&right),
        "-" => eval_minus(&right),
        other => return fault(format!("unsupported prefix operator \"{other}\"")),
    };
    Signal::Normal(value)
}

fn eval_bang(value: &Value) -> Value {
    match value {
        Value::Boolean(true) => Value::from_bool(false),
        Value::Boolean(false) => Value::from_bool(true),
        Value::Integer(_) => Value::from_bool(false),
        Value::Null => Value::from_bool(true),
        _ => NULL,
    }
}

fn eval_minus(value: &Value) -> Value {
    match value {
        Value::Integer(n) => Value::Integer(-n),
        _ => NULL,
    }
}

//////////////////////////////////////////// Infix operators ////////////////////////////////////////////

fn eval_infix(operator: &str, left: &Expression, right: &Expression, env: &Environment) -> Signal {
    let left = match eval_expression(left, env) {
        Signal::Normal(v) => v,
        other => return other,
    };
    let right = match eval_expression(right, env) {
        Signal::Normal(v) => v,
        other => return other,
    };

    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => eval_integer_infix(operator, *a, *b),
        (Value::Boolean(a), Value::Boolean(b)) => eval_boolean_infix(operator, *a, *b),
        (Value::String(a), Value::String(b)) => eval_string_infix(operator, a, b),
        _ => fault(format!(
            "{} and {} combination not supported",
            left.type_name(),
            right.type_name()
        )),
    }
}

fn eval_integer_infix(operator: &str, a: i64, b: i64) -> Signal {
    let value = match operator {
        "+" => Value::Integer(a.wrapping_add(b)),
        "-" => Value::Integer(a.wrapping_sub(b)),
        "*" => Value::Integer(a.wrapping_mul(b)),
        "/" => {
            if b == 0 {
                return fault("can not divide by zero");
            }
            // i64::MIN / -1 overflows and panics on the native `/`; wrap
            // it like every other integer operator here does.
            Value::Integer(a.wrapping_div(b))
        }
        "==" => Value::from_bool(a == b),
        "!=" => Value::from_bool(a != b),
        "<" => Value::from_bool(a < b),
        ">" => Value::from_bool(a > b),
        other => return fault(format!("operator \"{other}\" for INTEGER is not supported")),
    };
    Signal::Normal(value)
}

fn eval_boolean_infix(operator: &str, a: bool, b: bool) -> Signal {
    let value = match operator {
        "==" => Value::from_bool(a == b),
        "!=" => Value::from_bool(a != b),
        other => return fault(format!("operator \"{other}\" for BOOLEAN is not supported")),
    };
    Signal::Normal(value)
}

fn eval_string_infix(operator: &str, a: &str, b: &str) -> Signal {
    match operator {
        "+" => Signal::Normal(Value::String(format!("{a}{b}"))),
        other => fault(format!("operator \"{other}\" for STRING is not supported")),
    }
}

//////////////////////////////////////////// If/else ///////////////////////////////////////////

fn eval_if_else(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: &Environment,
) -> Signal {
    let condition = match eval_expression(condition, env) {
        Signal::Normal(v) => v,
        other => return other,
    };

    if condition.is_truthy() {
        eval_statements(&consequence.statements, env)
    } else if let Some(alternative) = alternative {
        eval_statements(&alternative.statements, env)
    } else {
        Signal::Normal(NULL)
    }
}

//////////////////////////////////////////// Calls ////////////////////////////////////////////

fn eval_call(callee: &Expression, arguments: &[Expression], env: &Environment) -> Signal {
    let function = match eval_expression(callee, env) {
        Signal::Normal(Value::Function(f)) => f,
        Signal::Normal(other) => {
            return fault(format!("{} is not a function", other.type_name()))
        }
        other => return other,
    };

    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        match eval_expression(argument, env) {
            Signal::Normal(v) => args.push(v),
            other => return other,
        }
    }

    if args.len() != function.parameters.len() {
        return fault(format!(
            "arguments passed {}, expected {}",
            args.len(),
            function.parameters.len()
        ));
    }

    // New environment whose outer link is the function's *captured*
    // environment, not the caller's — this is what makes closures lexical
    // rather than dynamic.
    let call_env = Environment::enclosed_by(&function.env);
    for (name, value) in function.parameters.iter().zip(args) {
        call_env.set(name.clone(), value);
    }

    match eval_statements(&function.body.statements, &call_env) {
        // The call boundary is where a `Return` signal stops propagating:
        // it becomes the call's ordinary result.
        Signal::Return(v) | Signal::Normal(v) => Signal::Normal(v),
        fault_signal @ Signal::Fault(_) => fault_signal,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;

    fn eval(source: &str) -> Value {
        let mut parser = Parser::new(source);
        let program = parser.parse_program();
        assert!(
            parser.errors().is_empty(),
            "unexpected parse errors for {source:?}: {:?}",
            parser.errors()
        );
        evaluate_program(&program, &Environment::new())
    }

    #[test]
    fn integer_arithmetic() {
        assert_eq!(Value::Integer(5), eval("5"));
        assert_eq!(Value::Integer(-10), eval("-10"));
        assert_eq!(Value::Integer(5), eval("(5 + 5) / 2"));
    }

    #[test]
    fn double_bang_booleans() {
        assert_eq!(Value::from_bool(true), eval("!!true"));
    }

    #[test]
    fn division_by_zero_is_a_fault() {
        assert!(matches!(eval("5 / 0"), Value::Fault(_)));
    }

    #[test]
    fn arithmetic_overflow_wraps_instead_of_panicking() {
        // The lexer only ever produces positive integer literals (`-` is a
        // prefix operator), and `i64::MIN`'s magnitude does not fit in an
        // `i64` literal, so it is built here via `-i64::MAX - 1` instead of
        // writing its decimal form directly.
        assert_eq!(
            Value::Integer(i64::MIN),
            eval(&format!("{} + 1", i64::MAX))
        );
        assert_eq!(
            Value::Integer(i64::MIN),
            eval(&format!("(-{} - 1) / -1", i64::MAX))
        );
    }

    #[test]
    fn if_else_picks_the_truthy_branch() {
        assert_eq!(Value::Integer(10), eval("if (5 > 2) {10} else {5}"));
        assert_eq!(Value::Integer(5), eval("if (0) {10} else {5}"));
    }

    #[test]
    fn return_short_circuits_the_rest_of_a_sequence() {
        assert_eq!(
            Value::Integer(10),
            eval("3 * 3 * 3; return 10; 8 * 8 * 8;")
        );
    }

    #[test]
    fn return_propagates_through_nested_blocks_to_the_top() {
        assert_eq!(
            Value::Integer(10),
            eval("if (10 > 1) { if (10 > 1) { return 10; } return 1; }")
        );
    }

    #[test]
    fn var_then_identifier() {
        assert_eq!(Value::Integer(10), eval("var x = 5; var y = x + 5; y"));
    }

    #[test]
    fn function_call() {
        assert_eq!(
            Value::Integer(5),
            eval("var add = func(a,b){ return a+b }; add(2,3)")
        );
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            Value::String("Hello World".to_string()),
            eval(r#""Hello " + "World""#)
        );
    }

    #[test]
    fn undefined_identifier_is_a_fault() {
        assert!(matches!(eval("foo"), Value::Fault(_)));
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        assert_eq!(
            Value::Integer(5),
            eval("var a = func(x){ func(y){ x + y } }; a(2)(3)")
        );
    }

    #[test]
    fn wrong_arity_is_a_fault() {
        assert!(matches!(
            eval("var f = func(a, b) { a + b }; f(1)"),
            Value::Fault(_)
        ));
    }

    #[test]
    fn calling_a_non_function_is_a_fault() {
        assert!(matches!(eval("var x = 5; x()"), Value::Fault(_)));
    }

    #[test]
    fn mismatched_operand_kinds_fault() {
        assert!(matches!(eval(r#"5 + "hi""#), Value::Fault(_)));
    }

    #[test]
    fn unsupported_boolean_operator_faults() {
        assert!(matches!(eval("true + false"), Value::Fault(_)));
    }

    #[test]
    fn rebinding_via_var_overwrites_silently() {
        assert_eq!(Value::Integer(2), eval("var x = 1; var x = 2; x"));
    }

    #[test]
    fn bang_on_any_integer_including_zero_is_false() {
        assert_eq!(Value::from_bool(false), eval("!0"));
        assert_eq!(Value::from_bool(false), eval("!5"));
    }
}
