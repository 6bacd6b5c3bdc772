//! Lexically scoped environments: a name-to-[Value] map chained to an
//! optional outer scope.
//!
//! `Environment` is a cheap-to-clone handle (`Rc<RefCell<..>>`) so a
//! [crate::value::FunctionValue] can capture the scope it was defined in
//! without fighting the borrow checker, and multiple functions may share
//! the same captured environment.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;

struct EnvironmentData {
    store: HashMap<String, Value>,
    outer: Option<Environment>,
}

/// A scope handle. Cloning an [Environment] clones the handle, not the
/// underlying map — both handles still refer to the same scope.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<EnvironmentData>>);

impl fmt::Debug for Environment {
    // Not derived: printing would walk the whole outer chain and every
    // bound value, which is rarely what you want from a `{:?}` of a
    // Function value. A scope is opaque for debugging purposes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}

impl Environment {
    /// Creates a fresh, top-level environment with no outer scope.
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(EnvironmentData {
            store: HashMap::new(),
            outer: None,
        })))
    }

    /// Creates a new scope nested inside `outer`. Used at call boundaries
    /// and for each evaluated block.
    pub fn enclosed_by(outer: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(EnvironmentData {
            store: HashMap::new(),
            outer: Some(outer.clone()),
        })))
    }

    /// Looks up `name`, walking the outer chain. `None` if unbound anywhere.
    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        match data.store.get(name) {
            Some(value) => Some(value.clone()),
            None => data.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Binds `name` to `value` in *this* scope — the innermost one.
    /// Assignment always writes to the innermost scope: a second `var`
    /// with the same name in the same scope silently overwrites the first.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().store.insert(name.into(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_walks_outer_chain() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(1));

        let inner = Environment::enclosed_by(&outer);
        assert_eq!(Some(Value::Integer(1)), inner.get("x"));
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(1));

        let inner = Environment::enclosed_by(&outer);
        inner.set("x", Value::Integer(2));

        assert_eq!(Some(Value::Integer(2)), inner.get("x"));
        assert_eq!(Some(Value::Integer(1)), outer.get("x"));
    }

    #[test]
    fn unbound_name_is_none() {
        let env = Environment::new();
        assert_eq!(None, env.get("missing"));
    }

    #[test]
    fn rebinding_in_same_scope_overwrites() {
        let env = Environment::new();
        env.set("x", Value::Integer(1));
        env.set("x", Value::Integer(2));
        assert_eq!(Some(Value::Integer(2)), env.get("x"));
    }

    #[test]
    fn shared_handle_sees_writes_from_either_clone() {
        let env = Environment::new();
        let handle = env.clone();
        handle.set("x", Value::Integer(42));
        assert_eq!(Some(Value::Integer(42)), env.get("x"));
    }
}
