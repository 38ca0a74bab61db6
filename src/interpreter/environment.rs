use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::FunctionDecl,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Bindings owned by one call frame.
#[derive(Debug, Default, Clone)]
struct Frame {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Rc<FunctionDecl>>,
    aliases:   HashMap<String, String>,
}

/// Variable, function and alias bindings as a stack of frames.
///
/// The global frame sits at the bottom and every user function call pushes
/// one frame on top of it. Lookups walk the frames from the top down to the
/// global frame, so a callee sees its own parameters, the locals of every
/// active caller and the globals. Writes always land in the top frame and are
/// discarded when it is popped.
///
/// Variables are stored by value. Function entries are shared `Rc`s.
///
/// # Example
/// ```
/// use madola::interpreter::{environment::Environment, value::core::Value};
///
/// let mut env = Environment::new();
/// env.define("x", Value::Number(1.0));
///
/// env.push_frame();
/// env.define("y", Value::Number(2.0));
/// env.push_frame();
/// assert!(env.exists("x") && env.exists("y"));
/// env.define("x", Value::Number(5.0));
/// env.pop_frame();
/// env.pop_frame();
///
/// assert!(!env.exists("y"));
/// assert_eq!(env.lookup("x"), Some(&Value::Number(1.0)));
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only an empty global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::default()] }
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Returns the frames a lookup consults, top first.
    fn visible(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev()
    }

    /// Number of frames above the global one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Pushes an empty frame for a function call.
    pub fn push_frame(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Pops the frame pushed by the matching [`Environment::push_frame`].
    ///
    /// The global frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Binds `name` in the top frame, replacing any previous binding there.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.top_mut().variables.insert(name.into(), value);
    }

    /// Looks up a variable.
    ///
    /// # Errors
    /// Returns `RuntimeError::UndefinedVariable` when no visible frame binds
    /// `name`.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<&Value> {
        self.lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Looks up a variable without raising an error.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.visible().find_map(|frame| frame.variables.get(name))
    }

    /// Returns `true` if `name` is bound in a visible frame.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Removes `name` from the top frame and returns its old value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.top_mut().variables.remove(name)
    }

    /// Registers a user function in the top frame.
    pub fn define_function(&mut self, decl: Rc<FunctionDecl>) {
        self.top_mut().functions.insert(decl.name.clone(), decl);
    }

    /// Registers a user function under a name other than its declared one.
    pub fn define_function_as(&mut self, name: impl Into<String>, decl: Rc<FunctionDecl>) {
        self.top_mut().functions.insert(name.into(), decl);
    }

    /// Looks up a user function, resolving aliases first.
    ///
    /// # Errors
    /// Returns `RuntimeError::UndefinedFunction` when the name is unknown.
    pub fn get_function(&self, name: &str, line: usize) -> EvalResult<Rc<FunctionDecl>> {
        self.lookup_function(name)
            .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                             line })
    }

    /// Like [`Environment::get_function`], but returns `None` on a miss.
    #[must_use]
    pub fn lookup_function(&self, name: &str) -> Option<Rc<FunctionDecl>> {
        let canonical = self.resolve_alias(name);
        self.visible()
            .find_map(|frame| frame.functions.get(canonical.as_str()))
            .cloned()
    }

    /// Makes `alias` refer to the function `canonical`.
    pub fn define_alias(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.top_mut().aliases.insert(alias.into(), canonical.into());
    }

    /// Returns the canonical name for `name`, or `name` itself.
    #[must_use]
    pub fn resolve_alias(&self, name: &str) -> String {
        self.visible()
            .find_map(|frame| frame.aliases.get(name))
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Merges every function visible in `other` into the top frame.
    ///
    /// Entries already present under the same name are replaced.
    pub fn copy_functions_from(&mut self, other: &Self) {
        let mut merged: Vec<(String, Rc<FunctionDecl>)> = Vec::new();
        for frame in other.visible() {
            for (name, decl) in &frame.functions {
                if !merged.iter().any(|(n, _)| n == name) {
                    merged.push((name.clone(), Rc::clone(decl)));
                }
            }
        }
        self.top_mut().functions.extend(merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;

    fn decl(name: &str) -> Rc<FunctionDecl> {
        Rc::new(FunctionDecl { name:   name.to_string(),
                               params: vec![],
                               body:   Vec::<Statement>::new(),
                               line:   1, })
    }

    #[test]
    fn callee_sees_every_active_frame() {
        let mut env = Environment::new();
        env.define("g", Value::Number(1.0));
        env.push_frame();
        env.define("local", Value::Number(2.0));
        env.push_frame();
        assert!(env.exists("g"));
        assert_eq!(env.lookup("local"), Some(&Value::Number(2.0)));
        env.pop_frame();
        env.pop_frame();
        assert!(!env.exists("local"));
        assert_eq!(env.depth(), 0);
    }

    #[test]
    fn callee_writes_shadow_and_are_discarded() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        env.push_frame();
        env.define("x", Value::Number(9.0));
        assert_eq!(env.lookup("x"), Some(&Value::Number(9.0)));
        assert_eq!(env.remove("x"), Some(Value::Number(9.0)));
        assert_eq!(env.lookup("x"), Some(&Value::Number(1.0)));
        env.pop_frame();
        assert_eq!(env.lookup("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn nested_frame_inherits_caller_functions() {
        let mut env = Environment::new();
        env.push_frame();
        env.define_function(decl("helper"));
        env.push_frame();
        assert!(env.lookup_function("helper").is_some());
        env.pop_frame();
        env.pop_frame();
        assert!(env.lookup_function("helper").is_none());
    }

    #[test]
    fn aliases_resolve_before_lookup() {
        let mut env = Environment::new();
        env.define_function(decl("area"));
        env.define_alias("a", "area");
        assert_eq!(env.get_function("a", 1).unwrap().name, "area");
        assert!(env.get_function("b", 1).is_err());
    }

    #[test]
    fn copy_functions_merges_into_top_frame() {
        let mut module = Environment::new();
        module.define_function(decl("f"));
        let mut env = Environment::new();
        env.copy_functions_from(&module);
        assert!(env.lookup_function("f").is_some());
    }
}
