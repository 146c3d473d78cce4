use std::collections::HashMap;
use crate::language::interpreter::value::Value;

/// Variable store of one interpreter.
///
/// Values and the keyword each name was declared with are kept side by side; entries
/// are added and updated but never removed.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    declarators: HashMap<String, String>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Keyword used to declare `name`; `None` for names first bound by assignment.
    pub fn declarator(&self, name: &str) -> Option<&str> {
        self.declarators.get(name).map(String::as_str)
    }

    pub fn is_immutable(&self, name: &str) -> bool {
        self.declarator(name) == Some("const")
    }

    // These functions don't check mutability or types;
    // it is assumed that this was already done by the interpreter
    pub fn declare(&mut self, name: &str, keyword: &str, value: Value) {
        self.declarators.insert(name.to_owned(), keyword.to_owned());
        self.values.insert(name.to_owned(), value);
    }

    pub fn assign(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
