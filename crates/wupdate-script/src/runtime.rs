use std::collections::HashMap;

use crate::text::{strip_quotes, trim};

/// Variable written by `COMPARE`.
pub const FLAGS: &str = "FLAGS";

/// Per-run variable store.
///
/// All values are strings and all names are global to the run. Created empty
/// and discarded when the run ends.
#[derive(Debug, Default)]
pub struct Runtime {
    variables: HashMap<String, String>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The stored value of `token` if it names a variable, else `token` itself.
    ///
    /// Single level: a resolved value is never looked up again.
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.get(token).unwrap_or(token)
    }

    /// Evaluate an `IF` condition of the form `<name> == <literal>`.
    ///
    /// The left side is resolved, the right side is only unquoted. A
    /// condition without `==` is false.
    pub fn condition_holds(&self, condition: &str) -> bool {
        match condition.split_once("==") {
            Some((left, right)) => self.resolve(trim(left)) == strip_quotes(trim(right)),
            None => false,
        }
    }

    /// Run a `COMPARE`: both sides are resolved, the right side after
    /// unquoting. Stores `"true"`/`"false"` in [`FLAGS`] and returns the result.
    pub fn compare(&mut self, left: &str, right: &str) -> bool {
        let equal = self.resolve(trim(left)) == self.resolve(strip_quotes(trim(right)));
        self.set(FLAGS, if equal { "true" } else { "false" });
        equal
    }

    /// Run a `SET`: the name is used literally, the value is unquoted then resolved.
    pub fn assign(&mut self, name: &str, value: &str) {
        let value = self.resolve(strip_quotes(trim(value))).to_string();
        self.set(trim(name), value);
    }
}
