//! Explicit execution context for external commands

use std::collections::BTreeMap;

/// Environment context in which collaborator commands run
///
/// Holds the variables (for example the session rc file) that select the
/// project and computational region a command operates on. Separate source
/// and target contexts are passed explicitly instead of being read from
/// process-global state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    name: String,
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Create an empty context with a display name
    pub fn new(name: impl Into<String>) -> Self {
        Environment { name: name.into(), vars: BTreeMap::new() }
    }

    /// Set a variable, returning the updated context
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Context selecting a session through its rc file
    pub fn from_rc_file(name: impl Into<String>, rc_file: &str) -> Self {
        Environment::new(name).with_var("GISRC", rc_file)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rc_file_context() {
        let env = Environment::from_rc_file("target", "/tmp/rc").with_var("LC_ALL", "C");
        assert_eq!(env.name(), "target");
        assert_eq!(env.vars().get("GISRC").map(String::as_str), Some("/tmp/rc"));
        assert_eq!(env.vars().len(), 2);
    }
}
