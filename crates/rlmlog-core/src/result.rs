use serde::{Deserialize, Deserializer};

use crate::Value;

/// Outcome of executing one block of code in the REPL
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionResult {
    /// Whether the code ran without raising
    pub success: bool,
    /// Wall-clock execution time in seconds
    #[serde(default)]
    pub execution_time: f64,
    /// Captured standard output
    #[serde(default)]
    pub stdout: String,
    /// Captured standard error (tracebacks included)
    #[serde(default)]
    pub stderr: String,
    /// Namespace after execution
    #[serde(default)]
    pub locals: Locals,
}

impl ExecutionResult {
    pub fn new(success: bool, execution_time: f64) -> Self {
        Self {
            success,
            execution_time: execution_time.max(0.0),
            ..Default::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn with_local(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.locals.insert(name, value);
        self
    }

    pub fn with_locals(mut self, locals: Locals) -> Self {
        self.locals = locals;
        self
    }
}

/// REPL namespace, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct Locals(Vec<(String, Value)>);

impl Locals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable. Re-binding a name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Locals {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut locals = Locals::new();
        for (name, value) in iter {
            locals.insert(name, value);
        }
        locals
    }
}

impl<'de> Deserialize<'de> for Locals {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(map
            .into_iter()
            .map(|(name, raw)| (name, Value::from(raw)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReplValue;

    #[test]
    fn test_locals_keep_insertion_order() {
        let mut locals = Locals::new();
        locals.insert("zeta", 1);
        locals.insert("alpha", 2);
        locals.insert("mid", 3);
        locals.insert("zeta", "rebound");

        let names: Vec<&str> = locals.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(locals.len(), 3);
        assert_eq!(locals.get("zeta").unwrap().type_name(), "str");
        assert!(locals.get("missing").is_none());
    }

    #[test]
    fn test_new_clamps_negative_time() {
        let result = ExecutionResult::new(true, -1.0);
        assert_eq!(result.execution_time, 0.0);
        assert!(result.locals.is_empty());
    }

    #[test]
    fn test_deserialize_result() {
        let json = r#"{"success":false,"execution_time":0.5,"stderr":"Traceback","locals":{"b":[1],"a":"x"}}"#;
        let result: ExecutionResult = serde_json::from_str(json).unwrap();

        assert!(!result.success);
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, "Traceback");
        let names: Vec<&str> = result.locals.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
