use std::collections::HashMap;

/// Shell variables written by `set` and read by `print`, `echo` and `my_mkdir`.
#[derive(Debug, Default, Clone)]
pub struct Memory {
    vars: HashMap<String, String>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
