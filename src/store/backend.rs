use std::collections::BTreeMap;

use serde_json::Value;

use crate::foundation::error::{CardError, CardResult};

/// Named key-value storage for template records.
///
/// `get` returns `Ok(None)` when nothing was saved under `name`. Stored text that no longer parses
/// is reported as `Value::Null` so callers fall back to defaults instead of failing.
pub trait TemplateStore {
    /// Read the record saved under `name`.
    fn get(&self, name: &str) -> CardResult<Option<Value>>;

    /// Replace the record saved under `name`.
    fn put(&mut self, name: &str, value: &Value) -> CardResult<()>;

    /// Saved names in ascending order.
    fn names(&self) -> CardResult<Vec<String>>;
}

/// Check a slot name: non-empty, at most 128 chars of `[A-Za-z0-9_-]`.
pub fn validate_name(name: &str) -> CardResult<()> {
    let ok = !name.is_empty()
        && name.len() <= 128
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if !ok {
        return Err(CardError::validation(format!(
            "invalid template name '{name}' (use 1-128 of [A-Za-z0-9_-])"
        )));
    }
    Ok(())
}

pub(crate) fn parse_stored(name: &str, text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        tracing::warn!(name, error = %e, "stored template is not valid json; using defaults");
        Value::Null
    })
}

/// In-memory store for tests and single-process sessions. Holds serialized text like a
/// browser's local storage would.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    slots: BTreeMap<String, String>,
}

impl InMemoryTemplateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under `name`, bypassing serialization.
    pub fn put_raw(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.slots.insert(name.into(), text.into());
    }

    /// Raw text stored under `name`.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn get(&self, name: &str) -> CardResult<Option<Value>> {
        Ok(self.slots.get(name).map(|text| parse_stored(name, text)))
    }

    fn put(&mut self, name: &str, value: &Value) -> CardResult<()> {
        let text = serde_json::to_string(value)
            .map_err(|e| CardError::serde(format!("template '{name}': {e}")))?;
        self.slots.insert(name.to_string(), text);
        Ok(())
    }

    fn names(&self) -> CardResult<Vec<String>> {
        Ok(self.slots.keys().cloned().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/backend.rs"]
mod tests;
