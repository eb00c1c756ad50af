use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::analysis_error::AnalysisError;

/// Flat key/value overrides that must all be consumed.
///
/// Every `get` removes the key; `check` then reports whatever was never read,
/// so a misspelt key fails loudly instead of being ignored.
#[derive(Debug, Default)]
pub struct ConfigWithCheck {
    conf: HashMap<String, Value>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, Value>) -> Self {
        Self { conf }
    }

    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, AnalysisError> {
        match self.conf.remove(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| AnalysisError::config(format!("bad value for {}: {}", key, e))),
            None => Ok(None),
        }
    }

    pub fn check(&self) -> Result<(), AnalysisError> {
        if self.conf.is_empty() {
            return Ok(());
        }
        let mut keys: Vec<&str> = self.conf.keys().map(String::as_str).collect();
        keys.sort_unstable();
        Err(AnalysisError::config(format!("unknown para = {}", keys.join(", "))))
    }
}
