//! Option mapping handed to the extraction engine
//!
//! Keys use yt-dlp's embedded-API names (`outtmpl`, `noplaylist`, ...) so
//! that callers can pass arbitrary extra options straight through. The
//! subprocess extractor turns the mapping into command-line flags with
//! [`EngineOptions::to_args`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Switch(bool),
    Text(String),
}

impl OptionValue {
    /// Interpret a raw command-line value: `true`/`false` become switches.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            Self::Switch(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Self::Switch(false)
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Switch(_) => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Switch(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered mapping of engine option names to values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineOptions {
    entries: BTreeMap<String, OptionValue>,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an option.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    /// Text value of an option, if it is set and not a switch
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_text)
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        matches!(self.get(key), Some(OptionValue::Switch(true)))
    }

    /// Merge `other` into `self`; keys from `other` win.
    pub fn merge(&mut self, other: &EngineOptions) {
        for (key, value) in other.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Translate the mapping into yt-dlp command-line arguments.
    ///
    /// Disabled switches are dropped, enabled switches become bare flags and
    /// text values are emitted as `--flag value`.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.entries.len() * 2);
        for (key, value) in &self.entries {
            match value {
                OptionValue::Switch(false) => {}
                OptionValue::Switch(true) => args.push(flag_for(key)),
                OptionValue::Text(text) => {
                    args.push(flag_for(key));
                    args.push(text.clone());
                }
            }
        }
        args
    }
}

impl FromIterator<(String, OptionValue)> for EngineOptions {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Map an embedded-API option name to the matching yt-dlp flag.
fn flag_for(key: &str) -> String {
    match key {
        "format" => "--format".to_string(),
        "outtmpl" => "--output".to_string(),
        "noplaylist" => "--no-playlist".to_string(),
        "nocheckcertificate" => "--no-check-certificates".to_string(),
        other => format!("--{}", other.trim_start_matches('-').replace('_', "-")),
    }
}

/// Parse a `KEY=VALUE` pair given on the command line.
pub fn parse_key_value(pair: &str) -> Result<(String, OptionValue), String> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), OptionValue::parse(value)))
        }
        _ => Err(format!(
            "Invalid --extra-option '{}'. Expected KEY=VALUE format.",
            pair
        )),
    }
}
