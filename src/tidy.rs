//! Thin wrapper around the HTML Tidy executable.
//!
//! Sits entirely outside the extraction call graph: callers who want
//! Tidy's repairs run [`normalize`] themselves and feed the result back
//! through `parse`. Option keys are written camelCase or kebab-case and
//! render as `--kebab-case` flags; booleans become `yes`/`no` tokens.

use std::collections::BTreeMap;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// One Tidy configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum TidyValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl From<bool> for TidyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TidyValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for TidyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TidyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Configuration map handed to the Tidy subprocess. Keys are normalized
/// to kebab-case on insert, so `showWarnings` and `show-warnings` name
/// the same option.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyOptions {
    program: String,
    values: BTreeMap<String, TidyValue>,
}

impl Default for TidyOptions {
    fn default() -> Self {
        let mut options = Self {
            program: "tidy".to_string(),
            values: BTreeMap::new(),
        };
        options
            .set("showWarnings", false)
            .set("tidyMark", false)
            .set("forceOutput", true)
            .set("quiet", false);
        options
    }
}

impl TidyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one option; later calls with the same key overwrite.
    pub fn set(&mut self, key: &str, value: impl Into<TidyValue>) -> &mut Self {
        self.values.insert(kebab_case(key), value.into());
        self
    }

    /// Overrides the executable name (default `tidy`).
    pub fn program(&mut self, name: impl Into<String>) -> &mut Self {
        self.program = name.into();
        self
    }

    fn enabled(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(TidyValue::Bool(true)))
    }

    fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.values.len() * 2);
        for (key, value) in &self.values {
            args.push(format!("--{key}"));
            args.push(match value {
                TidyValue::Bool(true) => "yes".to_string(),
                TidyValue::Bool(false) => "no".to_string(),
                TidyValue::Number(n) => n.to_string(),
                TidyValue::Text(s) => s.clone(),
            });
        }
        args
    }
}

/// Runs the markup through Tidy, returning the normalized markup and any
/// surfaced diagnostics (stderr lines).
///
/// Tidy's exit statuses: 0 is clean; 1 means warnings, surfaced only
/// when `showWarnings` is set; 2 means errors, surfaced as
/// [`Error::Normalizer`] only when `showErrors` is set, otherwise the
/// forced output is returned with diagnostics swallowed.
///
/// # Errors
/// I/O failures spawning or talking to the subprocess, an error status
/// with `showErrors` set, or an error status that produced no output.
pub fn normalize(markup: &str, options: &TidyOptions) -> Result<(String, Vec<String>)> {
    let mut child = Command::new(&options.program)
        .args(options.args())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(markup.as_bytes())?;
    }
    let output = child.wait_with_output()?;

    let normalized = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let diagnostics: Vec<String> = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    match output.status.code() {
        Some(0) => Ok((normalized, Vec::new())),
        Some(1) => {
            let surfaced = if options.enabled("show-warnings") {
                diagnostics
            } else {
                Vec::new()
            };
            Ok((normalized, surfaced))
        }
        Some(2) => {
            if options.enabled("show-errors") {
                return Err(Error::Normalizer(stderr));
            }
            if normalized.is_empty() {
                return Err(Error::Normalizer(
                    "normalizer reported errors and produced no output".to_string(),
                ));
            }
            Ok((normalized, Vec::new()))
        }
        Some(code) => Err(Error::Normalizer(format!(
            "normalizer exited with status {code}"
        ))),
        None => Err(Error::Normalizer(
            "normalizer terminated by signal".to_string(),
        )),
    }
}

/// `camelCase` or `SCREAMING` keys to the `kebab-case` Tidy expects.
/// Keys already kebab-cased pass through unchanged.
fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
