//! Label-based round trip between entities and select options.
//!
//! The select reports a display string, not an id. Callers build option
//! labels by joining several fields of each entity (code first) and, when a
//! label comes back, resolve it in two steps: an exact match on the rebuilt
//! label, then a match on the leading segment against each entity's code.
//! More than one match at either step is an error, never "pick the first".

use lifeline_core::config::SelectConfig;
use tracing::debug;

use crate::error::ResolveError;

/// How option labels are joined and split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFormat {
    pub delimiter: String,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            delimiter: " · ".to_string(),
        }
    }
}

impl LabelFormat {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Format using the configured delimiter.
    pub fn from_config(config: &SelectConfig) -> Self {
        Self::new(config.label_delimiter.clone())
    }

    /// Join non-empty parts with the delimiter.
    pub fn join<S: AsRef<str>>(&self, parts: &[S]) -> String {
        parts
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(&self.delimiter)
    }

    /// The first segment of `label`, trimmed.
    pub fn leading_segment<'a>(&self, label: &'a str) -> &'a str {
        label
            .split(self.delimiter.as_str())
            .next()
            .unwrap_or(label)
            .trim()
    }
}

/// An entity offered through a select.
pub trait Labeled {
    /// Fields making up the label. The first one is the distinguishing code.
    fn label_parts(&self) -> Vec<String>;
}

fn label_of<T: Labeled>(candidate: &T, format: &LabelFormat) -> String {
    format.join(&candidate.label_parts())
}

fn code_of<T: Labeled>(candidate: &T) -> Option<String> {
    candidate
        .label_parts()
        .into_iter()
        .next()
        .map(|code| code.trim().to_string())
}

/// Select options for `candidates`, in order.
pub fn option_labels<T: Labeled>(candidates: &[T], format: &LabelFormat) -> Vec<String> {
    candidates.iter().map(|c| label_of(c, format)).collect()
}

/// Map a selected `label` back to one of `candidates`.
pub fn resolve_selection<'a, T: Labeled>(
    label: &str,
    candidates: &'a [T],
    format: &LabelFormat,
) -> Result<&'a T, ResolveError> {
    if label.trim().is_empty() {
        return Err(ResolveError::EmptySelection);
    }

    let exact: Vec<&T> = candidates
        .iter()
        .filter(|c| label_of(*c, format) == label)
        .collect();
    match exact.as_slice() {
        [only] => return Ok(*only),
        [] => {}
        many => {
            return Err(ResolveError::Ambiguous {
                label: label.to_string(),
                matches: many.len(),
            });
        }
    }

    let code = format.leading_segment(label);
    debug!(%label, code, "No exact label match, trying leading segment");
    if code.is_empty() {
        return Err(ResolveError::Unresolved {
            label: label.to_string(),
        });
    }
    let by_code: Vec<&T> = candidates
        .iter()
        .filter(|c| code_of(*c).as_deref() == Some(code))
        .collect();
    match by_code.as_slice() {
        [only] => Ok(*only),
        [] => Err(ResolveError::Unresolved {
            label: label.to_string(),
        }),
        many => Err(ResolveError::Ambiguous {
            label: label.to_string(),
            matches: many.len(),
        }),
    }
}
