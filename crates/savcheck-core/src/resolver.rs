//! Missing-column resolution.
//!
//! When the duplicate detector requires columns the table does not have, the
//! pipeline blocks on a two-outcome decision: proceed without the missing
//! columns, or supply a replacement list. The decision seam is a trait so the
//! core stays decoupled from any presentation layer; the CLI answers from a
//! terminal prompt and tests answer from a script.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::warn;

use savcheck_model::{CaseInsensitiveSet, CheckError, Diagnostics};

/// Outcome of the two-choice missing-column prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingColumnChoice {
    /// Continue with the required subset minus the missing columns.
    Proceed,
    /// Ask for a replacement column list.
    Replace,
}

/// Decision source for missing-column recovery.
///
/// `choose` blocks until an answer arrives; there is no timeout and no
/// default. `replacement_list` is consulted only after a `Replace` choice.
pub trait ColumnResolver {
    fn choose(&mut self, missing: &[String]) -> Result<MissingColumnChoice>;

    /// Free-text replacement list, `None` when nothing was supplied.
    fn replacement_list(&mut self) -> Result<Option<String>>;
}

/// Scripted responder for unattended runs and tests.
#[derive(Debug, Clone)]
pub struct ScriptedResolver {
    choice: MissingColumnChoice,
    replacement: Option<String>,
}

impl ScriptedResolver {
    /// Always proceed without the missing columns.
    pub fn proceed() -> Self {
        Self {
            choice: MissingColumnChoice::Proceed,
            replacement: None,
        }
    }

    /// Always replace with the given column list.
    pub fn replace(list: impl Into<String>) -> Self {
        Self {
            choice: MissingColumnChoice::Replace,
            replacement: Some(list.into()),
        }
    }

    /// Choose replace but supply no text, as an operator closing the prompt.
    pub fn replace_with_nothing() -> Self {
        Self {
            choice: MissingColumnChoice::Replace,
            replacement: None,
        }
    }
}

impl ColumnResolver for ScriptedResolver {
    fn choose(&mut self, _missing: &[String]) -> Result<MissingColumnChoice> {
        Ok(self.choice)
    }

    fn replacement_list(&mut self) -> Result<Option<String>> {
        Ok(self.replacement.clone())
    }
}

/// Parse a comma-separated column list: trim, upper-case, drop empties,
/// dedupe keeping first occurrence.
pub fn parse_column_list(raw: &str) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut columns = Vec::new();
    for part in raw.split(',') {
        let name = part.trim().to_uppercase();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.clone()) {
            columns.push(name);
        }
    }
    columns
}

/// Resolve a required column subset against the table's columns.
///
/// Returns the subset unchanged when nothing is missing. Otherwise surfaces
/// the interactive decision; an empty or unusable replacement list is fatal
/// (`CheckError::NoColumnsProvided`).
pub fn resolve_subset(
    df: &DataFrame,
    required: &[String],
    resolver: &mut dyn ColumnResolver,
    diags: &mut Diagnostics,
) -> Result<Vec<String>> {
    let present = CaseInsensitiveSet::new(
        df.get_column_names_owned()
            .iter()
            .map(|name| name.to_string()),
    );
    let required: Vec<String> = required
        .iter()
        .map(|name| name.trim().to_uppercase())
        .collect();
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !present.contains(name))
        .cloned()
        .collect();
    if missing.is_empty() {
        return Ok(required);
    }

    warn!(?missing, "required columns absent from table");
    diags.warning(
        "missing-columns",
        format!("required columns absent from table: {}", missing.join(", ")),
        None,
    );

    match resolver.choose(&missing)? {
        MissingColumnChoice::Proceed => {
            diags.info(
                "subset-reduced",
                "continuing without the missing columns",
                None,
            );
            Ok(required
                .into_iter()
                .filter(|name| !missing.contains(name))
                .collect())
        }
        MissingColumnChoice::Replace => {
            let raw = resolver.replacement_list()?;
            let replacement = raw.as_deref().map(parse_column_list).unwrap_or_default();
            if replacement.is_empty() {
                diags.error("no-columns", "no usable column was provided", None);
                return Err(CheckError::NoColumnsProvided.into());
            }
            diags.info(
                "subset-replaced",
                format!("required subset replaced: {}", replacement.join(", ")),
                None,
            );
            Ok(replacement)
        }
    }
}
