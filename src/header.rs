//! Header resolution
//!
//! Maps symbolic column names to positional indices against the first
//! record of a file. Matching trims surrounding whitespace and ignores
//! ASCII case; when a header contains duplicate names the first match wins.
//! Resolution runs once per file, before any worker thread starts, so a
//! missing column fails the run before data flows.

use anyhow::{anyhow, Result};

/// Column selection parsed from the CLI: either all positional indices
/// or all symbolic names, never a mix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    Indices(Vec<usize>),
    Names(Vec<String>),
}

/// Parse a comma-separated column list such as "0,2,12" or "name,phone_number"
pub fn parse_column_spec(spec: &str) -> Result<ColumnSpec> {
    let items: Vec<&str> = spec.split(',').map(|s| s.trim()).collect();
    if items.iter().any(|s| s.is_empty()) {
        return Err(anyhow!("empty entry in column list '{}'", spec));
    }

    let numeric = items.iter().filter(|s| s.parse::<usize>().is_ok()).count();
    if numeric == items.len() {
        let indices = items
            .iter()
            .map(|s| s.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ColumnSpec::Indices(indices))
    } else if numeric == 0 {
        Ok(ColumnSpec::Names(items.iter().map(|s| s.to_string()).collect()))
    } else {
        Err(anyhow!(
            "column list '{}' mixes positional indices and names; use one or the other",
            spec
        ))
    }
}

/// Resolve one symbolic name to its index in `header`
pub fn resolve_column(header: &[String], name: &str, source: &str) -> Result<usize> {
    let wanted = name.trim();
    header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| anyhow!("column '{}' not found in header of {}", name, source))
}

/// Resolve several names at once, preserving the requested order
pub fn resolve_columns(header: &[String], names: &[String], source: &str) -> Result<Vec<usize>> {
    names
        .iter()
        .map(|name| resolve_column(header, name, source))
        .collect()
}
