//! Synthetic input generation
//!
//! Produces CSV files shaped like the production inputs the pipelines
//! chew through: a few mixed-type value columns, a trailing international
//! phone_number column, and a 0.1% sprinkling of rows with a missing or
//! extra field. Seeded runs are byte-for-byte reproducible.

use anyhow::{Context, Result};
use std::io::Write;

use crate::config::Reporter;

const COUNTRY_CODES: [&str; 6] = ["+1", "+44", "+49", "+81", "+33", "+91"];
const MALFORMED_RATE: f64 = 0.001;
const PROGRESS_EVERY: u64 = 100_000;

#[derive(Debug, Clone)]
pub struct GenSpec {
    pub rows: u64,
    /// Value columns before the trailing phone_number column
    pub cols: usize,
    pub seed: Option<u64>,
}

/// Write the synthetic file. Returns the number of data rows written.
pub fn generate<W: Write>(
    spec: &GenSpec,
    writer: &mut csv::Writer<W>,
    reporter: &Reporter,
) -> Result<u64> {
    let mut rng = match spec.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let mut header: Vec<String> = (1..=spec.cols).map(|i| format!("column_{}", i)).collect();
    header.push("phone_number".to_string());
    writer
        .write_record(&header)
        .context("failed to write generated header")?;

    for i in 0..spec.rows {
        let mut row = Vec::with_capacity(spec.cols + 1);
        for j in 0..spec.cols {
            row.push(match j % 3 {
                0 => rng.u32(1000..=99999).to_string(),
                1 => (0..10).map(|_| rng.lowercase()).collect(),
                _ => format!("{:.2}", 10.0 + rng.f64() * 90.0),
            });
        }
        row.push(phone_number(&mut rng));

        // Shave or stretch a fraction of rows so downstream padding and
        // flexible parsing have something to do
        if rng.f64() < MALFORMED_RATE {
            if rng.bool() {
                row.pop();
            } else {
                row.push("extra_data".to_string());
            }
        }

        writer
            .write_record(&row)
            .with_context(|| format!("failed to write generated row {}", i + 1))?;

        if (i + 1) % PROGRESS_EVERY == 0 {
            reporter.status(&format!("generated {}/{} rows", i + 1, spec.rows));
        }
    }

    writer.flush().context("failed to flush generated output")?;
    Ok(spec.rows)
}

fn phone_number(rng: &mut fastrand::Rng) -> String {
    let prefix = COUNTRY_CODES[rng.usize(..COUNTRY_CODES.len())];
    let digits = rng.usize(7..=11);
    let local: String = (0..digits).map(|_| rng.digit(10)).collect();
    format!("{} {}", prefix, local)
}
