use jeach_store::{AssocRow, Error, LookupKind, Store};
use serde_json::Value;
use std::io::{self, Write};
use std::ops::RangeInclusive;
use tracing::warn;

const PASS_RULE: &str = "---------------------------------------------------";
const LOOKUP_RULE: &str = "---------------------------";

/// Print one pass: header, then every result for each value in `values`.
/// A failed lookup prints `not found: <value>` and moves on.
pub fn print_pass<W: Write>(
    out: &mut W,
    store: &Store,
    kind: LookupKind,
    values: RangeInclusive<i64>,
) -> io::Result<()> {
    writeln!(out, "\n\n{PASS_RULE}")?;
    writeln!(out, "{}", kind.header())?;
    for value in values {
        if kind == LookupKind::CorrectedDistinct {
            writeln!(out, "\n{LOOKUP_RULE}")?;
        }
        match store.run_pass(kind, value) {
            Ok(rows) => {
                for row in &rows {
                    print_row(out, kind, row)?;
                }
            }
            Err(err) => {
                warn!(?kind, value, error = %err, "lookup failed");
                writeln!(out, "not found: {value}")?;
            }
        }
        if kind.uses_json_each() {
            writeln!(out)?;
        }
    }
    Ok(())
}

/// `\t<id> : <entries>`, plus a dump of every field for the json_each passes.
pub fn print_row<W: Write>(out: &mut W, kind: LookupKind, row: &AssocRow) -> io::Result<()> {
    writeln!(
        out,
        "\t{} : {}",
        field(row, kind.id_field()),
        field(row, "entries")
    )?;
    if kind.uses_json_each() {
        let dump = serde_json::to_string_pretty(row).map_err(io::Error::other)?;
        writeln!(out, "{dump}")?;
    }
    Ok(())
}

/// The line printed when seeding stops on a failed insert: `err: [<code>]: <info>`.
pub fn print_seed_error<W: Write>(out: &mut W, err: &Error) -> io::Result<()> {
    writeln!(out, "\n{err}")?;
    out.flush()
}

fn field(row: &AssocRow, name: &str) -> String {
    match row.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
