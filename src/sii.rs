// src/sii.rs
//
// SiiNunit text for the game's live_streams.sii:
//
//   SiiNunit
//   {
//     live_stream_def : _nameless.241.422c.1f60 {
//       stream_data: 2
//       stream_data[0]: "url|title|genre|EN|128|0"
//       stream_data[1]: "..."
//     }
//   }
//
// Values are written verbatim. A `"` inside a value is not escaped and will
// confuse the game; non-ASCII text is written as UTF-8 without the game's
// hex escaping.

use crate::config::options::{CountMode, ExportOptions};
use crate::data::RunResult;
use crate::error::ParseError;

const HEADER: &str = "SiiNunit";
const UNIT: &str = "live_stream_def";
const FIELD: &str = "stream_data";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiiDocument {
    pub block_id: String,
    /// Value of the bare `stream_data:` line. Not necessarily `entries.len()`.
    pub count: usize,
    pub entries: Vec<String>,
}

impl SiiDocument {
    /// Document for a run. `count` follows `export.count_mode`.
    pub fn from_run(result: &RunResult, export: &ExportOptions) -> Self {
        let count = match export.count_mode {
            CountMode::Total => result.total,
            CountMode::Unique => result.unique_count(),
        };
        if count != result.unique_count() {
            tracing::warn!(
                count,
                written = result.unique_count(),
                "stream_data count differs from the number of entries written (count_mode = total)"
            );
        }
        Self {
            block_id: export.block_id.clone(),
            count,
            entries: result.unique.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 + self.entries.iter().map(|e| e.len() + 24).sum::<usize>());
        out.push_str(&format!("{HEADER}\n{{\n"));
        out.push_str(&format!("  {UNIT} : {} {{\n", self.block_id));
        out.push_str(&format!("    {FIELD}: {}\n", self.count));
        for (i, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!("    {FIELD}[{i}]: \"{entry}\"\n"));
        }
        out.push_str("  }\n}\n");
        out
    }

    /// Read back a file in the shape `render` writes. Indices must run 0..n in order.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let last = text.lines().count();
        let mut next = |want: &str| next_line(&mut lines, last, want);

        let (n, l) = next(HEADER)?;
        if l.trim_start_matches('\u{feff}') != HEADER {
            return Err(sii_err(n, format!("expected `{HEADER}`, found `{l}`")));
        }
        let (n, l) = next("`{`")?;
        if l != "{" {
            return Err(sii_err(n, format!("expected `{{`, found `{l}`")));
        }

        let (n, l) = next(UNIT)?;
        let block_id = l
            .strip_prefix(UNIT)
            .and_then(|r| r.trim_start().strip_prefix(':'))
            .and_then(|r| r.trim().strip_suffix('{'))
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| sii_err(n, format!("expected `{UNIT} : <id> {{`, found `{l}`")))?;
        let block_id = s!(block_id);

        let (n, l) = next(FIELD)?;
        let count = l
            .strip_prefix(FIELD)
            .and_then(|r| r.strip_prefix(':'))
            .and_then(|r| r.trim().parse::<usize>().ok())
            .ok_or_else(|| sii_err(n, format!("expected `{FIELD}: <count>`, found `{l}`")))?;

        let mut entries = Vec::new();
        loop {
            let (n, l) = next("`}`")?;
            if l == "}" {
                break;
            }
            let (idx, value) = parse_entry(l).ok_or_else(|| {
                sii_err(n, format!("expected `{FIELD}[<i>]: \"...\"`, found `{l}`"))
            })?;
            if idx != entries.len() {
                return Err(sii_err(n, format!("index {idx} out of order, expected {}", entries.len())));
            }
            entries.push(s!(value));
        }

        let (n, l) = next("`}`")?;
        if l != "}" {
            return Err(sii_err(n, format!("expected `}}`, found `{l}`")));
        }

        Ok(Self { block_id, count, entries })
    }
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    last: usize,
    want: &str,
) -> Result<(usize, &'a str), ParseError> {
    lines
        .next()
        .ok_or_else(|| sii_err(last, format!("unexpected end of file, expected {want}")))
}

/// `stream_data[3]: "value"` -> (3, "value")
fn parse_entry(line: &str) -> Option<(usize, &str)> {
    let rest = line.strip_prefix(FIELD)?.strip_prefix('[')?;
    let close = rest.find(']')?;
    let idx = rest[..close].trim().parse().ok()?;
    let value = rest[close + 1..].trim_start().strip_prefix(':')?.trim();
    let value = value.strip_prefix('"')?.strip_suffix('"')?;
    Some((idx, value))
}

fn sii_err(line: usize, msg: String) -> ParseError {
    ParseError::Sii { line, msg }
}
