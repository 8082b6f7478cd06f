//! Text table file format.
//!
//! ```text
//! # comment
//! pressure
//! 1e5
//! 2e5
//!
//! temperature
//! 300
//! 350
//!
//! density
//! <value at (T_1, p_1)>
//! <value at (T_1, p_2)>
//! <value at (T_2, p_1)>
//! ...
//! ```
//!
//! A keyword line opens a block, each following line holds one number, and a
//! blank line (or end of input) closes the block. `#` lines are skipped
//! everywhere. `pressure` and `temperature` are required; `density`,
//! `internal_energy` and `enthalpy` are optional and list pressure fastest.

use crate::axis::{Axis, AxisError};
use crate::error::{TableError, TableResult};
use crate::matrix::PropertyMatrix;
use crate::property::TabulatedProperty;
use crate::table::TableData;
use ft_core::Real;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Pressure,
    Temperature,
    Property(TabulatedProperty),
}

impl Keyword {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "pressure" => Some(Keyword::Pressure),
            "temperature" => Some(Keyword::Temperature),
            other => TabulatedProperty::from_keyword(other).map(Keyword::Property),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Keyword::Pressure => "pressure",
            Keyword::Temperature => "temperature",
            Keyword::Property(prop) => prop.keyword(),
        }
    }
}

/// Values collected under one keyword.
#[derive(Debug)]
struct Block {
    keyword: Keyword,
    line: usize,
    values: Vec<Real>,
    value_lines: Vec<usize>,
}

#[derive(Debug)]
enum ScanState {
    Idle,
    InBlock(Block),
}

/// Line-by-line block scanner.
#[derive(Debug)]
struct Scanner {
    state: ScanState,
    blocks: Vec<Block>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            state: ScanState::Idle,
            blocks: Vec::new(),
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> TableResult<()> {
        let line = raw.trim();
        if line.starts_with('#') {
            return Ok(());
        }
        if line.is_empty() {
            self.close();
            return Ok(());
        }
        if let ScanState::InBlock(block) = &mut self.state {
            let value = parse_value(line, line_no, block.keyword)?;
            block.values.push(value);
            block.value_lines.push(line_no);
            return Ok(());
        }

        let keyword = Keyword::parse(line)
            .ok_or_else(|| TableError::format(line_no, format!("unrecognized keyword '{line}'")))?;
        if let Some(first) = self.blocks.iter().find(|b| b.keyword == keyword) {
            return Err(TableError::format(
                line_no,
                format!(
                    "duplicate keyword '{}' (first block at line {})",
                    keyword.name(),
                    first.line
                ),
            ));
        }
        self.state = ScanState::InBlock(Block {
            keyword,
            line: line_no,
            values: Vec::new(),
            value_lines: Vec::new(),
        });
        Ok(())
    }

    fn close(&mut self) {
        if let ScanState::InBlock(block) = std::mem::replace(&mut self.state, ScanState::Idle) {
            self.blocks.push(block);
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close();
        self.blocks
    }
}

fn parse_value(line: &str, line_no: usize, keyword: Keyword) -> TableResult<Real> {
    if Keyword::parse(line).is_some() {
        return Err(TableError::format(
            line_no,
            format!(
                "keyword '{line}' inside the '{}' block; blocks must be separated by a blank line",
                keyword.name()
            ),
        ));
    }
    let mut tokens = line.split_whitespace();
    let (Some(token), None) = (tokens.next(), tokens.next()) else {
        return Err(TableError::format(
            line_no,
            format!(
                "expected one number per line in the '{}' block, found '{line}'",
                keyword.name()
            ),
        ));
    };
    match token.parse::<Real>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(TableError::format(
            line_no,
            format!("non-finite value '{token}' in the '{}' block", keyword.name()),
        )),
        Err(_) => Err(TableError::format(
            line_no,
            format!("non-numeric token '{token}' in the '{}' block", keyword.name()),
        )),
    }
}

fn axis_from_block(block: Block) -> TableResult<Axis> {
    let Block {
        keyword,
        line,
        values,
        value_lines,
    } = block;
    Axis::new(values).map_err(|err| match err {
        AxisError::TooShort { len } => TableError::format(
            line,
            format!("'{}' needs at least 2 values, found {len}", keyword.name()),
        ),
        AxisError::NotIncreasing { index, value } => TableError::format(
            value_lines[index],
            format!(
                "'{}' values must be strictly increasing; {value} is not above its predecessor",
                keyword.name()
            ),
        ),
        AxisError::NonFinite { index, value } => TableError::format(
            value_lines[index],
            format!("non-finite value {value} in the '{}' block", keyword.name()),
        ),
    })
}

/// Parse table text.
pub fn parse_str(text: &str) -> TableResult<TableData> {
    let mut scanner = Scanner::new();
    for (i, line) in text.lines().enumerate() {
        scanner.feed(i + 1, line)?;
    }

    let mut pressure = None;
    let mut temperature = None;
    let mut properties = Vec::new();
    for block in scanner.finish() {
        match block.keyword {
            Keyword::Pressure => pressure = Some(block),
            Keyword::Temperature => temperature = Some(block),
            Keyword::Property(prop) => properties.push((prop, block)),
        }
    }
    let pressure = pressure
        .ok_or_else(|| TableError::format(0, "missing required keyword 'pressure'"))
        .and_then(axis_from_block)?;
    let temperature = temperature
        .ok_or_else(|| TableError::format(0, "missing required keyword 'temperature'"))
        .and_then(axis_from_block)?;

    let mut table = TableData::new(pressure, temperature);
    let (num_p, num_t) = (table.num_p(), table.num_t());
    for (prop, block) in properties {
        if block.values.len() != num_p * num_t {
            return Err(TableError::format(
                block.line,
                format!(
                    "'{prop}' block has {} values, expected {} ({num_p} p x {num_t} T)",
                    block.values.len(),
                    num_p * num_t
                ),
            ));
        }
        let matrix = PropertyMatrix::from_flat(num_t, num_p, block.values)?;
        table.set_property(prop, matrix)?;
    }

    debug!(
        num_p,
        num_t,
        missing = ?table.missing(),
        "parsed property table"
    );
    Ok(table)
}

/// Read and parse a table file.
pub fn read_table(path: &Path) -> TableResult<TableData> {
    let text = fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    parse_str(&text)
}

/// Shortest text that parses back to exactly `v`.
fn format_value(v: Real) -> String {
    let mag = v.abs();
    if v == 0.0 || (1e-4..1e16).contains(&mag) {
        format!("{v}")
    } else {
        format!("{v:e}")
    }
}

fn push_block(out: &mut String, keyword: &str, values: &[Real]) {
    out.push_str(keyword);
    out.push('\n');
    for &v in values {
        out.push_str(&format_value(v));
        out.push('\n');
    }
    out.push('\n');
}

/// Serialize a table. `fluid_name`, when given, goes into the comment header.
pub fn write_string(table: &TableData, fluid_name: Option<&str>) -> String {
    let mut out = String::new();
    match fluid_name {
        Some(name) => {
            let _ = writeln!(out, "# Tabulated fluid properties for {name}");
        }
        None => out.push_str("# Tabulated fluid properties\n"),
    }
    let _ = writeln!(
        out,
        "# {} pressure points [Pa] x {} temperature points [K]",
        table.num_p(),
        table.num_t()
    );
    out.push_str("# property values cycle through pressure within each temperature\n\n");

    push_block(&mut out, "pressure", table.pressure().values());
    push_block(&mut out, "temperature", table.temperature().values());
    for (prop, matrix) in table.properties().iter() {
        push_block(&mut out, prop.keyword(), matrix.as_flat());
    }
    out
}

/// Serialize a table to `path`, replacing any existing file.
pub fn write_table(path: &Path, table: &TableData, fluid_name: Option<&str>) -> TableResult<()> {
    fs::write(path, write_string(table, fluid_name)).map_err(|e| TableError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SMALL: &str = "\
# test table
pressure
1e5
2e5
3e5

temperature
300
350
400

density
1.0
2.0
3.0
4.0
5.0
6.0
7.0
8.0
9.0
";

    fn format_line(text: &str) -> usize {
        match parse_str(text) {
            Err(TableError::Format { line, .. }) => line,
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    #[test]
    fn parses_axes_and_density() {
        let table = parse_str(SMALL).unwrap();
        assert_eq!(table.pressure().values(), &[1e5, 2e5, 3e5]);
        assert_eq!(table.temperature().values(), &[300.0, 350.0, 400.0]);
        let rho = table.property(TabulatedProperty::Density).unwrap();
        assert_eq!(rho.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(
            table.missing(),
            vec![TabulatedProperty::InternalEnergy, TabulatedProperty::Enthalpy]
        );
    }

    #[test]
    fn comments_are_ignored_inside_blocks() {
        let text = "pressure\n1\n# midway\n2\n\ntemperature\n  3  \n4\n";
        let table = parse_str(text).unwrap();
        assert_eq!(table.pressure().values(), &[1.0, 2.0]);
        assert_eq!(table.temperature().values(), &[3.0, 4.0]);
    }

    #[test]
    fn block_order_does_not_matter() {
        let text = "temperature\n1\n2\n\nenthalpy\n1\n2\n3\n4\n\npressure\n5\n6\n";
        let table = parse_str(text).unwrap();
        assert_eq!(table.pressure().values(), &[5.0, 6.0]);
        assert!(table.property(TabulatedProperty::Enthalpy).is_some());
    }

    #[test]
    fn decreasing_axis_is_rejected() {
        let text = "pressure\n3e5\n2e5\n1e5\n\ntemperature\n300\n350\n";
        assert_eq!(format_line(text), 3);
    }

    #[test]
    fn repeated_axis_value_is_rejected() {
        let text = "pressure\n1\n2\n\ntemperature\n300\n300\n";
        assert_eq!(format_line(text), 7);
    }

    #[test]
    fn short_axis_is_rejected() {
        let text = "pressure\n1\n\ntemperature\n300\n350\n";
        assert_eq!(format_line(text), 1);
    }

    #[test]
    fn missing_axes_are_rejected() {
        assert_eq!(format_line("temperature\n1\n2\n"), 0);
        assert_eq!(format_line("pressure\n1\n2\n"), 0);
        assert_eq!(format_line(""), 0);
    }

    #[test]
    fn wrong_count_is_rejected() {
        let text = SMALL.replace("9.0\n", "");
        assert_eq!(format_line(&text), 12);
        let text = format!("{SMALL}10.0\n");
        assert_eq!(format_line(&text), 12);
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        let text = format!("{SMALL}\nviscosity\n1\n");
        let err = parse_str(&text).unwrap_err();
        assert!(err.to_string().contains("viscosity"));
        assert_eq!(format_line(&text), 23);
    }

    #[test]
    fn duplicate_keyword_is_rejected() {
        let text = "pressure\n1\n2\n\npressure\n3\n4\n\ntemperature\n1\n2\n";
        let err = parse_str(text).unwrap_err();
        assert!(err.to_string().contains("duplicate keyword 'pressure'"));
        assert_eq!(format_line(text), 5);
    }

    #[test]
    fn bad_tokens_are_rejected() {
        assert_eq!(format_line("pressure\n1\nabc\n"), 3);
        assert_eq!(format_line("pressure\n1\n2 3\n"), 3);
        assert_eq!(format_line("pressure\n1\nNaN\n"), 3);
        assert_eq!(format_line("pressure\n1\ninf\n"), 3);
    }

    #[test]
    fn keyword_without_blank_separator_is_rejected() {
        let text = "pressure\n1\n2\ntemperature\n3\n4\n";
        let err = parse_str(text).unwrap_err();
        assert!(err.to_string().contains("blank line"));
        assert_eq!(format_line(text), 4);
    }

    #[test]
    fn written_table_has_header_and_all_blocks() {
        let table = parse_str(SMALL).unwrap();
        let text = write_string(&table, Some("Nitrogen"));
        assert!(text.starts_with("# Tabulated fluid properties for Nitrogen\n"));
        assert!(text.contains("# 3 pressure points [Pa] x 3 temperature points [K]"));
        assert!(text.contains("\npressure\n100000\n"));
        assert!(text.contains("\ndensity\n1\n2\n"));
        assert!(!text.contains("enthalpy"));
        assert_eq!(parse_str(&text).unwrap(), table);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        let table = parse_str(SMALL).unwrap();
        write_table(&path, &table, None).unwrap();
        assert_eq!(read_table(&path).unwrap(), table);
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }

    #[test]
    fn value_formatting_is_exact() {
        for v in [0.0, -0.0, 1e-300, 5e-324, 1.0 / 3.0, 6.02214076e23, -1.5e-5, 101325.0] {
            assert_eq!(format_value(v).parse::<Real>().unwrap(), v);
        }
        assert_eq!(format_value(300.0), "300");
        assert_eq!(format_value(1e20), "1e20");
    }

    fn increasing(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Real>> {
        (-1e6f64..1e6, prop::collection::vec(1e-6f64..1e4, len)).prop_map(|(start, steps)| {
            steps
                .iter()
                .scan(start, |acc, step| {
                    *acc += step;
                    Some(*acc)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn write_then_parse_reproduces_table(
            p in increasing(2..6),
            t in increasing(2..6),
            seed in prop::collection::vec(-1e9f64..1e9, 25),
            present in prop::collection::vec(any::<bool>(), 3),
        ) {
            let pressure = Axis::new(p).unwrap();
            let temperature = Axis::new(t).unwrap();
            let mut table = TableData::new(pressure, temperature);
            let n = table.num_p() * table.num_t();
            for (k, prop) in TabulatedProperty::ALL.into_iter().enumerate() {
                if present[k] {
                    let values = seed
                        .iter()
                        .cycle()
                        .skip(k)
                        .take(n)
                        .map(|v| v * (k + 1) as Real)
                        .collect();
                    let matrix =
                        PropertyMatrix::from_flat(table.num_t(), table.num_p(), values).unwrap();
                    table.set_property(prop, matrix).unwrap();
                }
            }
            let parsed = parse_str(&write_string(&table, Some("test"))).unwrap();
            prop_assert_eq!(parsed, table);
        }
    }
}
