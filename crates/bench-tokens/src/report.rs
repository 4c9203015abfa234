//! Per-file and cross-toolkit report tables.
//!
//! The detail table lists every [`ScenarioResult`] in scan order. The
//! comparison pivots token counts into one row per scenario and one column
//! per toolkit, both sorted, with a max/min ratio where it is meaningful.

use crate::scan::ScenarioResult;
use mcp_bench_core::{ScenarioId, ToolkitName};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Shown in comparison cells for which a toolkit has no data.
pub const MISSING_CELL: &str = "—";

const SCENARIO_WIDTH: usize = 45;
const TOOLKIT_WIDTH: usize = 20;
const TOOLKIT_COLUMN_WIDTH: usize = 15;
const RATIO_WIDTH: usize = 10;
const DETAIL_RULE_WIDTH: usize = 95;

/// Token counts for one scenario across toolkits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Scenario being compared
    pub scenario: ScenarioId,
    /// Token count per toolkit that reported the scenario
    pub tokens: BTreeMap<ToolkitName, usize>,
}

impl ComparisonRow {
    /// Largest token count divided by the smallest.
    ///
    /// `None` when fewer than two toolkits reported the scenario or when the
    /// smallest count is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_bench_tokens::report::ComparisonRow;
    /// use mcp_bench_core::{ScenarioId, ToolkitName};
    ///
    /// let row = ComparisonRow {
    ///     scenario: ScenarioId::new("01_list_companies"),
    ///     tokens: [(ToolkitName::new("a"), 100), (ToolkitName::new("b"), 400)]
    ///         .into_iter()
    ///         .collect(),
    /// };
    /// assert_eq!(row.ratio(), Some(4.0));
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // token counts stay far below 2^52
    pub fn ratio(&self) -> Option<f64> {
        if self.tokens.len() < 2 {
            return None;
        }
        let min = *self.tokens.values().min()?;
        let max = *self.tokens.values().max()?;
        (min > 0).then(|| max as f64 / min as f64)
    }
}

/// Pivoted cross-toolkit comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Every toolkit seen, sorted
    pub toolkits: Vec<ToolkitName>,
    /// One row per scenario, sorted by scenario
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Pivots scan results.
    ///
    /// When a (scenario, toolkit) pair occurs more than once, the first
    /// result in scan order wins.
    #[must_use]
    pub fn build(results: &[ScenarioResult]) -> Self {
        let toolkits: BTreeSet<ToolkitName> = results.iter().map(|r| r.toolkit.clone()).collect();

        let mut pivot: BTreeMap<ScenarioId, BTreeMap<ToolkitName, usize>> = BTreeMap::new();
        for result in results {
            pivot
                .entry(result.scenario.clone())
                .or_default()
                .entry(result.toolkit.clone())
                .or_insert(result.tokens);
        }

        Self {
            toolkits: toolkits.into_iter().collect(),
            rows: pivot
                .into_iter()
                .map(|(scenario, tokens)| ComparisonRow { scenario, tokens })
                .collect(),
        }
    }

    /// Row for `scenario`, if any toolkit reported it.
    #[must_use]
    pub fn row(&self, scenario: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.scenario.as_str() == scenario)
    }
}

/// Everything the `tokens` command reports, in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct TokenReport {
    /// Encoding the counts were produced with
    pub encoding: String,
    /// Per-file rows in scan order
    pub results: Vec<ScenarioResult>,
    /// Cross-toolkit pivot
    pub comparison: Comparison,
}

impl TokenReport {
    /// Builds a report from scan results.
    #[must_use]
    pub fn new(encoding: impl Into<String>, results: Vec<ScenarioResult>) -> Self {
        let comparison = Comparison::build(&results);
        Self {
            encoding: encoding.into(),
            results,
            comparison,
        }
    }

    /// Detail table followed by the comparison table.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = render_detail(&self.results);
        out.push_str("\n\n");
        out.push_str(&render_comparison(&self.comparison));
        out
    }
}

/// Renders the per-file table.
#[must_use]
pub fn render_detail(results: &[ScenarioResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<SCENARIO_WIDTH$} {:<TOOLKIT_WIDTH$} {:>10} {:>10} {:>8}",
        "Scenario", "Toolkit", "Tokens", "Bytes", "Records"
    );
    let _ = writeln!(out, "{}", "-".repeat(DETAIL_RULE_WIDTH));

    for r in results {
        let _ = writeln!(
            out,
            "{:<SCENARIO_WIDTH$} {:<TOOLKIT_WIDTH$} {:>10} {:>10} {:>8}",
            r.scenario.as_str(),
            r.toolkit.as_str(),
            group_thousands(r.tokens),
            group_thousands(r.bytes),
            r.records
        );
    }
    out
}

/// Renders the pivoted comparison table.
#[must_use]
pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = String::from("Comparison Summary\n");

    let _ = write!(out, "{:<SCENARIO_WIDTH$}", "Scenario");
    for toolkit in &comparison.toolkits {
        let _ = write!(out, " {:>TOOLKIT_COLUMN_WIDTH$}", toolkit.as_str());
    }
    let _ = writeln!(out, " {:>RATIO_WIDTH$}", "Ratio");
    let rule = SCENARIO_WIDTH + (TOOLKIT_COLUMN_WIDTH + 1) * comparison.toolkits.len() + RATIO_WIDTH + 1;
    let _ = writeln!(out, "{}", "-".repeat(rule));

    for row in &comparison.rows {
        let _ = write!(out, "{:<SCENARIO_WIDTH$}", row.scenario.as_str());
        for toolkit in &comparison.toolkits {
            let cell = row
                .tokens
                .get(toolkit)
                .map_or_else(|| MISSING_CELL.to_string(), |t| group_thousands(*t));
            let _ = write!(out, " {cell:>TOOLKIT_COLUMN_WIDTH$}");
        }
        if let Some(ratio) = row.ratio() {
            let _ = write!(out, " {:>width$.1}x", ratio, width = RATIO_WIDTH - 1);
        }
        out.push('\n');
    }
    out
}

/// Formats an integer with comma thousands separators.
///
/// # Examples
///
/// ```
/// use mcp_bench_tokens::report::group_thousands;
///
/// assert_eq!(group_thousands(999), "999");
/// assert_eq!(group_thousands(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(scenario: &str, toolkit: &str, tokens: usize) -> ScenarioResult {
        ScenarioResult {
            scenario: ScenarioId::new(scenario),
            toolkit: ToolkitName::new(toolkit),
            tokens,
            bytes: tokens * 4,
            records: 1,
            fields_per_record: 1,
            file: format!("raw/{toolkit}/{scenario}.json"),
        }
    }

    #[test]
    fn test_ratio_max_over_min() {
        let comparison = Comparison::build(&[result("s1", "a", 100), result("s1", "b", 400)]);
        assert_eq!(comparison.row("s1").unwrap().ratio(), Some(4.0));
    }

    #[test]
    fn test_ratio_omitted_for_single_toolkit() {
        let comparison = Comparison::build(&[result("s1", "a", 100), result("s2", "b", 50)]);
        assert_eq!(comparison.row("s1").unwrap().ratio(), None);
        assert_eq!(comparison.row("s2").unwrap().ratio(), None);
    }

    #[test]
    fn test_ratio_omitted_when_min_is_zero() {
        let comparison = Comparison::build(&[result("s1", "a", 0), result("s1", "b", 400)]);
        assert_eq!(comparison.row("s1").unwrap().ratio(), None);
    }

    #[test]
    fn test_ratio_across_three_toolkits() {
        let comparison = Comparison::build(&[
            result("s1", "a", 200),
            result("s1", "b", 1000),
            result("s1", "c", 500),
        ]);
        assert_eq!(comparison.row("s1").unwrap().ratio(), Some(5.0));
    }

    #[test]
    fn test_build_sorts_scenarios_and_toolkits() {
        let comparison = Comparison::build(&[
            result("02_b", "zeta", 1),
            result("01_a", "alpha", 1),
            result("03_c", "mid", 1),
        ]);
        let toolkits: Vec<&str> = comparison.toolkits.iter().map(ToolkitName::as_str).collect();
        let scenarios: Vec<&str> = comparison.rows.iter().map(|r| r.scenario.as_str()).collect();
        assert_eq!(toolkits, vec!["alpha", "mid", "zeta"]);
        assert_eq!(scenarios, vec!["01_a", "02_b", "03_c"]);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let comparison = Comparison::build(&[result("s1", "a", 10), result("s1", "a", 99)]);
        assert_eq!(comparison.row("s1").unwrap().tokens[&ToolkitName::new("a")], 10);
    }

    #[test]
    fn test_render_detail_keeps_insertion_order() {
        let table = render_detail(&[result("zz", "b", 1500), result("aa", "a", 2)]);
        let zz = table.find("zz").unwrap();
        let aa = table.find("aa").unwrap();
        assert!(zz < aa);
        assert!(table.contains("1,500"));
        assert!(table.contains("6,000"));
        assert!(table.lines().nth(1).unwrap().chars().all(|c| c == '-'));
    }

    #[test]
    fn test_render_comparison_placeholder_and_ratio() {
        let comparison = Comparison::build(&[
            result("s1", "a", 100),
            result("s1", "b", 400),
            result("s2", "a", 7),
        ]);
        let table = render_comparison(&comparison);

        let s1 = table.lines().find(|l| l.starts_with("s1")).unwrap();
        assert!(s1.ends_with("4.0x"));

        let s2 = table.lines().find(|l| l.starts_with("s2")).unwrap();
        assert!(s2.contains(MISSING_CELL));
        assert!(!s2.contains('x'));
    }

    #[test]
    fn test_render_comparison_rule_width() {
        let comparison = Comparison::build(&[result("s1", "a", 1), result("s1", "b", 1)]);
        let table = render_comparison(&comparison);
        let rule = table.lines().nth(2).unwrap();
        assert_eq!(rule.len(), 45 + 16 * 2 + 11);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12_345), "12,345");
        assert_eq!(group_thousands(123_456), "123,456");
    }

    #[test]
    fn test_report_render_contains_both_tables() {
        let report = TokenReport::new("cl100k_base", vec![result("s1", "a", 10)]);
        let rendered = report.render();
        assert!(rendered.contains("Scenario"));
        assert!(rendered.contains("Comparison Summary"));
    }
}
