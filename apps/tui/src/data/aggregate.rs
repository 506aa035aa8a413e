use crate::data::scores::{ScoreRow, ScoreTable};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Arithmetic mean of the present values; `None` when nothing is present
pub fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));

    (count > 0).then(|| sum / count as f64)
}

/// Per-port mean score of every theme, themes in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeAggregate {
    ports: Vec<String>,
    themes: Vec<String>,
    /// `means[theme][port]`
    means: Vec<Vec<Option<f64>>>,
}

impl ThemeAggregate {
    pub fn ports(&self) -> &[String] {
        &self.ports
    }

    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn mean(&self, theme: &str, port: &str) -> Option<f64> {
        let theme = self.themes.iter().position(|name| name == theme)?;
        let port = self.ports.iter().position(|name| name == port)?;
        self.means[theme][port]
    }

    /// One value per theme for the given port; themes without scores plot at 0
    pub fn port_series(&self, port: usize) -> Vec<f64> {
        self.means
            .iter()
            .map(|row| row.get(port).copied().flatten().unwrap_or(0.0))
            .collect()
    }

    pub fn as_mapping(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.themes
            .iter()
            .zip(&self.means)
            .map(|(theme, row)| {
                let ports = self
                    .ports
                    .iter()
                    .zip(row)
                    .filter_map(|(port, value)| value.map(|value| (port.clone(), value)))
                    .collect();
                (theme.clone(), ports)
            })
            .collect()
    }
}

pub fn aggregate_by_theme(table: &ScoreTable) -> ThemeAggregate {
    let mut groups: BTreeMap<&str, Vec<&ScoreRow>> = BTreeMap::new();
    for row in table.rows() {
        groups.entry(row.theme.as_str()).or_default().push(row);
    }

    let port_count = table.ports().len();
    let mut themes = Vec::with_capacity(groups.len());
    let mut means = Vec::with_capacity(groups.len());

    for (theme, rows) in groups {
        themes.push(theme.to_string());
        means.push(
            (0..port_count)
                .map(|port| mean(rows.iter().map(|row| row.score(port))))
                .collect(),
        );
    }

    debug!(themes = themes.len(), "aggregated scores by theme");
    ThemeAggregate {
        ports: table.ports().to_vec(),
        themes,
        means,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    fn row(theme: &str, scores: &[Option<f64>]) -> ScoreRow {
        ScoreRow {
            theme: theme.to_string(),
            area: "Social".to_string(),
            item: "1.00".to_string(),
            scores: scores.to_vec(),
            average: mean(scores.iter().copied()),
        }
    }

    fn table() -> ScoreTable {
        ScoreTable::new(
            vec!["Port A".to_string(), "Port B".to_string()],
            vec![
                row("SDG 2", &[Some(1.0), Some(3.0)]),
                row("SDG 1", &[Some(2.0), None]),
                row("SDG 2", &[Some(2.0), Some(1.0)]),
                row("SDG 1", &[Some(3.0), None]),
            ],
        )
    }

    #[test]
    fn mean_ignores_missing_values() {
        assert_eq!(mean([None, None]), None);
        assert_close(mean([Some(1.0), None, Some(2.0)]).unwrap_or_default(), 1.5);
        assert_close(
            mean((1..=6).map(|value| Some(f64::from(value)))).unwrap_or_default(),
            3.5,
        );
    }

    #[test]
    fn groups_are_sorted_by_theme() {
        let aggregate = aggregate_by_theme(&table());
        assert_eq!(aggregate.themes(), ["SDG 1", "SDG 2"]);
    }

    #[test]
    fn per_port_mean_within_theme() {
        let aggregate = aggregate_by_theme(&table());

        assert_close(aggregate.mean("SDG 1", "Port A").unwrap_or_default(), 2.5);
        assert_close(aggregate.mean("SDG 2", "Port B").unwrap_or_default(), 2.0);
        assert_eq!(aggregate.mean("SDG 1", "Port B"), None);
        assert_eq!(aggregate.mean("SDG 9", "Port A"), None);
    }

    #[test]
    fn port_series_has_one_value_per_theme() {
        let aggregate = aggregate_by_theme(&table());
        assert_eq!(aggregate.port_series(1), vec![0.0, 2.0]);

        let mapping = aggregate.as_mapping();
        assert_eq!(mapping.len(), 2);
        assert!(!mapping["SDG 1"].contains_key("Port B"));
    }
}
