use crate::chart::{RadarChart, RadarChartBuilder, RadarFrame, RadarSeries};
use crate::data::aggregate::aggregate_by_theme;
use crate::data::filter::{distinct, filter_by};
use crate::data::indicators::IndicatorRow;
use crate::data::scores::{ScoreRow, ScoreTable};
use crate::domain::{Field, Record};
use crate::error::DataError;
use crate::table::{render_grouped, GroupedTable};
use serde::Serialize;
use tracing::debug;

pub const AVERAGE_LABEL: &str = "Average";

/// Outcome of computing one page view. Failures stay local to the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "view")]
pub enum ViewState<T> {
    Ready(T),
    NoData(String),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn failed(err: &DataError) -> Self {
        Self::Failed(format!("{}: {err}", err.kind().label()))
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::NoData(_) | Self::Failed(_) => None,
        }
    }

    /// The explanatory text shown in place of the view
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::NoData(message) | Self::Failed(message) => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            Self::Ready(value) => ViewState::Ready(f(value)),
            Self::NoData(message) => ViewState::NoData(message),
            Self::Failed(message) => ViewState::Failed(message),
        }
    }
}

impl<T> From<Result<T, DataError>> for ViewState<T> {
    fn from(result: Result<T, DataError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::failed(&err),
        }
    }
}

/// Grouped attribute/metric table of one category, optionally one area
pub fn attributes_view(rows: &[IndicatorRow], category: &str, area: &str) -> ViewState<GroupedTable> {
    let selected = filter_by(rows, Field::Category, category, Some((Field::Area, area)));
    match render_grouped(&selected, Field::Attribute, Field::Metric) {
        GroupedTable::NoData => ViewState::NoData(format!(
            "No data available for category '{category}' and area '{area}'."
        )),
        table => ViewState::Ready(table),
    }
}

/// Rows of a theme selection cut to one row per distinct item, with their labels
struct Selection<'a> {
    rows: Vec<&'a ScoreRow>,
    labels: Vec<String>,
}

fn select<'a>(table: &'a ScoreTable, theme: &str, area: Option<&str>) -> Result<Selection<'a>, String> {
    let mut rows = filter_by(table.rows(), Field::Theme, theme, area.map(|area| (Field::Area, area)));
    if rows.is_empty() {
        return Err(match area {
            Some(area) => format!("No data available for theme '{theme}' and area '{area}'."),
            None => format!("No data available for theme '{theme}'."),
        });
    }

    // a blank item counts as one more distinct value
    let has_blank = rows.iter().any(|row| row.item.is_empty());
    let spokes = distinct(rows.iter().copied(), Field::Item).len() + usize::from(has_blank);

    rows.truncate(spokes);
    let labels = rows
        .iter()
        .map(|row| row.field(Field::Item).unwrap_or_default().to_string())
        .collect();
    debug!(theme, spokes, "selected radar rows");
    Ok(Selection { rows, labels })
}

fn port_values(rows: &[&ScoreRow], port: usize) -> Vec<f64> {
    rows.iter().map(|row| row.score(port).unwrap_or(0.0)).collect()
}

fn average_values(rows: &[&ScoreRow]) -> Vec<f64> {
    rows.iter().map(|row| row.average.unwrap_or(0.0)).collect()
}

fn collect_charts(charts: impl IntoIterator<Item = Result<RadarChart, DataError>>) -> ViewState<Vec<RadarChart>> {
    charts.into_iter().collect::<Result<Vec<_>, _>>().into()
}

/// One radar per port over the items of a theme (and area)
pub fn sdg_view(table: &ScoreTable, theme: &str, area: &str, frame: RadarFrame) -> ViewState<Vec<RadarChart>> {
    let selection = match select(table, theme, Some(area)) {
        Ok(selection) => selection,
        Err(message) => return ViewState::NoData(message),
    };

    collect_charts(table.ports().iter().enumerate().map(|(index, port)| {
        RadarChartBuilder::new(selection.labels.clone())
            .title(port.as_str())
            .frame(frame)
            .series(RadarSeries::primary(port.as_str(), port_values(&selection.rows, index)))
            .build()
    }))
}

fn port_and_average(
    table: &ScoreTable,
    selection: &Selection<'_>,
    port: &str,
    titles: (String, String),
    frame: RadarFrame,
) -> ViewState<Vec<RadarChart>> {
    let Some(index) = table.port_index(port) else {
        return ViewState::NoData(format!("Unknown port '{port}'."));
    };
    let (port_title, average_title) = titles;

    collect_charts([
        RadarChartBuilder::new(selection.labels.clone())
            .title(port_title)
            .frame(frame)
            .series(RadarSeries::primary(port, port_values(&selection.rows, index)))
            .build(),
        RadarChartBuilder::new(selection.labels.clone())
            .title(average_title)
            .frame(frame)
            .series(RadarSeries::average(AVERAGE_LABEL, average_values(&selection.rows)))
            .build(),
    ])
}

/// A port next to the average over the same theme (and area) selection
pub fn sdg_comparison_view(
    table: &ScoreTable,
    theme: &str,
    area: &str,
    port: &str,
    frame: RadarFrame,
) -> ViewState<Vec<RadarChart>> {
    match select(table, theme, Some(area)) {
        Ok(selection) => port_and_average(
            table,
            &selection,
            port,
            (port.to_string(), AVERAGE_LABEL.to_string()),
            frame,
        ),
        Err(message) => ViewState::NoData(message),
    }
}

/// One radar per port whose spokes are the per-theme mean scores
pub fn per_port_view(table: &ScoreTable, frame: RadarFrame) -> ViewState<Vec<RadarChart>> {
    let aggregate = aggregate_by_theme(table);
    if aggregate.is_empty() {
        return ViewState::NoData("No scores available to aggregate by theme.".to_string());
    }

    collect_charts(aggregate.ports().iter().enumerate().map(|(index, port)| {
        RadarChartBuilder::new(aggregate.themes().to_vec())
            .title(port.as_str())
            .frame(frame)
            .series(RadarSeries::primary(port.as_str(), aggregate.port_series(index)))
            .build()
    }))
}

/// Port vs average for every item of one theme, all areas
pub fn average_view(table: &ScoreTable, theme: &str, port: &str, frame: RadarFrame) -> ViewState<Vec<RadarChart>> {
    match select(table, theme, None) {
        Ok(selection) => port_and_average(
            table,
            &selection,
            port,
            (format!("{port} - {theme}"), format!("{AVERAGE_LABEL} - {theme}")),
            frame,
        ),
        Err(message) => ViewState::NoData(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_ports;
    use crate::data::scores::read_scores;
    use crate::error::DataErrorKind;

    const BASE: &str = "TEMA;AREA;ITEM_AJUST;Port A;Port B;Port C;Port D;Port E;Port F\n\
                        SDG 1;Social;1;1;2;3;3;2;1\n\
                        SDG 1;Social;2;0;1;2;3;3;3\n\
                        SDG 1;Environmental;3;2;2;2;2;2;2\n\
                        SDG 1;Environmental;3;1;1;1;1;1;1\n\
                        SDG 2;Economic;1;3;3;3;3;3;3\n";

    fn table() -> Result<ScoreTable, DataError> {
        read_scores(BASE.as_bytes(), &default_ports())
    }

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn sdg_view_has_one_chart_per_port_with_distinct_item_spokes() -> Result<(), Box<dyn std::error::Error>> {
        let table = table()?;
        let view = sdg_view(&table, "SDG 1", "ALL", RadarFrame::Polygon);
        let charts = view.ready().ok_or("expected charts")?;

        assert_eq!(charts.len(), 6);
        assert_eq!(charts[0].title(), "Port A");
        assert_eq!(charts[0].labels(), ["1.00", "2.00", "3.00"]);
        let radii: Vec<f64> = charts[1].series()[0].polar.iter().map(|&(_, r)| r).collect();
        assert_eq!(radii, vec![2.0, 1.0, 2.0, 2.0]);
        Ok(())
    }

    #[test]
    fn area_restricts_the_spokes() -> Result<(), Box<dyn std::error::Error>> {
        let table = table()?;
        let view = sdg_view(&table, "SDG 1", "Social", RadarFrame::Circle);
        let charts = view.ready().ok_or("expected charts")?;
        assert_eq!(charts[0].labels(), ["1.00", "2.00"]);
        assert_eq!(charts[0].frame(), RadarFrame::Circle);
        Ok(())
    }

    #[test]
    fn blank_item_counts_as_one_spoke() -> Result<(), Box<dyn std::error::Error>> {
        let csv = "TEMA;AREA;ITEM_AJUST;Port A;Port B;Port C;Port D;Port E;Port F\n\
                   SDG 3;Social;1;1;1;1;1;1;1\n\
                   SDG 3;Social;;2;2;2;2;2;2\n\
                   SDG 3;Social;;3;3;3;3;3;3\n\
                   SDG 3;Social;2;0;0;0;0;0;0\n";
        let table = read_scores(csv.as_bytes(), &default_ports())?;

        let view = sdg_view(&table, "SDG 3", "ALL", RadarFrame::Polygon);
        let charts = view.ready().ok_or("expected charts")?;
        assert_eq!(charts[0].labels(), ["1.00", "", ""]);
        assert_eq!(charts[0].series()[0].values(), [1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn empty_selection_is_no_data_before_any_chart_is_built() -> Result<(), Box<dyn std::error::Error>> {
        let table = table()?;
        let view = sdg_view(&table, "SDG 2", "Social", RadarFrame::Polygon);
        assert!(matches!(view, ViewState::NoData(_)));
        assert_eq!(
            view.message(),
            Some("No data available for theme 'SDG 2' and area 'Social'.")
        );
        Ok(())
    }

    #[test]
    fn comparison_pairs_port_with_dashed_average() -> Result<(), Box<dyn std::error::Error>> {
        let table = table()?;
        let view = sdg_comparison_view(&table, "SDG 1", "Social", "Port C", RadarFrame::Polygon);
        let charts = view.ready().ok_or("expected charts")?;

        assert_eq!(charts.len(), 2);
        assert_eq!(charts[1].title(), AVERAGE_LABEL);
        let average = &charts[1].series()[0];
        assert!(average.role.dashed());
        assert_close(average.polar[0].1, 2.0);
        assert_close(average.polar[1].1, 2.0);
        Ok(())
    }

    #[test]
    fn unknown_port_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let table = table()?;
        let view = average_view(&table, "SDG 1", "Port Z", RadarFrame::Polygon);
        assert_eq!(view.message(), Some("Unknown port 'Port Z'."));
        Ok(())
    }

    #[test]
    fn average_view_titles_carry_the_theme() -> Result<(), Box<dyn std::error::Error>> {
        let table = table()?;
        let view = average_view(&table, "SDG 2", "Port B", RadarFrame::Polygon);
        let charts = view.ready().ok_or("expected charts")?;

        assert_eq!(charts[0].title(), "Port B - SDG 2");
        assert_eq!(charts[1].title(), "Average - SDG 2");
        assert_eq!(charts[0].spokes(), 1);
        Ok(())
    }

    #[test]
    fn per_port_view_spokes_are_sorted_themes() -> Result<(), Box<dyn std::error::Error>> {
        let table = table()?;
        let view = per_port_view(&table, RadarFrame::Polygon);
        let charts = view.ready().ok_or("expected charts")?;

        assert_eq!(charts.len(), 6);
        assert_eq!(charts[0].labels(), ["SDG 1", "SDG 2"]);
        assert_close(charts[0].series()[0].polar[0].1, 1.0);
        assert_close(charts[0].series()[0].polar[1].1, 3.0);
        Ok(())
    }

    #[test]
    fn attributes_view_groups_and_reports_empty() {
        let rows = vec![
            IndicatorRow {
                category: "SDG 6".to_string(),
                attribute: "Water".to_string(),
                area: "Environmental".to_string(),
                metric: "Consumption".to_string(),
            },
            IndicatorRow {
                category: "SDG 6".to_string(),
                attribute: "Water".to_string(),
                area: "Environmental".to_string(),
                metric: "Reuse".to_string(),
            },
        ];

        let view = attributes_view(&rows, "SDG 6", "All");
        assert_eq!(view.ready().map(GroupedTable::row_count), Some(2));

        let empty = attributes_view(&rows, "SDG 6", "Social");
        assert!(matches!(empty, ViewState::NoData(_)));
    }

    #[test]
    fn load_errors_become_failed_views() {
        let err = DataError::MissingColumns {
            missing: vec!["TEMA".to_string()],
        };
        assert_eq!(err.kind(), DataErrorKind::Schema);

        let view: ViewState<()> = ViewState::failed(&err);
        assert_eq!(
            view.message(),
            Some("Schema error: missing required columns: TEMA")
        );
    }
}
