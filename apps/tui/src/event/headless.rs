use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use sdg_port_radar::chart::{to_svg, RadarChart, RadarFrame};
use sdg_port_radar::markup::escape;
use sdg_port_radar::table::GroupedTable;
use sdg_port_radar::views::{average_view, sdg_comparison_view, ViewState};
use sdg_port_radar::Field;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::app::{App, Selector};
use crate::cli::CliArgs;

const SVG_SIZE: u32 = 480;

/// Selection and output choices of a headless run
#[derive(Debug, Default)]
pub struct HeadlessOptions {
    pub json: bool,
    pub category: Option<String>,
    pub theme: Option<String>,
    pub area: Option<String>,
    pub port: Option<String>,
    pub frame: Option<String>,
    pub export: Option<PathBuf>,
}

impl From<&CliArgs> for HeadlessOptions {
    fn from(args: &CliArgs) -> Self {
        Self {
            json: args.json,
            category: args.category.clone(),
            theme: args.theme.clone(),
            area: args.area.clone(),
            port: args.port.clone(),
            frame: args.frame.clone(),
            export: args.export.clone(),
        }
    }
}

/// Run the application in headless mode (no UI)
pub fn run_headless(app: &mut App, options: &HeadlessOptions) -> Result<()> {
    apply_selection(app, options)?;
    let report = build_report(app);

    if options.json {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    if let Some(dir) = &options.export {
        let written = export(app, dir)?;
        info!(dir = %dir.display(), files = written.len(), "exported views");
        if !options.json {
            println!("\nExported {} files to {}", written.len(), dir.display());
        }
    }

    Ok(())
}

fn apply_selection(app: &mut App, options: &HeadlessOptions) -> Result<()> {
    if let Some(category) = &options.category {
        if !app.select(Selector::Category, category) {
            bail!("unknown SDG category '{category}'");
        }
    }

    if let Some(theme) = &options.theme {
        let theme_found = app.select(Selector::Theme, theme);
        let average_found = app.select(Selector::AverageTheme, theme);
        if !(theme_found || average_found) {
            bail!("unknown SDG theme '{theme}'");
        }
    }

    if let Some(area) = &options.area {
        let indicator_area = app.select(Selector::IndicatorArea, area);
        let score_area = app.select(Selector::ScoreArea, area);
        if !(indicator_area || score_area) {
            warn!(area = area.as_str(), "area not offered by the current selection");
        }
    }

    if let Some(port) = &options.port {
        if !app.select(Selector::Port, port) {
            bail!("unknown port '{port}'");
        }
    }

    if let Some(frame) = &options.frame {
        app.frame = RadarFrame::parse(frame)
            .ok_or_else(|| eyre!("unknown radar frame '{frame}', expected circle or polygon"))?;
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct HeadlessReport {
    indicators_path: String,
    scores_path: String,
    ports: Vec<String>,
    selection: HeadlessSelection,
    attributes: ViewState<GroupedTable>,
    view_by_sdg: ViewState<Vec<RadarChart>>,
    comparison: ViewState<Vec<RadarChart>>,
    sdg_per_port: ViewState<Vec<RadarChart>>,
    sdg_and_average: ViewState<Vec<RadarChart>>,
    theme_means: Option<BTreeMap<String, BTreeMap<String, f64>>>,
}

#[derive(Debug, Serialize)]
struct HeadlessSelection {
    category: String,
    indicator_area: String,
    theme: String,
    score_area: String,
    port: String,
    average_theme: String,
}

fn build_report(app: &App) -> HeadlessReport {
    let config = app.session().config();
    let theme_means = app
        .session()
        .scores()
        .ok()
        .map(|table| sdg_port_radar::data::aggregate_by_theme(table).as_mapping());

    HeadlessReport {
        indicators_path: config.indicators_path.display().to_string(),
        scores_path: config.scores_path.display().to_string(),
        ports: config.ports.clone(),
        selection: HeadlessSelection {
            category: app.category(),
            indicator_area: app.selected(Selector::IndicatorArea),
            theme: app.theme(),
            score_area: app.selected(Selector::ScoreArea),
            port: app.port(),
            average_theme: app.selected(Selector::AverageTheme),
        },
        attributes: app.attributes(),
        view_by_sdg: app.sdg_charts(),
        comparison: app.sdg_comparison(),
        sdg_per_port: app.per_port_charts(),
        sdg_and_average: app.average_charts(),
        theme_means,
    }
}

fn print_report(report: &HeadlessReport) {
    let selection = &report.selection;

    println!("\nSDG Attributes Table");
    println!("====================");
    println!(
        "{}: {} | {}: {}",
        Field::Category.label(),
        selection.category,
        Field::Area.label(),
        selection.indicator_area
    );
    match &report.attributes {
        ViewState::Ready(table) => print_table(table),
        state => print_message(state),
    }

    println!("\nView by SDG");
    println!("===========");
    println!("{} - Area: {}", selection.theme, selection.score_area);
    print_charts(&report.view_by_sdg);

    println!("\nComparison of {} with the Average", selection.port);
    print_charts(&report.comparison);

    println!("\nSDG per Port");
    println!("============");
    print_charts(&report.sdg_per_port);

    println!("\nSDG per Port vs. Average per SDG");
    println!("================================");
    print_charts(&report.sdg_and_average);
}

fn print_message<T>(state: &ViewState<T>) {
    if let Some(message) = state.message() {
        println!("{message}");
    }
}

fn print_table(table: &GroupedTable) {
    for run in table.groups() {
        println!("- {}", run.value);
        for detail in &run.details {
            println!("    {detail}");
        }
    }
}

fn print_charts(state: &ViewState<Vec<RadarChart>>) {
    let ViewState::Ready(charts) = state else {
        print_message(state);
        return;
    };

    for chart in charts {
        for series in chart.series() {
            let values = chart
                .labels()
                .iter()
                .zip(series.values())
                .map(|(label, value)| format!("{label}={value:.2}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!("- {}: {values}", chart.title());
        }
    }
}

/// File-name friendly form of a label
fn slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

fn write_file(dir: &Path, name: &str, contents: &str, written: &mut Vec<PathBuf>) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|e| eyre!("Failed to write {}: {e}", path.display()))?;
    written.push(path);
    Ok(())
}

fn write_charts(
    dir: &Path,
    prefix: &str,
    state: &ViewState<Vec<RadarChart>>,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    match state {
        ViewState::Ready(charts) => {
            for chart in charts {
                let name = format!("{prefix}_{}.svg", slug(chart.title()));
                write_file(dir, &name, &to_svg(chart, SVG_SIZE), written)?;
            }
        }
        state => {
            if let Some(message) = state.message() {
                warn!(view = prefix, message, "skipped export");
            }
        }
    }
    Ok(())
}

/// Writes the attributes table as HTML and every radar view as SVG
fn export(app: &App, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let category = app.category();
    let html = match app.attributes() {
        ViewState::Ready(table) => format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>SDG Attributes Table</title></head>\n<body>\n<h3>Filtered Results for {}</h3>\n{}</body>\n</html>\n",
            escape(&category),
            table.to_html(Field::Attribute.column(), Field::Metric.column())
        ),
        state => format!("<p>{}</p>\n", escape(state.message().unwrap_or_default())),
    };
    write_file(dir, &format!("attributes_{}.html", slug(&category)), &html, &mut written)?;

    let selected_theme = app.theme();
    let theme = slug(&selected_theme);
    write_charts(dir, &format!("view_by_sdg_{theme}"), &app.sdg_charts(), &mut written)?;
    write_charts(dir, "sdg_per_port", &app.per_port_charts(), &mut written)?;

    if let Ok(table) = app.session().scores() {
        let area = app.selected(Selector::ScoreArea);
        for port in table.ports() {
            let state = sdg_comparison_view(table, &selected_theme, &area, port, app.frame);
            write_charts(dir, &format!("comparison_{theme}_{}", slug(port)), &state, &mut written)?;
        }

        let port = app.port();
        for theme in sdg_port_radar::data::distinct(table.rows(), Field::Theme) {
            let state = average_view(table, &theme, &port, app.frame);
            write_charts(dir, &format!("sdg_average_{}", slug(&theme)), &state, &mut written)?;
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::fixture_app;
    use tempfile::TempDir;

    #[test]
    fn slug_keeps_alphanumerics() {
        assert_eq!(slug("SDG 1"), "sdg_1");
        assert_eq!(slug("Port A - SDG 14"), "port_a_sdg_14");
        assert_eq!(slug("  Água & Energia "), "gua_energia");
    }

    #[test]
    fn selection_flags_are_applied() -> Result<()> {
        let (mut app, _dir) = fixture_app()?;
        let options = HeadlessOptions {
            theme: Some("SDG 2".to_string()),
            area: Some("All".to_string()),
            port: Some("Port D".to_string()),
            ..HeadlessOptions::default()
        };
        apply_selection(&mut app, &options)?;

        let report = build_report(&app);
        assert_eq!(report.selection.theme, "SDG 2");
        assert_eq!(report.selection.average_theme, "SDG 2");
        assert_eq!(report.selection.port, "Port D");
        assert!(report.theme_means.is_some());
        Ok(())
    }

    #[test]
    fn frame_flag_switches_the_radar_outline() -> Result<()> {
        let (mut app, _dir) = fixture_app()?;
        let options = HeadlessOptions {
            frame: Some("Circle".to_string()),
            ..HeadlessOptions::default()
        };
        apply_selection(&mut app, &options)?;
        assert_eq!(app.frame, RadarFrame::Circle);

        let options = HeadlessOptions {
            frame: Some("hexagon".to_string()),
            ..HeadlessOptions::default()
        };
        assert!(apply_selection(&mut app, &options).is_err());
        Ok(())
    }

    #[test]
    fn unknown_port_is_an_error() -> Result<()> {
        let (mut app, _dir) = fixture_app()?;
        let options = HeadlessOptions {
            port: Some("Port Z".to_string()),
            ..HeadlessOptions::default()
        };
        assert!(apply_selection(&mut app, &options).is_err());
        Ok(())
    }

    #[test]
    fn export_writes_html_and_svgs() -> Result<()> {
        let (app, _fixtures) = fixture_app()?;
        let out = TempDir::new()?;
        let dir = out.path().join("export");

        let written = export(&app, &dir)?;
        assert!(written.iter().any(|path| path.extension().is_some_and(|ext| ext == "html")));
        assert!(dir.join("sdg_per_port_port_a.svg").exists());
        assert!(dir.join("sdg_average_sdg_2_average_sdg_2.svg").exists());

        for port in ["port_a", "port_f"] {
            assert!(dir.join(format!("comparison_sdg_1_{port}_{port}.svg")).exists());
        }

        let html = fs::read_to_string(dir.join("attributes_sdg_6.html"))?;
        assert!(html.contains("rowspan='2'"));
        Ok(())
    }
}
