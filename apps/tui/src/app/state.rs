use crate::app::input::{wrap_decrement, wrap_increment};
use sdg_port_radar::chart::{RadarChart, RadarFrame};
use sdg_port_radar::config::AppConfig;
use sdg_port_radar::data::{area_options, distinct, Session};
use sdg_port_radar::domain::{is_all, Field, ALL_AREAS};
use sdg_port_radar::table::GroupedTable;
use sdg_port_radar::views::{
    attributes_view, average_view, per_port_view, sdg_comparison_view, sdg_view, ViewState,
};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Attributes,
    ViewBySdg,
    SdgPerPort,
    SdgAverage,
}

impl Page {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Attributes,
        Self::ViewBySdg,
        Self::SdgPerPort,
        Self::SdgAverage,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Attributes => 1,
            Self::ViewBySdg => 2,
            Self::SdgPerPort => 3,
            Self::SdgAverage => 4,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Home),
            1 => Some(Self::Attributes),
            2 => Some(Self::ViewBySdg),
            3 => Some(Self::SdgPerPort),
            4 => Some(Self::SdgAverage),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Attributes => "SDG Attributes Table",
            Self::ViewBySdg => "View by SDG",
            Self::SdgPerPort => "SDG per Port",
            Self::SdgAverage => "SDG and Average",
        }
    }

    /// Selectors shown on the page, in focus order
    pub const fn selectors(self) -> &'static [Selector] {
        match self {
            Self::Home | Self::SdgPerPort => &[],
            Self::Attributes => &[Selector::Category, Selector::IndicatorArea],
            Self::ViewBySdg => &[Selector::Theme, Selector::ScoreArea, Selector::Port],
            Self::SdgAverage => &[Selector::Port, Selector::AverageTheme],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Category,
    IndicatorArea,
    Theme,
    ScoreArea,
    Port,
    AverageTheme,
}

impl Selector {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Select an SDG",
            Self::IndicatorArea => "Filter by AREA",
            Self::Theme => "Select SDG",
            Self::ScoreArea => "Select Area",
            Self::Port => "Select Port",
            Self::AverageTheme => "SDG",
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub page: Page,
    pub focus: usize,
    pub show_help: bool,
    pub status_message: String,
    pub frame: RadarFrame,
    pub comparison: bool,
    pub table_scroll: usize,
    session: Session,
    category_index: usize,
    indicator_area_index: usize,
    theme_index: usize,
    score_area_index: usize,
    port_index: usize,
    average_theme_index: usize,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_session(Session::open(config))
    }

    pub fn with_session(session: Session) -> Self {
        let mut app = Self {
            running: true,
            page: Page::Home,
            focus: 0,
            show_help: false,
            status_message: String::new(),
            frame: RadarFrame::default(),
            comparison: false,
            table_scroll: 0,
            session,
            category_index: 0,
            indicator_area_index: 0,
            theme_index: 0,
            score_area_index: 0,
            port_index: 0,
            average_theme_index: 0,
        };
        app.status_message = app.load_summary();
        app
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub fn reload(&mut self) {
        self.session.reload();
        self.clamp_indices();
        self.status_message = format!("Reloaded. {}", self.load_summary());
        info!("data files reloaded");
    }

    fn load_summary(&self) -> String {
        let indicators = match self.session.indicators() {
            Ok(rows) => format!("{} indicator rows", rows.len()),
            Err(err) => format!("Error: indicators: {err}"),
        };
        let scores = match self.session.scores() {
            Ok(table) => format!("{} score rows", table.rows().len()),
            Err(err) => format!("Error: scores: {err}"),
        };
        format!("{indicators}; {scores}")
    }

    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.focus = 0;
            self.table_scroll = 0;
        }
    }

    pub fn next_page(&mut self) {
        let next = wrap_increment(self.page.index(), Page::ALL.len());
        self.set_page(Page::ALL[next]);
    }

    pub fn previous_page(&mut self) {
        let previous = wrap_decrement(self.page.index(), Page::ALL.len());
        self.set_page(Page::ALL[previous]);
    }

    pub fn focused_selector(&self) -> Option<Selector> {
        self.page.selectors().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        self.focus = wrap_increment(self.focus, self.page.selectors().len());
    }

    pub fn focus_previous(&mut self) {
        self.focus = wrap_decrement(self.focus, self.page.selectors().len());
    }

    pub fn options(&self, selector: Selector) -> Vec<String> {
        match selector {
            Selector::Category => self
                .session
                .indicators()
                .map(|rows| distinct(rows, Field::Category))
                .unwrap_or_default(),
            Selector::IndicatorArea => self.session.indicators().map_or_else(
                |_| vec![ALL_AREAS.to_string()],
                |rows| area_options(rows, Field::Category, &self.category()),
            ),
            Selector::Theme | Selector::AverageTheme => self
                .session
                .scores()
                .map(|table| distinct(table.rows(), Field::Theme))
                .unwrap_or_default(),
            Selector::ScoreArea => self.session.scores().map_or_else(
                |_| vec![ALL_AREAS.to_string()],
                |table| area_options(table.rows(), Field::Theme, &self.theme()),
            ),
            Selector::Port => self.session.config().ports.clone(),
        }
    }

    pub const fn selected_index(&self, selector: Selector) -> usize {
        match selector {
            Selector::Category => self.category_index,
            Selector::IndicatorArea => self.indicator_area_index,
            Selector::Theme => self.theme_index,
            Selector::ScoreArea => self.score_area_index,
            Selector::Port => self.port_index,
            Selector::AverageTheme => self.average_theme_index,
        }
    }

    /// Current value of a selector; blank when it has no options
    pub fn selected(&self, selector: Selector) -> String {
        let options = self.options(selector);
        options
            .get(self.selected_index(selector))
            .or_else(|| options.first())
            .cloned()
            .unwrap_or_default()
    }

    pub fn category(&self) -> String {
        self.selected(Selector::Category)
    }

    pub fn theme(&self) -> String {
        self.selected(Selector::Theme)
    }

    pub fn port(&self) -> String {
        self.selected(Selector::Port)
    }

    fn index_mut(&mut self, selector: Selector) -> &mut usize {
        match selector {
            Selector::Category => &mut self.category_index,
            Selector::IndicatorArea => &mut self.indicator_area_index,
            Selector::Theme => &mut self.theme_index,
            Selector::ScoreArea => &mut self.score_area_index,
            Selector::Port => &mut self.port_index,
            Selector::AverageTheme => &mut self.average_theme_index,
        }
    }

    /// Moves a selector to its next (`forward`) or previous option.
    /// Changing a category or theme resets its dependent area selector to "ALL".
    pub fn cycle(&mut self, selector: Selector, forward: bool) {
        let len = self.options(selector).len();
        let index = self.index_mut(selector);
        *index = if forward {
            wrap_increment(*index, len)
        } else {
            wrap_decrement(*index, len)
        };
        self.after_change(selector);
    }

    /// Selects an option by value; returns false when it is not offered
    pub fn select(&mut self, selector: Selector, value: &str) -> bool {
        let options = self.options(selector);
        let position = options.iter().position(|option| {
            option == value
                || (matches!(selector, Selector::IndicatorArea | Selector::ScoreArea)
                    && is_all(option)
                    && is_all(value))
        });

        match position {
            Some(position) => {
                *self.index_mut(selector) = position;
                self.after_change(selector);
                true
            }
            None => false,
        }
    }

    fn after_change(&mut self, selector: Selector) {
        match selector {
            Selector::Category => self.indicator_area_index = 0,
            Selector::Theme => self.score_area_index = 0,
            Selector::IndicatorArea | Selector::ScoreArea | Selector::Port | Selector::AverageTheme => {}
        }
        self.table_scroll = 0;
    }

    fn clamp_indices(&mut self) {
        for selector in [
            Selector::Category,
            Selector::IndicatorArea,
            Selector::Theme,
            Selector::ScoreArea,
            Selector::Port,
            Selector::AverageTheme,
        ] {
            let len = self.options(selector).len();
            let index = self.index_mut(selector);
            if *index >= len {
                *index = 0;
            }
        }
        self.table_scroll = 0;
    }

    pub fn toggle_frame(&mut self) {
        self.frame = self.frame.toggled();
        self.status_message = format!("Radar frame: {}", self.frame.as_str());
    }

    pub fn toggle_comparison(&mut self) {
        self.comparison = !self.comparison;
    }

    pub fn attributes(&self) -> ViewState<GroupedTable> {
        match self.session.indicators() {
            Ok(rows) => attributes_view(
                rows,
                &self.category(),
                &self.selected(Selector::IndicatorArea),
            ),
            Err(err) => ViewState::failed(err),
        }
    }

    pub fn sdg_charts(&self) -> ViewState<Vec<RadarChart>> {
        match self.session.scores() {
            Ok(table) => sdg_view(
                table,
                &self.theme(),
                &self.selected(Selector::ScoreArea),
                self.frame,
            ),
            Err(err) => ViewState::failed(err),
        }
    }

    pub fn sdg_comparison(&self) -> ViewState<Vec<RadarChart>> {
        match self.session.scores() {
            Ok(table) => sdg_comparison_view(
                table,
                &self.theme(),
                &self.selected(Selector::ScoreArea),
                &self.port(),
                self.frame,
            ),
            Err(err) => ViewState::failed(err),
        }
    }

    pub fn per_port_charts(&self) -> ViewState<Vec<RadarChart>> {
        match self.session.scores() {
            Ok(table) => per_port_view(table, self.frame),
            Err(err) => ViewState::failed(err),
        }
    }

    pub fn average_charts(&self) -> ViewState<Vec<RadarChart>> {
        match self.session.scores() {
            Ok(table) => average_view(
                table,
                &self.selected(Selector::AverageTheme),
                &self.port(),
                self.frame,
            ),
            Err(err) => ViewState::failed(err),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use sdg_port_radar::config::default_ports;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const INDICATORS: &str = "CATEGORY;ATTRIBUTE;AREA;METRIC\n\
                              SDG 6;Water;Environmental;Consumption\n\
                              ;;Environmental;Reuse\n\
                              SDG 7;Energy;Economic;Renewables\n\
                              ;;Social;Training\n";

    const SCORES: &str = "TEMA;AREA;ITEM_AJUST;Port A;Port B;Port C;Port D;Port E;Port F\n\
                          SDG 1;Social;1;1;2;3;3;2;1\n\
                          SDG 1;Environmental;2;0;1;2;3;3;3\n\
                          SDG 2;Economic;1;3;3;3;3;3;3\n";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// App over small fixture files; the files live as long as the returned dir
    pub fn fixture_app() -> std::io::Result<(App, TempDir)> {
        let dir = TempDir::new()?;
        let config = AppConfig {
            indicators_path: write_file(&dir, "sheet.csv", INDICATORS)?,
            scores_path: write_file(&dir, "BASE.csv", SCORES)?,
            ports: default_ports(),
            log_file: PathBuf::from("unused.log"),
            debug: false,
        };
        Ok((App::new(config), dir))
    }

    #[test]
    fn pages_wrap_in_both_directions() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;
        assert_eq!(app.page, Page::Home);

        app.previous_page();
        assert_eq!(app.page, Page::SdgAverage);
        app.next_page();
        app.next_page();
        assert_eq!(app.page, Page::Attributes);
        assert_eq!(Page::from_index(app.page.index()), Some(Page::Attributes));
        Ok(())
    }

    #[test]
    fn changing_category_resets_area_to_all() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;
        assert_eq!(app.options(Selector::Category), vec!["SDG 6", "SDG 7"]);

        assert!(app.select(Selector::Category, "SDG 7"));
        assert_eq!(
            app.options(Selector::IndicatorArea),
            vec!["ALL", "Economic", "Social"]
        );
        assert!(app.select(Selector::IndicatorArea, "Social"));

        app.cycle(Selector::Category, true);
        assert_eq!(app.category(), "SDG 6");
        assert_eq!(app.selected(Selector::IndicatorArea), "ALL");
        Ok(())
    }

    #[test]
    fn all_spelling_selects_the_sentinel() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;
        assert!(app.select(Selector::ScoreArea, "All"));
        assert!(!app.select(Selector::Theme, "SDG 99"));
        Ok(())
    }

    #[test]
    fn views_follow_the_selection() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;

        let table = app.attributes();
        assert_eq!(table.ready().map(GroupedTable::row_count), Some(2));

        assert!(app.select(Selector::Theme, "SDG 1"));
        assert!(app.select(Selector::ScoreArea, "Social"));
        let charts = app.sdg_charts();
        assert_eq!(charts.ready().map(|charts| charts[0].spokes()), Some(1));

        assert!(app.select(Selector::Port, "Port C"));
        let comparison = app.sdg_comparison();
        assert_eq!(comparison.ready().map(Vec::len), Some(2));

        assert_eq!(app.per_port_charts().ready().map(Vec::len), Some(6));
        Ok(())
    }

    #[test]
    fn missing_files_fail_only_their_views() {
        let config = AppConfig {
            indicators_path: PathBuf::from("/nonexistent/sheet.xlsx"),
            scores_path: PathBuf::from("/nonexistent/BASE.csv"),
            ports: default_ports(),
            log_file: PathBuf::from("unused.log"),
            debug: false,
        };
        let app = App::new(config);

        assert!(matches!(app.attributes(), ViewState::Failed(_)));
        assert!(matches!(app.average_charts(), ViewState::Failed(_)));
        assert!(app.status_message.contains("Error"));
        assert_eq!(app.options(Selector::Port).len(), 6);
    }

    #[test]
    fn focus_cycles_through_page_selectors() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;
        app.set_page(Page::ViewBySdg);
        assert_eq!(app.focused_selector(), Some(Selector::Theme));

        app.focus_previous();
        assert_eq!(app.focused_selector(), Some(Selector::Port));

        app.set_page(Page::SdgPerPort);
        app.focus_next();
        assert_eq!(app.focused_selector(), None);
        Ok(())
    }
}
