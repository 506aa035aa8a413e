use crate::app::{App, Selector};
use crate::ui::screens::common::{render_heading, render_selectors, render_view_message};
use crate::ui::widgets::radar::render_chart_grid;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use sdg_port_radar::views::ViewState;

const GRID_COLUMNS: usize = 3;

pub fn render_view_by_sdg(app: &App, f: &mut Frame<'_>, area: Rect) {
    let [selector_area, heading_area, body] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(6),
    ])
    .areas(area);

    render_selectors(app, f, selector_area);

    let (heading, state, columns) = if app.comparison {
        (
            format!("Comparison of {} with the Average", app.port()),
            app.sdg_comparison(),
            2,
        )
    } else {
        (
            format!(
                "{} - Area: {}",
                app.theme(),
                app.selected(Selector::ScoreArea)
            ),
            app.sdg_charts(),
            GRID_COLUMNS,
        )
    };

    match state {
        ViewState::Ready(charts) => {
            render_heading(f, heading_area, &heading);
            render_chart_grid(f, body, &charts, columns);
        }
        state => render_view_message(f, body, &state),
    }
}
