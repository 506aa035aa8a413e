use crate::app::App;
use crate::ui::screens::common::{render_heading, render_selectors, render_view_message};
use crate::ui::widgets::radar::render_chart_grid;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use sdg_port_radar::views::ViewState;

pub fn render_sdg_average(app: &App, f: &mut Frame<'_>, area: Rect) {
    let [selector_area, heading_area, body] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(6),
    ])
    .areas(area);

    render_selectors(app, f, selector_area);

    match app.average_charts() {
        ViewState::Ready(charts) => {
            render_heading(f, heading_area, "SDG per Port vs. Average per SDG");
            render_chart_grid(f, body, &charts, 2);
        }
        state => render_view_message(f, body, &state),
    }
}
