use crate::app::App;
use crate::ui::screens::common::{render_heading, render_view_message};
use crate::ui::widgets::radar::render_chart_grid;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use sdg_port_radar::views::ViewState;

pub fn render_sdg_per_port(app: &App, f: &mut Frame<'_>, area: Rect) {
    let [heading_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(6)]).areas(area);

    match app.per_port_charts() {
        ViewState::Ready(charts) => {
            render_heading(f, heading_area, "Mean score per SDG for each port");
            render_chart_grid(f, body, &charts, 3);
        }
        state => render_view_message(f, body, &state),
    }
}
