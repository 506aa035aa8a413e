use crate::app::App;
use crate::ui::screens::common::{render_heading, render_selectors, render_view_message};
use crate::ui::widgets::tables::render_grouped_table;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use sdg_port_radar::views::ViewState;
use sdg_port_radar::Field;

pub fn render_attributes(app: &App, f: &mut Frame<'_>, area: Rect) {
    let [selector_area, heading_area, body] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(area);

    render_selectors(app, f, selector_area);

    match app.attributes() {
        ViewState::Ready(table) => {
            render_heading(f, heading_area, &format!("Filtered Results for {}", app.category()));
            render_grouped_table(
                f,
                body,
                &table,
                (Field::Attribute.column(), Field::Metric.column()),
                app.table_scroll,
            );
        }
        state => render_view_message(f, body, &state),
    }
}
