pub mod screens;
pub mod widgets;

use crate::app::{App, Page};
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::Frame;
use screens::common::{render_help_popup, render_shortcuts, render_status, render_tabs};

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let [tabs_area, content, status_area, shortcuts_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(f.area().inner(Margin::new(1, 0)));

    render_tabs(app, f, tabs_area);

    match app.page {
        Page::Home => screens::home::render_home(app, f, content),
        Page::Attributes => screens::attributes::render_attributes(app, f, content),
        Page::ViewBySdg => screens::view_by_sdg::render_view_by_sdg(app, f, content),
        Page::SdgPerPort => screens::sdg_per_port::render_sdg_per_port(app, f, content),
        Page::SdgAverage => screens::sdg_average::render_sdg_average(app, f, content),
    }

    render_status(app, f, status_area);
    render_shortcuts(app, f, shortcuts_area);

    if app.show_help {
        let area = f.area();
        render_help_popup(f, area);
    }
}
