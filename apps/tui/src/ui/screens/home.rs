use crate::app::App;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn bold(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
}

fn about_lines() -> Vec<TextLine<'static>> {
    vec![
        TextLine::from(Span::styled(
            "SDG Attributes",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled("About the Project", Style::default().fg(Color::Cyan))),
        TextLine::from(vec![
            Span::raw("This model is part of the project "),
            bold("\"Green Port Complex: Proposed Indicators Linked to the SDGs\""),
            Span::raw(", led by "),
            bold("Darliane Cunha"),
            Span::raw(" and "),
            bold("Clóvis Oliveira"),
            Span::raw(", with financial support from the "),
            bold("Foundation for Research and Scientific and Technological Development of Maranhão (FAPEMA)"),
            Span::raw(" and the "),
            bold("Maranhão Port Administration Company (EMAP)"),
            Span::raw("."),
        ]),
        TextLine::from(""),
        TextLine::from("The model was conceived by:"),
        TextLine::from(vec![Span::raw("  - "), bold("Darliane Cunha")]),
        TextLine::from(vec![Span::raw("  - "), bold("Clóvis Oliveira")]),
        TextLine::from(vec![Span::raw("  - "), bold("Markus Carneiro Costa")]),
        TextLine::from(""),
        TextLine::from("The data visualization tool was developed by:"),
        TextLine::from(vec![Span::raw("  - "), bold("Markus Carneiro Costa")]),
    ]
}

fn data_lines(app: &App) -> Vec<TextLine<'static>> {
    let config = app.session().config();
    let state = |loaded: bool| {
        if loaded {
            Span::styled("loaded", Style::default().fg(Color::Green))
        } else {
            Span::styled("unavailable", Style::default().fg(Color::Red))
        }
    };

    vec![
        TextLine::from(vec![
            Span::styled("Indicators: ", Style::default().fg(Color::Gray)),
            Span::raw(config.indicators_path.display().to_string()),
            Span::raw("  "),
            state(app.session().indicators().is_ok()),
        ]),
        TextLine::from(vec![
            Span::styled("Scores:     ", Style::default().fg(Color::Gray)),
            Span::raw(config.scores_path.display().to_string()),
            Span::raw("  "),
            state(app.session().scores().is_ok()),
        ]),
        TextLine::from(vec![
            Span::styled("Ports:      ", Style::default().fg(Color::Gray)),
            Span::raw(config.ports.join(", ")),
        ]),
    ]
}

pub fn render_home(app: &App, f: &mut Frame<'_>, area: Rect) {
    let [about_area, data_area] =
        Layout::vertical([Constraint::Min(8), Constraint::Length(5)]).areas(area);

    let about = Paragraph::new(Text::from(about_lines()))
        .block(
            Block::default()
                .title(" Home ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(about, about_area);

    let data = Paragraph::new(Text::from(data_lines(app))).block(
        Block::default()
            .title(" Data ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(data, data_area);
}
