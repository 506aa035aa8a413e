use crate::app::{App, Page};
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use sdg_port_radar::views::ViewState;

pub fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Page::ALL
        .iter()
        .map(|page| format!("{} {}", page.index() + 1, page.label()));

    let tabs = Tabs::new(titles)
        .select(app.page.index())
        .block(
            Block::default()
                .title("== SDG Attributes: Indicators of the Port Sector ==")
                .title_style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0x00, 0xA3, 0x6C))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

/// One box per selector of the page; the focused one is highlighted
pub fn render_selectors(app: &App, f: &mut Frame<'_>, area: Rect) {
    let selectors = app.page.selectors();
    if selectors.is_empty() {
        return;
    }

    let boxes = Layout::horizontal(vec![Constraint::Fill(1); selectors.len()]).split(area);
    for (position, (selector, cell)) in selectors.iter().zip(boxes.iter()).enumerate() {
        let focused = position == app.focus;
        let color = if focused { Color::Yellow } else { Color::DarkGray };
        let options = app.options(*selector);
        let value = app.selected(*selector);
        let counter = if options.is_empty() {
            String::new()
        } else {
            format!(
                " ({}/{})",
                app.selected_index(*selector).min(options.len() - 1) + 1,
                options.len()
            )
        };

        let line = TextLine::from(vec![
            Span::styled("◀ ", Style::default().fg(color)),
            Span::styled(
                if value.is_empty() { "(none)".to_string() } else { value },
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(color)),
            Span::styled(counter, Style::default().fg(Color::Gray)),
        ]);

        let paragraph = Paragraph::new(line).block(
            Block::default()
                .title(format!(" {} ", selector.label()))
                .title_style(Style::default().fg(color))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(paragraph, *cell);
    }
}

pub fn render_heading(f: &mut Frame<'_>, area: Rect, text: &str) {
    let heading = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(heading, area);
}

/// Explanatory text shown in place of a view that has nothing to draw
pub fn render_view_message<T>(f: &mut Frame<'_>, area: Rect, state: &ViewState<T>) {
    let (title, color) = match state {
        ViewState::Failed(_) => (" Error ", Color::Red),
        ViewState::NoData(_) | ViewState::Ready(_) => (" No data ", Color::Yellow),
    };

    let paragraph = Paragraph::new(state.message().unwrap_or_default().to_string())
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.contains("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status_paragraph = Paragraph::new(Span::styled(app.status_message.as_str(), style))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn shortcut(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::styled(action, Style::default().fg(Color::Gray)),
    ]
}

pub fn shortcuts_line(page: Page) -> TextLine<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    spans.extend(shortcut("Tab/1-5", " pages  "));
    if !page.selectors().is_empty() {
        spans.extend(shortcut("↑/↓", " focus  "));
        spans.extend(shortcut("←/→", " change  "));
    }
    match page {
        Page::ViewBySdg => spans.extend(shortcut("c", " compare  ")),
        Page::Attributes => spans.extend(shortcut("PgUp/PgDn", " scroll  ")),
        Page::Home | Page::SdgPerPort | Page::SdgAverage => {}
    }
    if !matches!(page, Page::Home | Page::Attributes) {
        spans.extend(shortcut("f", " frame  "));
    }
    spans.extend(shortcut("r", " reload  "));
    spans.extend(shortcut("F1", " help  "));
    spans.extend(shortcut("q", " quit"));
    TextLine::from(spans)
}

pub fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let shortcuts_paragraph = Paragraph::new(shortcuts_line(app.page)).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let heading = |text: &'static str| {
        TextLine::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |key: &'static str, action: &'static str| {
        TextLine::from(vec![
            Span::styled(format!("{key:<12}"), Style::default().fg(Color::Yellow)),
            Span::raw(action),
        ])
    };

    vec![
        heading("Navigation"),
        entry("Tab", "Next page"),
        entry("Shift-Tab", "Previous page"),
        entry("1-5", "Go to page"),
        TextLine::from(""),
        heading("Selectors"),
        entry("↑ / ↓", "Move focus between selectors"),
        entry("← / →", "Change the focused selector"),
        TextLine::from(""),
        heading("Charts and tables"),
        entry("c", "View by SDG: compare the selected port with the average"),
        entry("f", "Switch the radar frame between polygon and circle"),
        entry("PgUp / PgDn", "Scroll the attributes table"),
        TextLine::from(""),
        heading("Session"),
        entry("r", "Reload the data files"),
        entry("F1", "Toggle this help"),
        entry("q", "Quit"),
    ]
}

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &TextLine<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn shortcuts_match_the_page() {
        assert!(text(&shortcuts_line(Page::ViewBySdg)).contains("compare"));
        assert!(!text(&shortcuts_line(Page::Home)).contains("change"));
        assert!(text(&shortcuts_line(Page::Attributes)).contains("scroll"));
    }
}
