use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;
use sdg_port_radar::table::{GroupedTable, Tone};

const HEADER_BG: Color = Color::Rgb(0x33, 0x33, 0x33);

/// First row to draw so that `scroll` never runs past the last page of rows
pub const fn scroll_offset(total_rows: usize, max_visible_rows: usize, scroll: usize) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    let last_page = total_rows - max_visible_rows;
    if scroll > last_page {
        last_page
    } else {
        scroll
    }
}

/// Greedy word wrap; words longer than `width` are split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();

        if line.is_empty() {
            line = word;
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn tone_style(tone: Tone) -> Style {
    let (r, g, b) = tone.rgb();
    Style::default().bg(Color::Rgb(r, g, b)).fg(Color::Black)
}

/// Two-column table whose group cell is shown once per run, shaded per group
pub fn render_grouped_table(
    f: &mut Frame<'_>,
    area: Rect,
    table: &GroupedTable,
    headers: (&str, &str),
    scroll: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let group_width = (inner.width / 5 * 2).max(8);
    let detail_width = inner.width.saturating_sub(group_width + 1).max(8);

    let mut rows = Vec::with_capacity(table.row_count());
    for run in table.groups() {
        let style = tone_style(run.tone);
        let group_lines = wrap_text(&run.value, usize::from(group_width));

        for (index, detail) in run.details.iter().enumerate() {
            let detail_lines = wrap_text(detail, usize::from(detail_width));
            let group_cell = if index == 0 {
                group_lines.join("\n")
            } else {
                String::new()
            };
            let height = if index == 0 {
                detail_lines.len().max(group_lines.len())
            } else {
                detail_lines.len()
            };

            rows.push(
                Row::new(vec![
                    Cell::from(Text::from(group_cell)).style(style.add_modifier(Modifier::BOLD)),
                    Cell::from(Text::from(detail_lines.join("\n"))),
                ])
                .style(style)
                .height(u16::try_from(height).unwrap_or(u16::MAX)),
            );
        }
    }

    let max_visible_rows = usize::from(inner.height.saturating_sub(1));
    let offset = scroll_offset(rows.len(), max_visible_rows, scroll);

    let header = Row::new(vec![Cell::from(headers.0), Cell::from(headers.1)]).style(
        Style::default()
            .bg(HEADER_BG)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let widget = Table::new(
        rows.into_iter().skip(offset),
        [Constraint::Length(group_width), Constraint::Min(detail_width)],
    )
    .header(header)
    .block(block)
    .column_spacing(1);

    f.render_widget(widget, area);
}
