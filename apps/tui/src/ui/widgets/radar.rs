use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use sdg_port_radar::chart::{Outline, PlottedSeries, RadarChart, SeriesRole};

/// Half-width of the plotted square in chart units, room for the spoke labels
const EXTENT: f64 = 1.4;
const DASH: f64 = 0.06;

pub fn series_color(role: SeriesRole) -> Color {
    role.color().parse().unwrap_or(Color::Green)
}

/// Canvas bounds that keep the frame round: a cell is about twice as tall as wide.
pub fn canvas_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    let width = f64::from(width.max(1)) * 0.5;
    let height = f64::from(height.max(1));

    if width >= height {
        let ratio = width / height;
        ([-EXTENT * ratio, EXTENT * ratio], [-EXTENT, EXTENT])
    } else {
        let ratio = height / width;
        ([-EXTENT, EXTENT], [-EXTENT * ratio, EXTENT * ratio])
    }
}

/// Fill spacing: denser hatching for more opaque series
pub fn fill_step(opacity: f64) -> f64 {
    0.02 / opacity.max(0.05)
}

/// Even-odd test against a closed vertex loop
pub fn contains(polygon: &[(f64, f64)], (x, y): (f64, f64)) -> bool {
    let mut inside = false;
    for edge in polygon.windows(2) {
        let ((x1, y1), (x2, y2)) = (edge[0], edge[1]);
        if (y1 > y) != (y2 > y) && x < (x2 - x1) * (y - y1) / (y2 - y1) + x1 {
            inside = !inside;
        }
    }
    inside
}

/// Grid points inside the polygon, `step` apart, clipped to the canvas bounds
pub fn fill_points(
    polygon: &[(f64, f64)],
    step: f64,
    (x_bounds, y_bounds): ([f64; 2], [f64; 2]),
) -> Vec<(f64, f64)> {
    if polygon.len() < 4 || step <= 0.0 {
        return Vec::new();
    }
    if polygon.iter().any(|&(x, y)| !x.is_finite() || !y.is_finite()) {
        return Vec::new();
    }

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for &(x, y) in polygon {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    let (min_x, max_x) = (min_x.max(x_bounds[0]), max_x.min(x_bounds[1]));
    let (min_y, max_y) = (min_y.max(y_bounds[0]), max_y.min(y_bounds[1]));

    let mut points = Vec::new();
    let mut x = min_x;
    while x <= max_x {
        let mut y = min_y;
        while y <= max_y {
            if contains(polygon, (x, y)) {
                points.push((x, y));
            }
            y += step;
        }
        x += step;
    }
    points
}

/// The "on" pieces of a dashed polyline
pub fn dash_segments(points: &[(f64, f64)], dash: f64) -> Vec<((f64, f64), (f64, f64))> {
    let mut segments = Vec::new();
    for edge in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (edge[0], edge[1]);
        let length = (x2 - x1).hypot(y2 - y1);
        if length == 0.0 {
            continue;
        }

        let pieces = (length / dash).ceil().max(1.0) as usize;
        for piece in (0..pieces).step_by(2) {
            let start = piece as f64 / pieces as f64;
            let end = ((piece + 1) as f64 / pieces as f64).min(1.0);
            segments.push((
                (x1 + (x2 - x1) * start, y1 + (y2 - y1) * start),
                (x1 + (x2 - x1) * end, y1 + (y2 - y1) * end),
            ));
        }
    }
    segments
}

/// Where to start printing a label so it sits outside its anchor
pub fn label_origin(x: f64, chars: usize, cell_width: f64) -> f64 {
    let width = chars as f64 * cell_width;
    if x < -0.1 {
        x - width
    } else if x > 0.1 {
        x
    } else {
        x - width / 2.0
    }
}

fn draw_outline(ctx: &mut Context<'_>, outline: &Outline, color: Color) {
    match outline {
        Outline::Circle { radius } => ctx.draw(&Circle {
            x: 0.0,
            y: 0.0,
            radius: *radius,
            color,
        }),
        Outline::Polygon(points) => {
            for edge in points.windows(2) {
                ctx.draw(&CanvasLine::new(edge[0].0, edge[0].1, edge[1].0, edge[1].1, color));
            }
        }
    }
}

fn draw_series(ctx: &mut Context<'_>, series: &PlottedSeries, bounds: ([f64; 2], [f64; 2])) {
    let color = series_color(series.role);

    let fill = fill_points(&series.points, fill_step(series.role.fill_opacity()), bounds);
    ctx.draw(&Points {
        coords: &fill,
        color,
    });

    if series.role.dashed() {
        for ((x1, y1), (x2, y2)) in dash_segments(&series.points, DASH) {
            ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
        }
    } else {
        for edge in series.points.windows(2) {
            ctx.draw(&CanvasLine::new(edge[0].0, edge[0].1, edge[1].0, edge[1].1, color));
        }
    }
}

pub fn render_radar_chart(f: &mut Frame<'_>, area: Rect, chart: &RadarChart) {
    let block = Block::default()
        .title(format!(" {} ", chart.title()))
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < 4 {
        return;
    }

    let (x_bounds, y_bounds) = canvas_bounds(inner.width, inner.height);
    let cell_width = (x_bounds[1] - x_bounds[0]) / f64::from(inner.width);

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for (_, outline) in chart.gridlines() {
                    draw_outline(ctx, &outline, Color::DarkGray);
                }
                for (x, y) in chart.spoke_ends() {
                    ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, Color::DarkGray));
                }
                ctx.layer();

                for series in chart.series() {
                    draw_series(ctx, series, (x_bounds, y_bounds));
                }
                ctx.layer();

                draw_outline(ctx, &chart.outline(), Color::Gray);
                for (label, (x, y)) in chart.label_anchors() {
                    let origin = label_origin(x, label.chars().count(), cell_width);
                    ctx.print(origin, y, Span::styled(label.to_string(), Style::default().fg(Color::White)));
                }
                for (tick, (x, y)) in chart.tick_anchors() {
                    ctx.print(x, y, Span::styled(tick, Style::default().fg(Color::Gray)));
                }
            }),
        inner,
    );
}

/// Lays charts out row by row, `columns` per row
pub fn render_chart_grid(f: &mut Frame<'_>, area: Rect, charts: &[RadarChart], columns: usize) {
    if charts.is_empty() {
        return;
    }

    let columns = columns.clamp(1, charts.len());
    let rows = charts.len().div_ceil(columns);
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);

    for (row_area, row_charts) in row_areas.iter().zip(charts.chunks(columns)) {
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        for (cell, chart) in cells.iter().zip(row_charts) {
            render_radar_chart(f, *cell, chart);
        }
    }
}
