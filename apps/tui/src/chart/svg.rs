use crate::chart::radar::{Outline, RadarChart, LABEL_FONT_SIZE, TICK_FONT_SIZE};
use crate::markup::escape;
use std::fmt::Write;

const GRID_COLOR: &str = "#999999";
const FRAME_COLOR: &str = "#000000";

/// Renders a radar chart as a standalone square SVG document of `size` pixels.
pub fn to_svg(chart: &RadarChart, size: u32) -> String {
    let size = f64::from(size.max(120));
    let center = size / 2.0;
    // leave room for the title above and the spoke labels around
    let scale = size * 0.32;
    let project = |(x, y): (f64, f64)| (center + x * scale, center + 12.0 - y * scale);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" font-family="sans-serif">"#
    );
    let _ = writeln!(svg, r##"<rect width="100%" height="100%" fill="#FFFFFF"/>"##);
    let _ = writeln!(
        svg,
        r#"<text x="{center:.1}" y="20" text-anchor="middle" font-size="12" font-weight="bold">{}</text>"#,
        escape(chart.title())
    );

    for (_, outline) in chart.gridlines() {
        write_outline(&mut svg, &outline, &project, scale, GRID_COLOR, 0.5);
    }

    let (cx, cy) = project((0.0, 0.0));
    for end in chart.spoke_ends() {
        let (x, y) = project(end);
        let _ = writeln!(
            svg,
            r#"<line x1="{cx:.2}" y1="{cy:.2}" x2="{x:.2}" y2="{y:.2}" stroke="{GRID_COLOR}" stroke-width="0.5"/>"#
        );
    }

    for series in chart.series() {
        if series.points.is_empty() {
            continue;
        }
        let points = series
            .points
            .iter()
            .map(|&point| {
                let (x, y) = project(point);
                format!("{x:.2},{y:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let color = series.role.color();
        let dash = if series.role.dashed() {
            r#" stroke-dasharray="6 4""#
        } else {
            ""
        };
        let _ = writeln!(
            svg,
            r#"<polygon points="{points}" fill="{color}" fill-opacity="{}" stroke="none"/>"#,
            series.role.fill_opacity()
        );
        let _ = writeln!(
            svg,
            r#"<polyline points="{points}" fill="none" stroke="{color}" stroke-width="2"{dash}><title>{}</title></polyline>"#,
            escape(&series.label)
        );
    }

    write_outline(&mut svg, &chart.outline(), &project, scale, FRAME_COLOR, 1.0);

    for (tick, anchor) in chart.tick_anchors() {
        let (x, y) = project(anchor);
        let _ = writeln!(
            svg,
            r##"<text x="{:.2}" y="{y:.2}" font-size="{TICK_FONT_SIZE}" fill="#555555">{tick}</text>"##,
            x + 3.0
        );
    }

    for (label, anchor) in chart.label_anchors() {
        let (x, y) = project(anchor);
        let text_anchor = if anchor.0 > 0.05 {
            "start"
        } else if anchor.0 < -0.05 {
            "end"
        } else {
            "middle"
        };
        let _ = writeln!(
            svg,
            r#"<text x="{x:.2}" y="{:.2}" text-anchor="{text_anchor}" font-size="{LABEL_FONT_SIZE}">{}</text>"#,
            y + LABEL_FONT_SIZE / 3.0,
            escape(label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_outline(
    svg: &mut String,
    outline: &Outline,
    project: &impl Fn((f64, f64)) -> (f64, f64),
    scale: f64,
    color: &str,
    width: f64,
) {
    match outline {
        Outline::Circle { radius } => {
            let (cx, cy) = project((0.0, 0.0));
            let _ = writeln!(
                svg,
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="none" stroke="{color}" stroke-width="{width}"/>"#,
                radius * scale
            );
        }
        Outline::Polygon(vertices) => {
            let points = vertices
                .iter()
                .map(|&vertex| {
                    let (x, y) = project(vertex);
                    format!("{x:.2},{y:.2}")
                })
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(
                svg,
                r#"<polygon points="{points}" fill="none" stroke="{color}" stroke-width="{width}"/>"#
            );
        }
    }
}
