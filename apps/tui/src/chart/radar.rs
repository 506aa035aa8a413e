use crate::error::{DataError, Result};
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Radial gridlines of the 0 (absent) to 3 (fully met) indicator scale.
pub const RADIAL_LEVELS: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
pub const RADIAL_MAX: f64 = 3.0;
pub const LABEL_FONT_SIZE: f64 = 10.0;
pub const TICK_FONT_SIZE: f64 = 8.0;
/// Distance of the spoke labels from the centre, in frame radii
pub const LABEL_RADIUS: f64 = 1.14;

pub const PRIMARY_COLOR: &str = "#00A36C";
pub const AVERAGE_COLOR: &str = "#808080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RadarFrame {
    Circle,
    #[default]
    Polygon,
}

impl RadarFrame {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Polygon => "polygon",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "circle" => Some(Self::Circle),
            "polygon" => Some(Self::Polygon),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Circle => Self::Polygon,
            Self::Polygon => Self::Circle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesRole {
    Primary,
    /// Overlay drawn gray, dashed and lighter so compared series stay on top
    Average,
}

impl SeriesRole {
    pub const fn fill_opacity(self) -> f64 {
        match self {
            Self::Primary => 0.5,
            Self::Average => 0.2,
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Primary => PRIMARY_COLOR,
            Self::Average => AVERAGE_COLOR,
        }
    }

    pub const fn dashed(self) -> bool {
        matches!(self, Self::Average)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub label: String,
    pub values: Vec<f64>,
    pub role: SeriesRole,
}

impl RadarSeries {
    pub fn primary(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            role: SeriesRole::Primary,
        }
    }

    pub fn average(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            role: SeriesRole::Average,
        }
    }
}

/// Evenly spaced spoke angles `2π·i/N`, starting at 0.
pub fn spoke_angles(n: usize) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(DataError::ZeroAxes);
    }

    Ok((0..n).map(|i| TAU * i as f64 / n as f64).collect())
}

/// Appends a copy of the first point when the loop is not already closed
pub fn close_loop(mut points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last {
            points.push(first);
        }
    }
    points
}

/// Polar to chart coordinates with angle 0 pointing north, angles advancing
/// counter-clockwise.
pub fn to_cartesian(theta: f64, radius: f64) -> (f64, f64) {
    let angle = FRAC_PI_2 + theta;
    (radius * angle.cos(), radius * angle.sin())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outline {
    Circle { radius: f64 },
    /// Closed vertex loop
    Polygon(Vec<(f64, f64)>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlottedSeries {
    pub label: String,
    pub role: SeriesRole,
    /// Closed `(theta, value)` loop in data units
    pub polar: Vec<(f64, f64)>,
    /// The same loop in chart coordinates, the frame having radius 1
    pub points: Vec<(f64, f64)>,
}

impl PlottedSeries {
    /// One value per plotted spoke, without the closing point
    pub fn values(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.polar.iter().map(|&(_, value)| value).collect();
        if self.polar.len() > 1 && self.polar.first() == self.polar.last() {
            values.pop();
        }
        values
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    title: String,
    frame: RadarFrame,
    angles: Vec<f64>,
    labels: Vec<String>,
    series: Vec<PlottedSeries>,
}

impl RadarChart {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn frame(&self) -> RadarFrame {
        self.frame
    }

    pub fn spokes(&self) -> usize {
        self.angles.len()
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[PlottedSeries] {
        &self.series
    }

    /// An N-gon needs three vertices; fewer spokes fall back to a circle
    pub fn effective_frame(&self) -> RadarFrame {
        if self.spokes() < 3 {
            RadarFrame::Circle
        } else {
            self.frame
        }
    }

    /// Outline at `radius` chart units, shaped by the frame
    pub fn outline_at(&self, radius: f64) -> Outline {
        match self.effective_frame() {
            RadarFrame::Circle => Outline::Circle { radius },
            RadarFrame::Polygon => Outline::Polygon(close_loop(
                self.angles
                    .iter()
                    .map(|&theta| to_cartesian(theta, radius))
                    .collect(),
            )),
        }
    }

    pub fn outline(&self) -> Outline {
        self.outline_at(1.0)
    }

    /// `(level, outline)` for each radial gridline, level 0 excluded as it is the centre point
    pub fn gridlines(&self) -> Vec<(f64, Outline)> {
        RADIAL_LEVELS
            .iter()
            .filter(|&&level| level > 0.0)
            .map(|&level| (level, self.outline_at(level / RADIAL_MAX)))
            .collect()
    }

    pub fn spoke_ends(&self) -> Vec<(f64, f64)> {
        self.angles
            .iter()
            .map(|&theta| to_cartesian(theta, 1.0))
            .collect()
    }

    pub fn label_anchors(&self) -> Vec<(&str, (f64, f64))> {
        self.labels
            .iter()
            .zip(&self.angles)
            .map(|(label, &theta)| (label.as_str(), to_cartesian(theta, LABEL_RADIUS)))
            .collect()
    }

    /// Radial tick labels along the first spoke
    pub fn tick_anchors(&self) -> Vec<(String, (f64, f64))> {
        let theta = self.angles.first().copied().unwrap_or_default();
        RADIAL_LEVELS
            .iter()
            .map(|&level| {
                (
                    format!("{level:.0}"),
                    to_cartesian(theta, level / RADIAL_MAX),
                )
            })
            .collect()
    }
}

/// Builds one radar chart: spokes from the labels, a closed loop per series.
#[derive(Debug, Clone, Default)]
pub struct RadarChartBuilder {
    title: String,
    labels: Vec<String>,
    frame: RadarFrame,
    series: Vec<RadarSeries>,
}

impl RadarChartBuilder {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub const fn frame(mut self, frame: RadarFrame) -> Self {
        self.frame = frame;
        self
    }

    #[must_use]
    pub fn series(mut self, series: RadarSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Values past the spoke count are ignored; a shorter series plots the
    /// spokes it has.
    pub fn build(self) -> Result<RadarChart> {
        let angles = spoke_angles(self.labels.len())?;

        let series = self
            .series
            .into_iter()
            .map(|series| {
                let polar = close_loop(
                    angles
                        .iter()
                        .copied()
                        .zip(series.values.iter().copied())
                        .collect(),
                );
                let points = polar
                    .iter()
                    .map(|&(theta, value)| to_cartesian(theta, value / RADIAL_MAX))
                    .collect();
                PlottedSeries {
                    label: series.label,
                    role: series.role,
                    polar,
                    points,
                }
            })
            .collect();

        Ok(RadarChart {
            title: self.title,
            frame: self.frame,
            angles,
            labels: self.labels,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{i}.00")).collect()
    }

    #[test]
    fn four_spokes_are_quarter_turns() -> Result<(), Box<dyn std::error::Error>> {
        let angles = spoke_angles(4)?;
        let expected = [0.0, PI / 2.0, PI, 3.0 * PI / 2.0];
        assert_eq!(angles.len(), 4);
        for (actual, expected) in angles.iter().zip(expected) {
            assert_close(*actual, expected);
        }
        Ok(())
    }

    #[test]
    fn zero_spokes_is_a_value_error() {
        let err = spoke_angles(0).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("cannot render a radar chart with zero axes".to_string())
        );
        assert!(RadarChartBuilder::new(Vec::new()).build().is_err());
    }

    #[test]
    fn open_series_is_closed_with_its_first_point() {
        let closed = close_loop(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 1.0)]);
        assert_eq!(closed.len(), 4);
        assert_eq!(closed.first(), closed.last());

        let already = close_loop(vec![(0.0, 1.0), (1.0, 2.0), (0.0, 1.0)]);
        assert_eq!(already.len(), 3);
        assert!(close_loop(Vec::new()).is_empty());
    }

    #[test]
    fn first_spoke_points_north() {
        let (x, y) = to_cartesian(0.0, 1.0);
        assert_close(x, 0.0);
        assert_close(y, 1.0);

        let (x, y) = to_cartesian(PI / 2.0, 1.0);
        assert_close(x, -1.0);
        assert_close(y, 0.0);
    }

    #[test]
    fn series_is_truncated_to_spokes_and_closed() -> Result<(), Box<dyn std::error::Error>> {
        let chart = RadarChartBuilder::new(labels(3))
            .series(RadarSeries::primary("Port A", vec![3.0, 1.5, 0.0, 2.0]))
            .build()?;

        let series = &chart.series()[0];
        assert_eq!(series.polar.len(), 4);
        assert_eq!(series.polar.first(), series.polar.last());
        assert_eq!(series.values(), vec![3.0, 1.5, 0.0]);
        let (x, y) = series.points[0];
        assert_close(x, 0.0);
        assert_close(y, 1.0);
        Ok(())
    }

    #[test]
    fn short_series_plots_the_values_it_has() -> Result<(), Box<dyn std::error::Error>> {
        let chart = RadarChartBuilder::new(labels(5))
            .series(RadarSeries::primary("Port B", vec![1.0, 2.0]))
            .build()?;

        assert_eq!(chart.spokes(), 5);
        assert_eq!(chart.series()[0].polar.len(), 3);
        Ok(())
    }

    #[test]
    fn polygon_frame_has_one_vertex_per_spoke() -> Result<(), Box<dyn std::error::Error>> {
        let chart = RadarChartBuilder::new(labels(6)).build()?;
        assert_eq!(chart.frame(), RadarFrame::Polygon);

        match chart.outline() {
            Outline::Polygon(vertices) => {
                assert_eq!(vertices.len(), 7);
                assert_close(vertices[0].1, 1.0);
            }
            Outline::Circle { .. } => panic!("expected a polygon outline"),
        }
        Ok(())
    }

    #[test]
    fn circle_frame_and_small_charts_use_circles() -> Result<(), Box<dyn std::error::Error>> {
        let circle = RadarChartBuilder::new(labels(6))
            .frame(RadarFrame::Circle)
            .build()?;
        assert_eq!(circle.outline(), Outline::Circle { radius: 1.0 });

        let two = RadarChartBuilder::new(labels(2)).build()?;
        assert_eq!(two.effective_frame(), RadarFrame::Circle);
        Ok(())
    }

    #[test]
    fn gridlines_are_fixed_regardless_of_data() -> Result<(), Box<dyn std::error::Error>> {
        let chart = RadarChartBuilder::new(labels(4))
            .frame(RadarFrame::Circle)
            .series(RadarSeries::primary("Port C", vec![0.1, 0.2, 0.1, 0.2]))
            .build()?;

        let levels: Vec<f64> = chart.gridlines().iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![1.0, 2.0, 3.0]);
        assert_eq!(chart.gridlines()[0].1, Outline::Circle { radius: 1.0 / 3.0 });

        let ticks: Vec<String> = chart.tick_anchors().into_iter().map(|(tick, _)| tick).collect();
        assert_eq!(ticks, vec!["0", "1", "2", "3"]);
        Ok(())
    }

    #[test]
    fn average_overlay_is_lighter_than_primary() {
        assert_close(SeriesRole::Primary.fill_opacity(), 0.5);
        assert_close(SeriesRole::Average.fill_opacity(), 0.2);
        assert!(SeriesRole::Average.dashed());
        assert!(!SeriesRole::Primary.dashed());
    }
}
