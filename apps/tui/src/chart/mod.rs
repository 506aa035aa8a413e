pub mod radar;
pub mod svg;

pub use radar::{
    close_loop, spoke_angles, to_cartesian, Outline, PlottedSeries, RadarChart,
    RadarChartBuilder, RadarFrame, RadarSeries, SeriesRole, RADIAL_LEVELS, RADIAL_MAX,
};
pub use svg::to_svg;
