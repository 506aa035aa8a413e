pub mod attributes;
pub mod common;
pub mod home;
pub mod sdg_average;
pub mod sdg_per_port;
pub mod view_by_sdg;
