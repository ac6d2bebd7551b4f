pub mod blur;
pub mod composite;
pub mod pipeline;
pub mod raster;
