// Basins of attraction for Halley's method, as raster images or traced SVG
//
// Hosts build a HalleyFractal and either call halley::render directly or run
// it as a RenderTask they can cancel and watch progress on.

pub mod complex;
pub mod functions;
pub mod halley;
pub mod trace;
