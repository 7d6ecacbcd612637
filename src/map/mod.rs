// src/map/mod.rs
//! Map projection and viewport maths

mod projection;

pub use projection::{
    fit_zoom, lat_lon_to_world, world_to_lat_lon, Viewport, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM,
    TILE_SIZE,
};
