pub mod coordinates;
pub mod distance;
pub mod geocode;
pub mod models;
pub mod pipeline;
pub mod validate;
