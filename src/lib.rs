pub mod aggregate;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod forecast;
pub mod render;
pub mod series;
pub mod stations;
