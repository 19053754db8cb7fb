use std::path::PathBuf;

use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid viewport: x=[{x_min}, {x_max}], y=[{y_min}, {y_max}]")]
    InvalidViewport {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("data provider failure: {0}")]
    Provider(String),

    #[error("failed to export frame to `{path}`: {message}")]
    Export { path: PathBuf, message: String },
}
