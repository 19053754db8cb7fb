pub mod mapper;
pub mod settings;
pub mod types;
pub mod units;
pub mod viewport;

pub use mapper::{AxisDirection, AxisMapper};
pub use settings::{BifXAxisMode, FrameSettings, PointSize};
pub use types::{PixelPoint, PixelSize, PlotRect};
pub use units::AxisUnits;
pub use viewport::Viewport;
