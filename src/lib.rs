//! chaos-plot: plot rendering and incremental caching for live chaos-circuit data.
//!
//! The crate builds deterministic, backend-agnostic render frames for a family
//! of instrument charts. The bifurcation diagram keeps a retained composed
//! layer so that a full independent-variable sweep never has to be refetched
//! and redrawn on a single refresh.

pub mod chart;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use chart::{BifurcationChart, Chart};
pub use error::{PlotError, PlotResult};
