// Observability: logging and metrics

pub mod logging;
pub mod metrics;

// Re-export main functions for ease of use
pub use logging::init_logging;
pub use metrics::init_metrics;
