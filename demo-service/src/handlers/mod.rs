pub mod demo;
pub mod health;
pub mod metrics;

pub use demo::{error, root};
pub use health::health_check;
pub use metrics::metrics;
