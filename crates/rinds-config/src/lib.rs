pub mod clock;
pub mod evaluator;
pub mod inventory;
pub mod logging;
pub mod rinds;
pub mod types;
mod validate;

pub use clock::ClockConfig;
pub use evaluator::EvaluatorConfig;
pub use inventory::{InventoryConfig, PluginEntry};
pub use logging::{LogFormat, LoggingConfig};
pub use rinds::RindsConfig;
pub use types::Timestamp;
