pub mod scheduler;
pub mod simulator;

pub use scheduler::{DeferredTask, IDeferredScheduler};
pub use simulator::{ISimulator, RunOptions};
