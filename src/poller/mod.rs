pub mod cycle;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use cycle::{CycleOutcome, CycleResult, CycleSnapshot, FetchCycle};
pub use scheduler::{PollHandle, PollScheduler, ResultSink};
