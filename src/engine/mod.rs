//! The resolution executor.
//!
//! [`Executor`] ties the other modules together: it resolves the stack,
//! feeds it from the trigger queues, and re-runs the state-based fixed
//! point after every change until nothing is left to do.

mod executor;

pub use executor::{run_all, Executor, Step};
