//! The two steps of a gate check: wait for the Compute Engine to go idle,
//! then read the Quality Gate verdict.

pub mod verdict;
pub mod wait;

pub use verdict::check_quality_gate;
pub use wait::wait_for_pending_tasks;
