//! Server lifecycle

mod shutdown;

pub use shutdown::{run_cleanup, ShutdownSignal};
