pub mod query_controller;

pub use query_controller::{
    QueryLifecycleController, RetryPolicy, ScanSnapshot, SearchPhase,
};
