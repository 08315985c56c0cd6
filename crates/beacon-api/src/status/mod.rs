//! Server status: runtime measurements and the service that reports them.

mod probe;
mod service;

pub use probe::{parse_meminfo, MemoryProbe, MemorySnapshot, ProcMeminfo};
pub use service::{
    available_processors, ServerStatusResponse, ServerStatusService, StatusSource, UptimeResponse,
};
