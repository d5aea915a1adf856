pub mod request_trace;
pub mod structured_logger;
pub mod token_gate;

pub use request_trace::RequestTrace;
pub use structured_logger::StructuredLogger;
pub use token_gate::TokenGate;

pub mod trace_span;
pub use trace_span::TraceSpan;
