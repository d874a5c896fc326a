mod init;
mod span;
mod trace_id;

pub use init::{LogFormat, init_logger};
pub use span::{child_span, root_span};
pub use trace_id::TraceId;
