mod event;
mod operation;

pub use event::{FailureResponse, Resolved, ResolverEvent, ResolverInfo};
pub use operation::{Operation, UnknownOperation};
