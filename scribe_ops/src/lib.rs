//! # scribe_ops - Operation workflows for the scribe editing service
//!
//! The three remote-callable operations (create, edit, read) and the
//! line-delimited JSON dispatch that fronts them. Handlers sequence
//! path resolution, codec work, the edit engine, atomic persistence and
//! post-write verification; every failure is folded into one uniform
//! error shape at the dispatch boundary.

mod dispatch;
mod error;
mod handlers;
mod protocol;

pub use dispatch::dispatch_line;
pub use error::{OpError, OpResult};
pub use handlers::{create, edit, read};
pub use protocol::{
    CreateRequest, CreateResponse, EditRequest, EditResponse, ErrorResponse, ReadRequest,
    ReadResponse,
};
