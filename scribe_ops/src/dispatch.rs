//! Line-delimited JSON dispatch for the operation handlers.

use scribe_config::Config;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::OpResult;
use crate::handlers;
use crate::protocol::{CreateRequest, EditRequest, ErrorResponse, ReadRequest};

/// Envelope selecting the operation. The `op` tag rides alongside the
/// operation's own fields in one flat JSON object.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Envelope {
    Create(CreateRequest),
    Edit(EditRequest),
    Read(ReadRequest),
}

/// Handle one raw request line, producing one response line.
///
/// Malformed JSON, unknown ops and handler failures all come back as
/// the uniform `{"isError": true, ...}` shape; this function never
/// panics and never propagates an error to the transport.
pub fn dispatch_line(config: &Config, line: &str) -> String {
    let envelope: Envelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "malformed request");
            return serialize_error(&ErrorResponse::new(format!("malformed request: {}", e)));
        }
    };

    match envelope {
        Envelope::Create(request) => respond(handlers::create(config, &request)),
        Envelope::Edit(request) => respond(handlers::edit(config, &request)),
        Envelope::Read(request) => respond(handlers::read(config, &request)),
    }
}

fn respond<T: Serialize>(result: OpResult<T>) -> String {
    match result {
        Ok(response) => serde_json::to_string(&response)
            .unwrap_or_else(|e| serialize_error(&ErrorResponse::new(format!("response serialization failed: {}", e)))),
        Err(e) => serialize_error(&ErrorResponse::new(e.to_string())),
    }
}

fn serialize_error(error: &ErrorResponse) -> String {
    serde_json::to_string(error).unwrap_or_else(|_| {
        // ErrorResponse is two plain fields; serialization cannot
        // realistically fail, but the boundary must still answer.
        r#"{"isError":true,"message":"internal serialization failure"}"#.to_string()
    })
}
