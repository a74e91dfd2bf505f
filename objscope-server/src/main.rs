//! objscope Server
//!
//! JSON-RPC server that drives an inspector shell for an external front-end.
//! Communicates via stdin/stdout for easy subprocess management.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use objscope_core::protocol::RpcMessage;
use objscope_core::{Request, Response};
use tracing::{debug, error, info};

mod handler;

fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is for JSON-RPC)
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    info!("objscope-server starting...");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut handler = handler::Handler::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to read line: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        debug!("Received: {}", line);

        let mut stop = false;
        let response = match serde_json::from_str::<RpcMessage<Request>>(&line) {
            Ok(msg) => {
                stop = matches!(msg.content, Request::Shutdown);
                let result = handler.handle(msg.content);
                RpcMessage::new(msg.id.unwrap_or(0), result)
            }
            Err(e) => RpcMessage::new(0, Response::error(format!("Parse error: {}", e))),
        };

        let response_json = serde_json::to_string(&response)?;
        debug!("Sending: {}", response_json);
        writeln!(stdout, "{}", response_json)?;
        stdout.flush()?;

        if stop {
            break;
        }
    }

    info!("objscope-server shutting down");
    Ok(())
}
