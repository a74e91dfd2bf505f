//! JSON-RPC Protocol definitions
//!
//! Defines the communication protocol between a front-end and objscope-server.

use serde::{Deserialize, Serialize};

use crate::config::InspectorConfig;
use crate::tree::{Command, Expansion, InspectorKind, NodeId, TreeView};

/// Request from a front-end to objscope-server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum Request {
    /// Replace the config used for new trees
    #[serde(rename = "configure")]
    Configure { config: InspectorConfig },

    /// Bind a JSON value as a shell variable
    #[serde(rename = "bind")]
    Bind {
        name: String,
        value: serde_json::Value,
    },

    /// Build a tree from an expression (or all locals when empty)
    #[serde(rename = "inspect")]
    Inspect {
        #[serde(default)]
        line: String,
        #[serde(default)]
        mode: InspectorKind,
    },

    /// Run a `%oi` / `%di` line
    #[serde(rename = "magic")]
    Magic { line: String },

    /// Select a node of a stored tree
    #[serde(rename = "select")]
    Select { inspector: u64, node: NodeId },

    /// Drop a stored tree
    #[serde(rename = "close")]
    Close { inspector: u64 },

    /// Shutdown the server
    #[serde(rename = "shutdown")]
    Shutdown,
}

/// Response from objscope-server to a front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Selection {
        inspector: u64,
        command: Command,
        expansion: Expansion,
        view: TreeView,
        html: String,
    },
    Inspector {
        inspector: u64,
        view: TreeView,
        html: String,
    },
    Success { ok: bool },
    Error { error: String },
}

impl Response {
    pub fn success() -> Self {
        Response::Success { ok: true }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Response::Error { error: msg.into() }
    }
}

/// JSON-RPC message wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcMessage<T> {
    pub jsonrpc: String,
    pub id: Option<u64>,
    #[serde(flatten)]
    pub content: T,
}

impl<T> RpcMessage<T> {
    pub fn new(id: u64, content: T) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id),
            content,
        }
    }
}
