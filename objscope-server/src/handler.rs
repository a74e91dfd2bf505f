//! Request handler for objscope-server

use std::collections::BTreeMap;

use objscope_core::tree::{InspectorKind, NodeId};
use objscope_core::{Inspector, InspectorConfig, Request, Response, Shell, Value};
use tracing::{debug, info, warn};

pub struct Handler {
    shell: Shell,
    inspectors: BTreeMap<u64, Inspector>,
    next_id: u64,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            shell: Shell::default(),
            inspectors: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::Configure { config } => self.handle_configure(config),
            Request::Bind { name, value } => self.handle_bind(name, value),
            Request::Inspect { line, mode } => self.handle_inspect(&line, mode),
            Request::Magic { line } => self.handle_magic(&line),
            Request::Select { inspector, node } => self.handle_select(inspector, node),
            Request::Close { inspector } => self.handle_close(inspector),
            Request::Shutdown => {
                info!("Shutdown requested");
                Response::success()
            }
        }
    }

    fn handle_configure(&mut self, config: InspectorConfig) -> Response {
        debug!("Config replaced: {:?}", config);
        self.shell.set_config(config);
        Response::success()
    }

    fn handle_bind(&mut self, name: String, value: serde_json::Value) -> Response {
        debug!("Binding variable '{}'", name);
        self.shell.set_variable(name, Value::from(value));
        Response::success()
    }

    fn handle_inspect(&mut self, line: &str, mode: InspectorKind) -> Response {
        match self.shell.inspect(line, mode) {
            Ok(inspector) => self.store(inspector),
            Err(e) => {
                warn!("Inspect failed for '{}': {}", line, e);
                Response::error(e.to_string())
            }
        }
    }

    fn handle_magic(&mut self, line: &str) -> Response {
        match self.shell.run_line(line) {
            Ok(inspector) => self.store(inspector),
            Err(e) => {
                warn!("Magic failed for '{}': {}", line, e);
                Response::error(e.to_string())
            }
        }
    }

    fn handle_select(&mut self, id: u64, node: NodeId) -> Response {
        let Some(inspector) = self.inspectors.get_mut(&id) else {
            return Response::error(format!("Unknown inspector {}", id));
        };

        match inspector.handle_selection(&[node]) {
            Ok(Some((command, expansion))) => {
                debug!("Inspector {}: {:?} -> {:?}", id, command, expansion);
                Response::Selection {
                    inspector: id,
                    command,
                    expansion,
                    view: inspector.view(),
                    html: inspector.to_html(),
                }
            }
            Ok(None) => Response::error("Empty selection"),
            Err(e) => Response::error(e.to_string()),
        }
    }

    fn handle_close(&mut self, id: u64) -> Response {
        match self.inspectors.remove(&id) {
            Some(_) => {
                debug!("Inspector {} closed", id);
                Response::success()
            }
            None => Response::error(format!("Unknown inspector {}", id)),
        }
    }

    /// Keep a freshly built tree and describe it to the caller
    fn store(&mut self, inspector: Inspector) -> Response {
        let id = self.next_id;
        self.next_id += 1;

        let response = Response::Inspector {
            inspector: id,
            view: inspector.view(),
            html: inspector.to_html(),
        };
        info!("Inspector {} created with {} roots", id, inspector.roots().len());
        self.inspectors.insert(id, inspector);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objscope_core::tree::{Command, Expansion};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bind(handler: &mut Handler, name: &str, value: serde_json::Value) {
        let response = handler.handle(Request::Bind {
            name: name.to_string(),
            value,
        });
        assert!(matches!(response, Response::Success { ok: true }));
    }

    fn inspector_id(response: &Response) -> u64 {
        match response {
            Response::Inspector { inspector, .. } => *inspector,
            other => panic!("expected an inspector, got {:?}", other),
        }
    }

    #[test]
    fn test_inspect_and_select_round_trip() {
        let mut handler = Handler::new();
        bind(&mut handler, "cfg", json!({"port": 8080, "hosts": ["a", "b"]}));

        let response = handler.handle(Request::Inspect {
            line: "cfg".to_string(),
            mode: InspectorKind::Data,
        });
        let id = inspector_id(&response);
        assert_eq!(id, 1);

        let response = handler.handle(Request::Select {
            inspector: id,
            node: NodeId::from(0),
        });
        match response {
            Response::Selection {
                command,
                expansion,
                view,
                html,
                ..
            } => {
                assert_eq!(command, Command::Expand(NodeId::from(0)));
                assert_eq!(expansion, Expansion::Populated { children: 2 });
                assert_eq!(view.nodes.len(), 3);
                assert!(html.contains("inspector-data"));
            }
            other => panic!("expected a selection, got {:?}", other),
        }

        let response = handler.handle(Request::Select {
            inspector: id,
            node: NodeId::from(0),
        });
        assert!(matches!(
            response,
            Response::Selection {
                command: Command::ToggleOpen(_),
                expansion: Expansion::Toggled { opened: false },
                ..
            }
        ));
    }

    #[test]
    fn test_magic_over_locals() {
        let mut handler = Handler::new();
        bind(&mut handler, "a", json!(1));
        bind(&mut handler, "b", json!("two"));

        match handler.handle(Request::Magic {
            line: "%oi".to_string(),
        }) {
            Response::Inspector { view, .. } => assert_eq!(view.roots.len(), 2),
            other => panic!("expected an inspector, got {:?}", other),
        }

        assert!(matches!(
            handler.handle(Request::Magic {
                line: "%zz".to_string()
            }),
            Response::Error { .. }
        ));
    }

    #[test]
    fn test_errors_become_error_responses() {
        let mut handler = Handler::new();

        match handler.handle(Request::Inspect {
            line: "nothing".to_string(),
            mode: InspectorKind::Object,
        }) {
            Response::Error { error } => assert_eq!(error, "Unknown variable: 'nothing'"),
            other => panic!("expected an error, got {:?}", other),
        }

        match handler.handle(Request::Select {
            inspector: 42,
            node: NodeId::from(0),
        }) {
            Response::Error { error } => assert_eq!(error, "Unknown inspector 42"),
            other => panic!("expected an error, got {:?}", other),
        }
    }

    #[test]
    fn test_close_drops_inspector() {
        let mut handler = Handler::new();
        bind(&mut handler, "x", json!([1, 2]));
        let id = inspector_id(&handler.handle(Request::Inspect {
            line: String::new(),
            mode: InspectorKind::Object,
        }));

        assert!(matches!(
            handler.handle(Request::Close { inspector: id }),
            Response::Success { ok: true }
        ));
        assert!(matches!(
            handler.handle(Request::Select {
                inspector: id,
                node: NodeId::from(0),
            }),
            Response::Error { .. }
        ));
    }

    #[test]
    fn test_configure_changes_new_trees() {
        let mut handler = Handler::new();
        bind(&mut handler, "x", json!(1));
        handler.handle(Request::Configure {
            config: InspectorConfig {
                max_height: "8em".to_string(),
                ..Default::default()
            },
        });
        match handler.handle(Request::Inspect {
            line: "x".to_string(),
            mode: InspectorKind::Object,
        }) {
            Response::Inspector { html, .. } => assert!(html.contains("max-height: 8em")),
            other => panic!("expected an inspector, got {:?}", other),
        }
    }
}
