// HTTP session lifecycle

use crate::protocol::JsonRpcRequest;
use crate::server::McpServer;
use crate::tools::ToolRegistry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// One streamable-HTTP session: a stable id and a dedicated server
/// instance handling every request routed to it.
pub struct HttpSession {
    pub id: String,
    pub server: McpServer,
}

/// How an incoming HTTP request maps onto the session table.
pub enum Routing {
    /// The `mcp-session-id` header named a live session.
    Existing(Arc<HttpSession>),
    /// An `initialize` request with no session id: a fresh session,
    /// activated only once the initialize response succeeds.
    Created(Arc<HttpSession>),
    /// Discovery is served without a session.
    Stateless,
    /// Anything else is a protocol violation.
    Rejected,
}

/// Owns the session table for the HTTP transport.
///
/// Sessions move absent -> initializing -> active -> closed. A created
/// session is not visible in the table until [`SessionManager::activate`]
/// runs, so a failed initialize leaves no trace.
pub struct SessionManager {
    sessions: Mutex<HashMap<String, Arc<HttpSession>>>,
    registry: Arc<ToolRegistry>,
}

impl SessionManager {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            registry,
        }
    }

    /// Decide how to route a request given its session header and body.
    pub fn resolve(&self, session_id: Option<&str>, request: &JsonRpcRequest) -> Routing {
        if let Some(id) = session_id {
            return match self.get(id) {
                Some(session) => Routing::Existing(session),
                None => Routing::Rejected,
            };
        }

        if request.method == "initialize" && !request.is_notification() {
            return Routing::Created(self.begin_session());
        }

        // Clients may list tools before they hold a session
        if request.method == "tools/list" {
            return Routing::Stateless;
        }

        Routing::Rejected
    }

    /// Create a session without publishing it in the table.
    pub fn begin_session(&self) -> Arc<HttpSession> {
        Arc::new(HttpSession {
            id: Uuid::new_v4().to_string(),
            server: McpServer::new(self.registry.clone()),
        })
    }

    /// Publish a session after its initialize response succeeded. The
    /// check and insert happen under one lock.
    pub fn activate(&self, session: Arc<HttpSession>) {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.entry(session.id.clone()).or_insert(session);
    }

    pub fn get(&self, id: &str) -> Option<Arc<HttpSession>> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    /// Close a session; returns whether the id was live.
    pub fn close(&self, id: &str) -> bool {
        let removed = self.sessions.lock().unwrap().remove(id).is_some();
        if removed {
            tracing::info!(session = %id, "session closed");
        }
        removed
    }

    /// Tear down every live session; used during shutdown.
    pub fn shutdown(&self) {
        let mut sessions = self.sessions.lock().unwrap();
        let count = sessions.len();
        sessions.clear();
        if count > 0 {
            tracing::info!("closed {count} active sessions");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }

    /// A fresh dispatcher with no session attached, for stateless serving.
    pub fn stateless_server(&self) -> McpServer {
        McpServer::new(self.registry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(ToolRegistry::new()))
    }

    fn request(method: &str, id: Option<i64>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: id.map(|n| json!(n)),
            method: method.to_string(),
            params: None,
        }
    }

    #[test]
    fn new_sessions_get_distinct_ids() {
        let manager = manager();
        let a = manager.begin_session();
        let b = manager.begin_session();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn created_sessions_are_invisible_until_activated() {
        let manager = manager();
        let session = manager.begin_session();
        assert!(manager.get(&session.id).is_none());

        manager.activate(session.clone());
        assert!(manager.get(&session.id).is_some());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn known_id_routes_to_the_existing_session() {
        let manager = manager();
        let session = manager.begin_session();
        manager.activate(session.clone());

        match manager.resolve(Some(&session.id), &request("tools/call", Some(2))) {
            Routing::Existing(found) => assert_eq!(found.id, session.id),
            _ => panic!("expected existing routing"),
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let manager = manager();
        assert!(matches!(
            manager.resolve(Some("nope"), &request("initialize", Some(1))),
            Routing::Rejected
        ));
    }

    #[test]
    fn initialize_without_session_creates_one() {
        let manager = manager();
        assert!(matches!(
            manager.resolve(None, &request("initialize", Some(1))),
            Routing::Created(_)
        ));
        // Not yet activated
        assert!(manager.is_empty());
    }

    #[test]
    fn tools_list_without_session_is_stateless() {
        let manager = manager();
        assert!(matches!(
            manager.resolve(None, &request("tools/list", Some(1))),
            Routing::Stateless
        ));
    }

    #[test]
    fn other_methods_without_session_are_rejected() {
        let manager = manager();
        assert!(matches!(
            manager.resolve(None, &request("tools/call", Some(1))),
            Routing::Rejected
        ));
    }

    #[test]
    fn shutdown_drains_every_session() {
        let manager = manager();
        for _ in 0..3 {
            manager.activate(manager.begin_session());
        }
        assert_eq!(manager.len(), 3);

        manager.shutdown();
        assert!(manager.is_empty());
    }

    #[test]
    fn close_reports_whether_the_id_was_live() {
        let manager = manager();
        let session = manager.begin_session();
        manager.activate(session.clone());

        assert!(manager.close(&session.id));
        assert!(!manager.close(&session.id));
    }
}
