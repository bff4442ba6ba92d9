// MCP server for the Brave Search API (JSON-RPC 2.0 over stdio or
// streamable HTTP)

pub mod protocol;
pub mod server;
pub mod session;
pub mod tools;
pub mod transport;

pub use server::McpServer;
pub use session::SessionManager;
