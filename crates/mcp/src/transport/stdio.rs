// Stdio transport: newline-delimited JSON-RPC on stdin/stdout

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::server::McpServer;
use crate::transport::shutdown_signal;
use anyhow::Result;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio_stream::StreamExt;
use tokio_util::codec::{FramedRead, LinesCodec};

/// Serve a single session over stdin/stdout until EOF or a signal.
pub async fn serve(server: McpServer) -> Result<()> {
    let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
    let mut stdout = tokio::io::stdout();

    tracing::info!("stdio transport ready");

    loop {
        tokio::select! {
            line = lines.next() => {
                let Some(line) = line else {
                    tracing::info!("stdin closed, shutting down");
                    break;
                };

                if let Some(response) = handle_line(&server, &line?).await {
                    stdout.write_all(response.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
            _ = shutdown_signal() => break,
        }
    }

    Ok(())
}

/// Handle one input line; notifications and blank lines produce no output.
async fn handle_line(server: &McpServer, line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }

    let response = match serde_json::from_str::<JsonRpcRequest>(line) {
        Ok(request) => server.handle(request).await?,
        Err(error) => {
            tracing::error!("malformed request: {error}");
            JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error())
        }
    };

    serde_json::to_string(&response).ok()
}
