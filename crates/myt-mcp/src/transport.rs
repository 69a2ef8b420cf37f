//! Transport layer for MCP JSON-RPC communication.
//!
//! MCP over stdio is newline-delimited JSON: one message per line.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::protocol::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};

/// Message that can be received from the client.
#[derive(Debug)]
pub enum IncomingMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

/// Line-oriented JSON-RPC transport over any reader/writer pair.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

/// Transport bound to the process stdin/stdout.
pub type StdioTransport = LineTransport<BufReader<Stdin>, Stdout>;

impl StdioTransport {
    /// Create a transport using stdin/stdout.
    pub fn stdio() -> Self {
        LineTransport::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read the next JSON-RPC message, skipping blank lines.
    ///
    /// Returns `Ok(None)` at EOF. A line that is neither a request nor a
    /// notification is an `InvalidData` error; the transport stays usable.
    pub fn read_message(&mut self) -> io::Result<Option<IncomingMessage>> {
        let mut line = String::new();

        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if !line.trim().is_empty() {
                break;
            }
        }

        let line = line.trim();
        tracing::debug!("Received: {}", line);

        // Requests carry an id, notifications don't
        if let Ok(request) = serde_json::from_str::<JsonRpcRequest>(line) {
            return Ok(Some(IncomingMessage::Request(request)));
        }
        if let Ok(notification) = serde_json::from_str::<JsonRpcNotification>(line) {
            return Ok(Some(IncomingMessage::Notification(notification)));
        }

        tracing::warn!("Failed to parse message: {}", line);
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Invalid JSON-RPC message: {}", line),
        ))
    }

    /// Write a JSON-RPC response as a single line.
    pub fn write_response(&mut self, response: &JsonRpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Serialization error: {}", e))
        })?;

        tracing::debug!("Sending: {}", json);

        writeln!(self.writer, "{}", json)?;
        self.writer.flush()
    }

    /// Consume the transport, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RequestId;
    use std::io::Cursor;

    fn transport(input: &str) -> LineTransport<Cursor<Vec<u8>>, Vec<u8>> {
        LineTransport::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_read_request() {
        let mut transport =
            transport("{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n");

        match transport.read_message().unwrap() {
            Some(IncomingMessage::Request(req)) => {
                assert_eq!(req.method, "tools/list");
                assert_eq!(req.id, RequestId::Number(1));
            }
            other => panic!("Expected request, got {:?}", other),
        }
    }

    #[test]
    fn test_read_notification() {
        let mut transport = transport("{\"jsonrpc\":\"2.0\",\"method\":\"initialized\"}\n");

        match transport.read_message().unwrap() {
            Some(IncomingMessage::Notification(notif)) => {
                assert_eq!(notif.method, "initialized");
            }
            other => panic!("Expected notification, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut transport =
            transport("\n   \n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n");

        assert!(matches!(
            transport.read_message().unwrap(),
            Some(IncomingMessage::Request(_))
        ));
        assert!(transport.read_message().unwrap().is_none());
    }

    #[test]
    fn test_invalid_line_is_error() {
        let mut transport =
            transport("not json\n{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n");

        let err = transport.read_message().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        // The next line is still readable
        assert!(transport.read_message().unwrap().is_some());
    }

    #[test]
    fn test_write_response() {
        let mut transport = transport("");
        let response =
            JsonRpcResponse::success(RequestId::Number(1), serde_json::json!({"ok": true}));

        transport.write_response(&response).unwrap();

        let output = String::from_utf8(transport.into_writer()).unwrap();
        assert!(output.ends_with('\n'));
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("\"id\":1"));
    }

    #[test]
    fn test_read_eof() {
        let mut transport = transport("");
        assert!(transport.read_message().unwrap().is_none());
    }
}
