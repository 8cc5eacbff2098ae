/// A parsed HTTP request line.
///
/// Only the request line is ever consulted: headers and body, if present in
/// the raw buffer, are ignored. The method and version are carried as plain
/// strings since routing inspects the target alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method token (e.g. "GET")
    pub method: String,
    /// The request target (e.g. "/index.html")
    pub target: String,
    /// HTTP version token, empty if the client omitted it
    pub version: String,
}

impl Request {
    /// Parses the first line of a raw request buffer.
    ///
    /// The line is split at single space characters into method, target and
    /// version. Returns `None` for an empty buffer or a line with fewer than
    /// two tokens; it never panics on malformed input.
    pub fn parse(raw: &str) -> Option<Request> {
        if raw.is_empty() {
            return None;
        }

        let line = raw.split("\r\n").next().unwrap_or("");
        let mut parts = line.split(' ');

        let method = parts.next()?;
        let target = parts.next()?;
        let version = parts.next().unwrap_or("");

        Some(Request {
            method: method.to_string(),
            target: target.to_string(),
            version: version.to_string(),
        })
    }
}
