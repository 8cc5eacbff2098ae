use bytes::Bytes;

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=UTF-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";

const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes the server can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// The header set is fixed by the wire format (Content-Type then
/// Content-Length), so headers are fields rather than a map.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Bytes,
}

impl Response {
    /// An HTML response with the given status and cached page body.
    pub fn html(status: StatusCode, body: Bytes) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_HTML,
            body,
        }
    }

    /// The 400 response for a request the server could not read, with a JSON
    /// error object body.
    pub fn bad_request() -> Self {
        let body = serde_json::json!({
            "error": "Bad request",
            "message": "Server could not read the request properly.",
        })
        .to_string();

        Self {
            status: StatusCode::BadRequest,
            content_type: CONTENT_TYPE_JSON,
            body: Bytes::from(body),
        }
    }

    /// Serializes the response into wire bytes:
    ///
    /// ```text
    /// HTTP/1.1 <code> <reason>\r\n
    /// Content-Type: <type>\r\n
    /// Content-Length: <byte length of body>\r\n
    /// \r\n
    /// <body>
    /// ```
    ///
    /// Content-Length is the byte length of the body, not the character
    /// count, so multi-byte UTF-8 content frames correctly.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128 + self.body.len());

        let status_line = format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            self.status.as_u16(),
            self.status.reason_phrase()
        );
        buf.extend_from_slice(status_line.as_bytes());

        buf.extend_from_slice(format!("Content-Type: {}\r\n", self.content_type).as_bytes());
        buf.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());

        // Header/body separator
        buf.extend_from_slice(b"\r\n");

        buf.extend_from_slice(&self.body);

        buf
    }
}
