//! Mock portal backend for testing
//!
//! A small HTTP server on a random local port. Tests register canned
//! responses per method and path, then inspect every request the client
//! made, including headers and JSON bodies.
//!
//! GraphQL calls all go to one path, so routes can also match on a
//! substring of the request body (usually the operation's field name).

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::Value as JsonValue;

/// A canned response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl MockResponse {
    pub fn json(status: u16, body: JsonValue) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn ok(body: JsonValue) -> Self {
        Self::json(200, body)
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A request as the server saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Header value, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn json(&self) -> JsonValue {
        serde_json::from_str(&self.body).unwrap_or(JsonValue::Null)
    }
}

#[derive(Debug, Clone)]
struct MockRoute {
    method: String,
    path: String,
    body_contains: Option<String>,
    response: MockResponse,
}

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<MockRoute>,
    requests: Vec<RecordedRequest>,
}

impl MockState {
    fn respond(&self, request: &RecordedRequest) -> MockResponse {
        // Later registrations win
        self.routes
            .iter()
            .rev()
            .find(|r| {
                r.method == request.method
                    && r.path == request.path
                    && r.body_contains
                        .as_deref()
                        .map_or(true, |needle| request.body.contains(needle))
            })
            .map(|r| r.response.clone())
            .unwrap_or_else(|| {
                MockResponse::json(
                    404,
                    serde_json::json!({
                        "message": format!("Cannot {} {}", request.method, request.path),
                        "statusCode": 404
                    }),
                )
            })
    }
}

/// Mock backend server
pub struct MockBackend {
    port: u16,
    running: Arc<AtomicBool>,
    state: Arc<Mutex<MockState>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockBackend {
    /// Start on a random available port
    pub fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let state = Arc::new(Mutex::new(MockState::default()));

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let state_clone = Arc::clone(&state);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let state = Arc::clone(&state_clone);
                        thread::spawn(move || handle_connection(stream, &state));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            state,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Answer `method path` with `response`
    pub fn route(&self, method: &str, path: &str, response: MockResponse) -> &Self {
        self.push_route(method, path, None, response);
        self
    }

    /// Answer `method path` only when the request body contains `needle`
    pub fn route_matching(&self, method: &str, path: &str, needle: &str, response: MockResponse) -> &Self {
        self.push_route(method, path, Some(needle.to_string()), response);
        self
    }

    /// Answer a GraphQL operation on `/graphql` by its field name
    pub fn graphql(&self, field: &str, response: MockResponse) -> &Self {
        self.route_matching("POST", "/graphql", field, response)
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests received for `method path`
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }

    fn push_route(&self, method: &str, path: &str, body_contains: Option<String>, response: MockResponse) {
        self.lock().routes.push(MockRoute {
            method: method.to_uppercase(),
            path: path.to_string(),
            body_contains,
            response,
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(stream: TcpStream, state: &Mutex<MockState>) {
    // Accepted sockets may inherit the listener's non-blocking mode
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

    let Ok(write_half) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(stream);

    let Some(request) = read_request(&mut reader) else {
        send_response(write_half, &MockResponse::json(400, serde_json::json!({"message": "Bad Request"})));
        return;
    };

    let response = {
        let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.requests.push(request.clone());
        state.respond(&request)
    };
    send_response(write_half, &response);
}

fn read_request(reader: &mut BufReader<TcpStream>) -> Option<RecordedRequest> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target.to_string(), None),
    };

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        path,
        query,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn send_response(mut stream: TcpStream, response: &MockResponse) {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        status_text(response.status),
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
    let _ = stream.flush();
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unmatched_route_is_404() {
        let state = MockState::default();
        let request = RecordedRequest {
            method: "GET".into(),
            path: "/nope".into(),
            query: None,
            headers: vec![],
            body: String::new(),
        };
        assert_eq!(state.respond(&request).status, 404);
    }

    #[test]
    fn test_later_route_wins_and_body_matching() {
        let mut state = MockState::default();
        for (needle, status) in [(None, 200), (Some("deleteDebitCard"), 500), (None, 201)] {
            state.routes.push(MockRoute {
                method: "POST".into(),
                path: "/graphql".into(),
                body_contains: needle.map(str::to_string),
                response: MockResponse::json(status, json!({})),
            });
        }
        let request = |body: &str| RecordedRequest {
            method: "POST".into(),
            path: "/graphql".into(),
            query: None,
            headers: vec![],
            body: body.into(),
        };
        assert_eq!(state.respond(&request("mutation { deleteDebitCard }")).status, 201);
        state.routes.pop();
        assert_eq!(state.respond(&request("mutation { deleteDebitCard }")).status, 500);
        assert_eq!(state.respond(&request("query { getUserDebitCards }")).status, 200);
    }

    #[test]
    fn test_query_param_decoding() {
        let request = RecordedRequest {
            method: "GET".into(),
            path: "/accounts/all-account-nbs".into(),
            query: Some("page=2&limit=5&search=10%2023".into()),
            headers: vec![("X-Request-Id".into(), "abc".into())],
            body: String::new(),
        };
        assert_eq!(request.query_param("page").as_deref(), Some("2"));
        assert_eq!(request.query_param("search").as_deref(), Some("10 23"));
        assert_eq!(request.header("x-request-id"), Some("abc"));
    }
}
