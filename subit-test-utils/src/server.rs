//! Stub of the remote XML-RPC service over HTTP
//!
//! Answers LogIn, SearchSubtitles and LogOut on `/xml-rpc` and serves
//! subtitle archives under `/download/`.

use subit_client_core::SubtitleRecord;
use subit_client_core::protocol::codec::{Encoder, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RPC_PATH: &str = "/xml-rpc";

/// A running stub service
pub struct StubService {
    server: MockServer,
}

impl StubService {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// XML-RPC endpoint URL to configure the client with
    pub fn endpoint(&self) -> String {
        format!("{}{RPC_PATH}", self.server.uri())
    }

    /// URL under which [`serve_archive`](Self::serve_archive) publishes `name`
    pub fn archive_url(&self, name: &str) -> String {
        format!("{}/download/{name}", self.server.uri())
    }

    /// Accept logins and hand out `token`
    pub async fn login_ok(&self, token: &str) {
        self.login_response(Value::structure([
            ("status", Value::from("200 OK")),
            ("token", Value::from(token)),
            ("seconds", Value::Double(0.004)),
        ]))
        .await;
    }

    /// Answer logins with a non-success status and no token
    pub async fn login_status(&self, status: &str) {
        self.login_response(Value::structure([
            ("status", Value::from(status)),
            ("token", Value::from("")),
        ]))
        .await;
    }

    /// Answer logins with an HTTP error status
    pub async fn login_http_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(RPC_PATH))
            .and(body_string_contains("<methodName>LogIn</methodName>"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Records returned for fingerprint queries; empty answers `data = false`
    pub async fn fingerprint_results(&self, records: &[SubtitleRecord]) {
        self.search_response("<name>moviehash</name>", records)
            .await;
    }

    /// Records returned for title queries; empty answers `data = false`
    pub async fn title_results(&self, records: &[SubtitleRecord]) {
        self.search_response("<name>query</name>", records).await;
    }

    pub async fn logout_ok(&self) {
        let body = Value::structure([
            ("status", Value::from("200 OK")),
            ("seconds", Value::Double(0.001)),
        ]);
        self.rpc_response("<methodName>LogOut</methodName>", None, &body)
            .await;
    }

    /// Serve `bytes` at [`archive_url`](Self::archive_url)
    pub async fn serve_archive(&self, name: &str, bytes: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(format!("/download/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
            .mount(&self.server)
            .await;
    }

    /// XML-RPC method names received so far, in arrival order
    pub async fn received_methods(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| {
                let body = String::from_utf8_lossy(&request.body);
                let start = body.find("<methodName>")? + "<methodName>".len();
                let end = body[start..].find("</methodName>")? + start;
                Some(body[start..end].to_string())
            })
            .collect()
    }

    /// Number of received calls of `method_name`
    pub async fn call_count(&self, method_name: &str) -> usize {
        self.received_methods()
            .await
            .iter()
            .filter(|m| *m == method_name)
            .count()
    }

    async fn login_response(&self, value: Value) {
        self.rpc_response("<methodName>LogIn</methodName>", None, &value)
            .await;
    }

    async fn search_response(&self, marker: &str, records: &[SubtitleRecord]) {
        let data = if records.is_empty() {
            Value::Bool(false)
        } else {
            Value::Array(records.iter().map(SubtitleRecord::to_value).collect())
        };
        let body = Value::structure([("status", Value::from("200 OK")), ("data", data)]);
        self.rpc_response(
            "<methodName>SearchSubtitles</methodName>",
            Some(marker),
            &body,
        )
        .await;
    }

    async fn rpc_response(&self, method_marker: &str, extra_marker: Option<&str>, value: &Value) {
        let body = Encoder::new().encode_response(value).unwrap().to_vec();
        let mut mock = Mock::given(method("POST"))
            .and(path(RPC_PATH))
            .and(body_string_contains(method_marker));
        if let Some(marker) = extra_marker {
            mock = mock.and(body_string_contains(marker));
        }
        mock.respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/xml"))
            .mount(&self.server)
            .await;
    }
}
