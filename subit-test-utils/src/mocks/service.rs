//! Scripted in-memory subtitle service

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use subit_client_core::SubtitleService;
use subit_client_core::protocol::{
    self, LoginResponse, ProtocolError, SearchCriteria, Session, SubtitleRecord,
};

/// Token handed out by successful mock logins
pub const MOCK_TOKEN: &str = "mock-session-token";

/// In-memory stand-in for the remote service
///
/// Fingerprint and title queries answer from separate result lists, and
/// every call is counted so tests can check the session invariants.
///
/// # Examples
///
/// ```rust,no_run
/// use subit_test_utils::{MockSubtitleService, SubtitleRecordBuilder};
///
/// let service = MockSubtitleService::new()
///     .with_login_failures(1)
///     .with_title_results(vec![SubtitleRecordBuilder::new("eng").build()]);
/// assert_eq!(service.login_calls(), 0);
/// ```
pub struct MockSubtitleService {
    behavior: Mutex<MockBehavior>,
    queries: Mutex<Vec<SearchCriteria>>,
    login_calls: AtomicUsize,
    search_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

#[derive(Debug, Clone)]
struct MockBehavior {
    remaining_login_failures: usize,
    login_status: String,
    fingerprint_results: Vec<SubtitleRecord>,
    title_results: Vec<SubtitleRecord>,
    search_fault: Option<(i64, String)>,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            remaining_login_failures: 0,
            login_status: "200 OK".to_string(),
            fingerprint_results: Vec::new(),
            title_results: Vec::new(),
            search_fault: None,
        }
    }
}

impl MockSubtitleService {
    /// Service that accepts logins and finds nothing
    pub fn new() -> Self {
        Self {
            behavior: Mutex::new(MockBehavior::default()),
            queries: Mutex::new(Vec::new()),
            login_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    /// Fail the first `count` logins with a transport-like error
    pub fn with_login_failures(self, count: usize) -> Self {
        self.update(|b| b.remaining_login_failures = count);
        self
    }

    /// Answer logins with this status text
    pub fn with_login_status(self, status: &str) -> Self {
        self.update(|b| b.login_status = status.to_string());
        self
    }

    /// Records returned by fingerprint queries
    pub fn with_fingerprint_results(self, records: Vec<SubtitleRecord>) -> Self {
        self.update(|b| b.fingerprint_results = records);
        self
    }

    /// Records returned by title queries
    pub fn with_title_results(self, records: Vec<SubtitleRecord>) -> Self {
        self.update(|b| b.title_results = records);
        self
    }

    /// Answer every search with an XML-RPC fault
    pub fn with_search_fault(self, code: i64, message: &str) -> Self {
        self.update(|b| b.search_fault = Some((code, message.to_string())));
        self
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    /// Criteria of every search, in call order
    pub fn queries(&self) -> Vec<SearchCriteria> {
        self.queries.lock().unwrap().clone()
    }

    fn update(&self, f: impl FnOnce(&mut MockBehavior)) {
        f(&mut self.behavior.lock().unwrap());
    }
}

impl Default for MockSubtitleService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubtitleService for MockSubtitleService {
    async fn login(&self) -> protocol::Result<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let mut behavior = self.behavior.lock().unwrap();

        if behavior.remaining_login_failures > 0 {
            behavior.remaining_login_failures -= 1;
            return Err(ProtocolError::http_status(503));
        }

        let token = (behavior.login_status == "200 OK").then(|| MOCK_TOKEN.to_string());
        Ok(LoginResponse {
            status: behavior.login_status.clone(),
            token,
        })
    }

    async fn search(
        &self,
        session: &Session,
        criteria: &SearchCriteria,
    ) -> protocol::Result<Vec<SubtitleRecord>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(criteria.clone());
        assert_eq!(session.token(), MOCK_TOKEN, "search with a foreign session");

        let behavior = self.behavior.lock().unwrap();
        if let Some((code, message)) = &behavior.search_fault {
            return Err(ProtocolError::fault(*code, message.clone()));
        }

        Ok(match criteria {
            SearchCriteria::Fingerprint { .. } => behavior.fingerprint_results.clone(),
            SearchCriteria::Title { .. } => behavior.title_results.clone(),
        })
    }

    async fn logout(&self, session: &Session) -> protocol::Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(session.token(), MOCK_TOKEN, "logout of a foreign session");
        Ok(())
    }
}
