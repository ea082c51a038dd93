use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resumption state for one (facet, term) scan. `start` is the exact key at
/// which the previous page stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRange {
    pub start: String,
    pub end: String,
    /// Candidate ceiling passed to the underlying scan request.
    pub limit: usize,
    /// The analyzed query term this range was built for.
    pub word: String,
}

/// Persisted pagination state: everything already returned plus where each
/// term's scan left off. Written under a fresh token with a TTL after every
/// search call; consumed (read, not deleted) when a caller resumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageCursor {
    pub ids: Vec<String>,
    pub ranges: Vec<ResumeRange>,
}

/// Time-ordered unique cursor token. The `page/` prefix keeps cursor records
/// out of the posting key families.
pub fn new_token() -> String {
    format!(
        "page/{:016x}/{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
