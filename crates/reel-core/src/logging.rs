//! Structured logging schema and field name constants for reelfinder.
//!
//! All crates use these constants for consistent structured logging fields.
//! This ensures log aggregation tools (Loki, Elasticsearch) can query by
//! standardized field names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), request completions |
//! | DEBUG | Pipeline stage transitions, counts, config choices |
//! | TRACE | Per-candidate detail, raw provider payload sizes |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID attached to every log line of one ask request.
/// Format: UUIDv4.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "inference", "catalog"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "analyzer", "ranker", "gather", "enrich", "chat"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "ask", "analyze", "rank", "lookup"
pub const OPERATION: &str = "op";

// ─── Request fields ────────────────────────────────────────────────────────

/// User query text.
pub const QUERY: &str = "query";

/// Pipeline stage a count or duration refers to.
/// Values: "analyze", "gather", "filter", "enrich", "rank", "compose"
pub const STAGE: &str = "stage";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Candidate pool size at a pipeline stage boundary.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Number of results returned to the caller.
pub const RESULT_COUNT: &str = "result_count";

/// Byte length of a prompt sent to the model.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for a completion.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
