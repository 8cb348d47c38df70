/// Classification for retry policy.
///
/// Used to determine how a caller should respond to a failed price lookup.
///
/// # Behavior Summary
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No |
/// | `WithBackoff` | Yes, after a delay |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - unknown product, malformed response, or terminal failure.
    /// The request is fundamentally invalid and retrying won't help.
    Never,

    /// Retry with exponential backoff.
    ///
    /// Used for transient errors like rate limiting (429) or timeout.
    /// The same request is expected to succeed once the backend recovers
    /// or the rate window resets.
    WithBackoff,
}
