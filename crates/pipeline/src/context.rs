//! Per-run logging context.
//!
//! A `RunContext` travels alongside the `PlanningState` and tags every log
//! line of a run through a `tracing` span. There is no global state; two
//! concurrent runs each carry their own context.

use tracing::Span;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RunContext {
    request_id: Uuid,
    origin: &'static str,
}

impl RunContext {
    /// Create a context with a fresh request id.
    ///
    /// # Arguments
    /// * `origin` - Where the run was triggered from (e.g. "http", "cli")
    pub fn new(origin: &'static str) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            origin,
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn origin(&self) -> &'static str {
        self.origin
    }

    /// Span covering one pipeline run.
    pub fn span(&self, location: &str, skill_level: &str) -> Span {
        tracing::info_span!(
            "plan",
            request_id = %self.request_id,
            origin = self.origin,
            location = location,
            skill_level = skill_level,
        )
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new("library")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_context_gets_its_own_id() {
        let a = RunContext::new("http");
        let b = RunContext::new("http");

        assert_ne!(a.request_id(), b.request_id());
        assert_eq!(a.origin(), "http");
        assert_eq!(RunContext::default().origin(), "library");
    }
}
