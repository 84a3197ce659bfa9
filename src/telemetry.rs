use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Identifier attached to every log line of one recommendation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Creates a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span wrapping all stages of a single run
pub fn recommendation_span(run_id: RunId, title: &str) -> tracing::Span {
    tracing::info_span!(
        "recommendation",
        run_id = %run_id,
        title = %title,
    )
}

/// Installs the fmt subscriber, honouring `RUST_LOG` and defaulting to `info`
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
