pub mod directory;
pub mod passes;
pub mod records;
pub mod session;
pub mod state;

pub use session::SessionManager;
pub use state::AdminState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
