use color_eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use postboard::config::BoardConfig;
use postboard::session::Session;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("postboard=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("postboard {}", VERSION);
        std::process::exit(0);
    }

    color_eyre::install()?;
    init_tracing();

    let config = BoardConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let mut session = Session::connect(config)?;
        let loaded = session.bootstrap().await;
        if let Err(ref err) = loaded {
            warn!(code = err.error_code(), hint = err.recovery_hint(), "bootstrap incomplete");
        }

        let newest = session.post_ids().first().map(|id| id.to_string());
        info!(
            status = %session.status(),
            error = session.error().unwrap_or("-"),
            posts = session.posts().len(),
            users = session.all_users().len(),
            newest = newest.as_deref().unwrap_or("-"),
            "session ready"
        );

        loaded?;
        Ok::<(), color_eyre::Report>(())
    })
}
