#[derive(clap::Parser, Debug)]
#[command(name = "folio", about = "Serve the blog and app showcase API")]
struct Args {
    /// Path to a TOML settings file (defaults to ./folio.toml if present)
    #[arg(long, short = 'c')]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use folio::app::{router, AppState};
    use folio::config::ServerConfig;
    use folio::db::app_repository::{AppRepository, InMemoryAppRepository};
    use folio::db::post_repository::{InMemoryPostRepository, PostRepository};
    use std::sync::Arc;

    let args = Args::parse();
    let config = ServerConfig::load(args.config.as_deref())?;

    // Initialize tracing
    let default_filter = config
        .log_filter
        .clone()
        .unwrap_or_else(|| "folio=info,tower_http=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    tracing::info!("Starting Folio server...");

    let post_repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
    let app_repo: Arc<dyn AppRepository> = Arc::new(InMemoryAppRepository::new());

    if config.seed_demo {
        folio::demo_seeder::seed_demo_data(post_repo.as_ref(), app_repo.as_ref()).await?;
    }

    let app_state = AppState {
        post_repo,
        app_repo,
    };
    let app = router(app_state, &config.site_root, config.allow_cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
