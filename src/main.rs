use tokio::net::TcpListener;

use pairchat::config::Config;
use pairchat::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pairchat=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();
    print_banner(&config);

    if !config.index_path.is_file() {
        tracing::warn!("index page {:?} not found, / will return 404", config.index_path);
    }
    if !config.static_dir.is_dir() {
        tracing::warn!("static directory {:?} not found", config.static_dir);
    }

    let state = AppState::new(config.static_dir.clone(), config.index_path.clone());
    let app = pairchat::routes::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    let actual_port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    eprintln!("  \x1b[32m→ listening on 0.0.0.0:{actual_port}\x1b[0m");
    eprintln!();

    axum::serve(listener, app).await.expect("server error");
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");

    eprintln!();
    eprintln!("  \x1b[1;36mpairchat\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mport\x1b[0m         {}", config.port);
    eprintln!("  \x1b[2mindex\x1b[0m        {}", config.index_path.display());
    eprintln!("  \x1b[2mstatic\x1b[0m       {}", config.static_dir.display());
    eprintln!();
}
