use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG / LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "message_board", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "message_board",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // config.toml first, then environment variables
    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "message_board", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "message_board", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "message_board",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        storage = %cfg.storage.path.display(),
        "message board starting"
    );

    let shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(service = "message_board", event = "signal_error", error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!(service = "message_board", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
    };

    match rt.block_on(server::serve(cfg, shutdown)) {
        Ok(()) => {
            info!(service = "message_board", event = "stop", %service_id, pid, "message board stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "message_board", event = "run_failed", error = %e, "message board exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
