use std::{process, sync::Arc};

use asciify::{
    application::{
        backend::GlyphBackend,
        error::AppError,
        render::{RenderError, RenderPipelineConfig, RenderService},
    },
    config,
    infra::{
        error::InfraError,
        figlet::LetrsBackend,
        http::{self, HttpState},
        telemetry,
    },
};
use tokio::sync::watch;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::from(InfraError::configuration(err.to_string())))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let backend: Arc<dyn GlyphBackend> = Arc::new(LetrsBackend::new());
    let render = Arc::new(RenderService::new(
        backend,
        RenderPipelineConfig::from(&settings.render),
    ));

    match command {
        config::Command::Serve(_) => serve_http(&settings, HttpState { render }).await,
        config::Command::Render(args) => run_render(&render, args).await,
        config::Command::Fonts => run_fonts(&render).await,
    }
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let router = http::build_router(state, settings.server.body_limit());

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let local_addr = listener
        .local_addr()
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "asciify::serve",
        addr = %local_addr,
        url = %format!("http://localhost:{}", local_addr.port()),
        "ASCII API listening"
    );

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
        async move {
            let _ = shutdown_rx.changed().await;
        },
    );
    let mut handle = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut handle => return flatten_server_result(joined),
        () = wait_for_signal() => {}
    }

    let grace = settings.server.graceful_shutdown;
    info!(
        target = "asciify::serve",
        grace_seconds = grace.as_secs(),
        "Shutdown signal received, draining connections"
    );
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(grace, handle).await {
        Ok(joined) => flatten_server_result(joined),
        Err(_) => {
            warn!(
                target = "asciify::serve",
                grace_seconds = grace.as_secs(),
                "Graceful shutdown timed out; dropping open connections"
            );
            Ok(())
        }
    }
}

fn flatten_server_result(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(AppError::unexpected(format!("server error: {err}"))),
        Err(err) => Err(AppError::unexpected(format!("server task failed: {err}"))),
    }
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(target = "asciify::serve", error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(target = "asciify::serve", error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

async fn run_render(render: &RenderService, args: config::RenderArgs) -> Result<(), AppError> {
    let request = render.request(args.text, args.font.as_deref());
    let started = tokio::time::Instant::now();
    let ascii = render.render(&request).await?;

    info!(
        target = "asciify::render",
        font = %request.font,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Rendered text"
    );
    println!("{ascii}");
    Ok(())
}

async fn run_fonts(render: &RenderService) -> Result<(), AppError> {
    let fonts = render
        .fonts()
        .await
        .map_err(|err| AppError::from(RenderError::from(err)))?;
    for font in fonts {
        println!("{font}");
    }
    Ok(())
}
