use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use notevox_app::display;
use notevox_app::keys::{spawn_key_listener, KeyCommand};
use notevox_app::session::{DetectionSession, SessionConfig};
use notevox_camera::CameraSource;
use notevox_classifier::{ClassifierLoader, HttpLoader, ModelLocation};
use notevox_foundation::real_clock;
use notevox_speech::SpeechAnnouncer;

#[derive(Parser, Debug)]
#[command(name = "notevox", about = "Identify Indian currency notes through the camera")]
struct Cli {
    /// Base URL of the classifier model (metadata.json + model descriptor)
    #[arg(
        long,
        env = "NOTEVOX_MODEL_URL",
        default_value = "https://teachablemachine.withgoogle.com/models/P9W9Ta1SH/"
    )]
    model_url: String,

    /// Camera capture width
    #[arg(long, default_value_t = 300)]
    width: u32,

    /// Camera capture height
    #[arg(long, default_value_t = 300)]
    height: u32,

    /// Disable the mirrored preview orientation
    #[arg(long)]
    no_mirror: bool,

    /// Milliseconds between detection ticks
    #[arg(long, default_value_t = 33)]
    interval_ms: u64,

    /// Camera device index (hardware backends only)
    #[arg(long, default_value_t = 0)]
    camera_index: i32,

    /// Disable speech output
    #[arg(long)]
    no_speech: bool,
}

fn init_logging() -> Result<()> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "notevox.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(guard);
    Ok(())
}

#[cfg(feature = "opencv")]
fn build_camera(cli: &Cli) -> Box<dyn CameraSource> {
    Box::new(notevox_camera::OpencvCamera::new(cli.camera_index))
}

#[cfg(not(feature = "opencv"))]
fn build_camera(_cli: &Cli) -> Box<dyn CameraSource> {
    tracing::warn!("built without a hardware camera backend; using the synthetic camera");
    Box::new(notevox_camera::SyntheticCamera::new())
}

async fn build_announcer(no_speech: bool) -> Arc<dyn SpeechAnnouncer> {
    if no_speech {
        return Arc::new(notevox_speech::NoopAnnouncer::new());
    }
    #[cfg(feature = "espeak")]
    if let Some(espeak) = notevox_speech::EspeakAnnouncer::detect().await {
        return Arc::new(espeak);
    }
    Arc::new(notevox_speech::NoopAnnouncer::new())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    tracing::info!("Starting NoteVox");

    let cli = Cli::parse();
    let config = SessionConfig {
        camera_width: cli.width,
        camera_height: cli.height,
        mirrored: !cli.no_mirror,
        model_location: ModelLocation::new(&cli.model_url),
        poll_interval: Duration::from_millis(cli.interval_ms),
    };

    let camera = build_camera(&cli);
    let loader: Arc<dyn ClassifierLoader> = Arc::new(HttpLoader::new());
    let announcer = build_announcer(cli.no_speech).await;

    let session = Arc::new(DetectionSession::new(
        config,
        camera,
        loader,
        announcer,
        real_clock(),
    ));

    let display_handle = tokio::spawn(display::run(session.subscribe()));

    crossterm::terminal::enable_raw_mode()?;
    let (key_tx, mut key_rx) = mpsc::channel(16);
    let key_thread = spawn_key_listener(key_tx);
    println!("Press \"s\" to start detection, Escape to stop, \"q\" to quit.\r");

    loop {
        tokio::select! {
            command = key_rx.recv() => match command {
                Some(KeyCommand::Start) => {
                    let session = session.clone();
                    tokio::spawn(async move { session.start().await });
                }
                Some(KeyCommand::Stop) => session.stop(),
                Some(KeyCommand::Quit) | None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.stop();
    drop(key_rx);
    display_handle.abort();
    let _ = key_thread.join();
    crossterm::terminal::disable_raw_mode()?;
    tracing::info!("NoteVox shut down");
    Ok(())
}
