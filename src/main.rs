use anyhow::Context;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use voice_grocer::catalog::StaticCatalog;
use voice_grocer::config::VoiceConfig;
use voice_grocer::engine::{ConsoleSynthesizer, SayCommandSynthesizer, StdinRecognizer, SynthesisEngine};
use voice_grocer::kernel::{Reactor, SessionController, SessionEvent};

const GREETING: &str = "Welcome to the voice grocery store. Say help to hear what I can do.";

fn load_config() -> anyhow::Result<VoiceConfig> {
    match std::env::var("VOICE_GROCER_CONFIG") {
        Ok(path) => VoiceConfig::from_path(&path).with_context(|| format!("loading config from {}", path)),
        Err(_) => Ok(VoiceConfig::default()),
    }
}

fn load_catalog() -> anyhow::Result<StaticCatalog> {
    match std::env::var("VOICE_GROCER_CATALOG") {
        Ok(path) => StaticCatalog::from_path(&path).with_context(|| format!("loading catalog from {}", path)),
        Err(_) => Ok(StaticCatalog::demo()),
    }
}

async fn run_session<S: SynthesisEngine>(
    config: VoiceConfig,
    catalog: StaticCatalog,
    synthesizer: S,
    tx: mpsc::Sender<SessionEvent>,
    rx: mpsc::Receiver<SessionEvent>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let recognizer = StdinRecognizer::new(tx, shutdown.clone());
    let mut controller = SessionController::new(config, recognizer, synthesizer);
    controller.init().context("initializing speech engines")?;
    controller.start_listening();
    controller.speak(GREETING);

    let mut reactor = Reactor::new(rx, controller, catalog, shutdown);
    reactor.run().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let config = load_config()?;
    let catalog = load_catalog()?;
    tracing::info!("Voice grocer booting with {} products", catalog.entries().len());

    let (tx, rx) = mpsc::channel(100);
    let shutdown = CancellationToken::new();

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl+C received");
            ctrl_c.cancel();
        }
    });

    println!("Type a command and press Enter (Ctrl+D to quit).");

    match std::env::var("VOICE_GROCER_TTS").as_deref() {
        Ok("say") => {
            let synthesizer = SayCommandSynthesizer::new(tx.clone());
            run_session(config, catalog, synthesizer, tx, rx, shutdown).await
        }
        _ => {
            let synthesizer = ConsoleSynthesizer::new(tx.clone());
            run_session(config, catalog, synthesizer, tx, rx, shutdown).await
        }
    }
}
