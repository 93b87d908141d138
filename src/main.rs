use checkout_flow::application::checkout::{Checkout, Collaborators};
use checkout_flow::config::Config;
use checkout_flow::domain::ports::{PaymentBackendRef, SecureClipboardRef};
use checkout_flow::infrastructure::simulated::SimulatedBackend;
use checkout_flow::infrastructure::tracing_sink::TracingAnalytics;
use checkout_flow::interfaces::terminal::{self, Console, Osc52Surface, TerminalView};
use checkout_flow::telemetry;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file (payment options, timings, campaign)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the simulated processing delay, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Make the simulated backend reject every submission
    #[arg(long)]
    fail: bool,

    /// Copy through the system clipboard before falling back to the terminal
    #[arg(long)]
    system_clipboard: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path).into_diagnostic()?,
        None => Config::default(),
    };
    if let Some(delay_ms) = cli.delay_ms {
        config.timings.processing_delay_ms = delay_ms;
        config.validate().into_diagnostic()?;
    }

    let delay = config.timings.processing_delay();
    let backend: PaymentBackendRef = if cli.fail {
        Arc::new(SimulatedBackend::failing(delay))
    } else {
        Arc::new(SimulatedBackend::new(delay))
    };

    let console = Arc::new(Console::stdout());
    let view = Arc::new(TerminalView::new(config.options.clone(), console.clone()));
    let deps = Collaborators {
        view: view.clone(),
        notifier: view.clone(),
        analytics: Arc::new(TracingAnalytics),
        backend,
        secure_clipboard: secure_clipboard(cli.system_clipboard),
        scratch: Arc::new(Osc52Surface::new(console)),
    };

    let checkout = Checkout::new(config, deps);
    checkout.start().await.into_diagnostic()?;

    let stdin = BufReader::new(tokio::io::stdin());
    terminal::run(&checkout, &view, stdin)
        .await
        .into_diagnostic()?;

    Ok(())
}

#[cfg(feature = "system-clipboard")]
fn secure_clipboard(requested: bool) -> Option<SecureClipboardRef> {
    use checkout_flow::infrastructure::system_clipboard::SystemClipboard;

    requested.then(|| Arc::new(SystemClipboard) as SecureClipboardRef)
}

#[cfg(not(feature = "system-clipboard"))]
fn secure_clipboard(requested: bool) -> Option<SecureClipboardRef> {
    if requested {
        tracing::warn!(
            "WARNING: System clipboard requested via --system-clipboard, but 'system-clipboard' feature is not enabled. Falling back to terminal copy."
        );
    }
    None
}
