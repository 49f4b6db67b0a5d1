//! tts-ui — command-line front end for the TTS backend
//!
//! Usage:
//!   tts-ui voices [--architecture A] [--language L] [--accent X] [--gender G]
//!   tts-ui speak <text> [--voice ID] [--model M] [--sample-rate N] [--out FILE]
//!   tts-ui config
//!   tts-ui set backend|provider <url>
//!   tts-ui set filter <field> <value>
//!   tts-ui health

use anyhow::{bail, Context};
use std::path::PathBuf;
use std::sync::Arc;
use tts_ui_client::controller::{NullPlayer, Status, UiSurface};
use tts_ui_client::settings::{self, FileStore, FilterField, Settings};
use tts_ui_client::view::render_metadata;
use tts_ui_client::{BackendClientBuilder, Controller};

/// Alerts go to stderr, the status line to the log.
struct TerminalSurface;

impl UiSurface for TerminalSurface {
    fn alert(&self, message: &str) {
        eprintln!("!! {message}");
    }

    fn status(&self, status: &Status) {
        if status.is_error() {
            tracing::warn!(status = %status);
        } else {
            tracing::info!(status = %status);
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "voices" => cmd_voices(&args[2..]).await,
        "speak" => cmd_speak(&args[2..]).await,
        "config" => cmd_config().await,
        "set" => cmd_set(&args[2..]),
        "health" => cmd_health().await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"tts-ui — text-to-speech backend client

USAGE:
    tts-ui <COMMAND> [OPTIONS]

COMMANDS:
    voices [--architecture A] [--language L] [--accent X] [--gender G]
                                List voices (filters are remembered)
    speak <text> [--voice ID] [--model M] [--sample-rate N] [--out FILE]
                                Synthesize text and save the audio
    config                      Show resolved settings
    set backend <url>           Persist the backend base URL
    set provider <url>          Persist the provider URL override ("" clears it)
    set filter <field> <value>  Persist a voice filter
    health                      Check the backend health endpoint
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    TTS_UI_ORIGIN               Backend URL when none is set (default http://localhost:8000)
    TTS_UI_SETTINGS_PATH        Settings file location
    TTS_UI_HTTP_TIMEOUT_SECS    Request timeout (default: none)
    TTS_UI_PROXY_URL            Proxy for all requests
    RUST_LOG                    Log filter (default: info)"#
    );
}

fn cmd_version() {
    println!("tts-ui {}", env!("CARGO_PKG_VERSION"));
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Arguments that are neither flags nor flag values.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg.starts_with("--") {
            skip = true;
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn load_settings() -> anyhow::Result<Settings> {
    let path = settings::env::settings_path();
    let store = FileStore::open(&path)
        .with_context(|| format!("opening settings at {}", path.display()))?;
    Ok(Settings::load(Arc::new(store), settings::env::origin())?)
}

fn controller() -> anyhow::Result<Controller> {
    let settings = load_settings()?;
    let client = BackendClientBuilder::from_env().build()?;
    Ok(Controller::new(
        settings,
        client,
        Arc::new(TerminalSurface),
        Arc::new(NullPlayer),
    ))
}

async fn cmd_voices(args: &[String]) -> anyhow::Result<()> {
    let mut ui = controller()?;
    for field in FilterField::ALL {
        if let Some(value) = flag_value(args, &format!("--{}", field.as_str())) {
            ui.edit_filter(field, value);
        }
    }

    ui.start().await?;
    let page = &ui.state().page;
    for (name, select) in [
        ("architecture", &page.architecture),
        ("language", &page.language),
        ("accent", &page.accent),
        ("gender", &page.gender),
    ] {
        let values: Vec<&str> = select
            .options
            .iter()
            .skip(1)
            .map(|o| o.value.as_str())
            .collect();
        let selected = if select.selected.is_empty() {
            "Any"
        } else {
            select.selected.as_str()
        };
        println!("{name:<13} [{selected}] {}", values.join(", "));
    }
    println!();
    for option in &page.voices {
        let marker = if page.selected_voice.as_deref() == Some(option.value.as_str()) {
            "*"
        } else {
            " "
        };
        match &option.sample {
            Some(sample) => println!("{marker} {:<28} {}  <{}>", option.value, option.label, sample),
            None => println!("{marker} {:<28} {}", option.value, option.label),
        }
    }
    println!("\n{} voice(s)", page.voices.len());
    Ok(())
}

async fn cmd_speak(args: &[String]) -> anyhow::Result<()> {
    let text = positionals(args).join(" ");
    let mut ui = controller()?;
    // Voice list failures are already reported; synthesis can still proceed.
    let _ = ui.start().await;

    if let Some(voice) = flag_value(args, "--voice") {
        ui.select_voice(voice);
        if ui.state().model != voice {
            ui.set_model(voice);
        }
    }
    if let Some(model) = flag_value(args, "--model") {
        ui.set_model(model);
    }
    if let Some(rate) = flag_value(args, "--sample-rate") {
        ui.set_sample_rate(rate);
    }

    ui.submit(&text).await?;

    if let Some(meta) = render_metadata(&ui.state().metadata) {
        println!("{meta}");
    }
    let Some(audio) = ui.audio() else {
        bail!("no audio produced");
    };
    let out = flag_value(args, "--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let path = audio.save_to(&out)?;
    println!(
        "Saved {} bytes ({}) to {}",
        audio.len(),
        audio.content_type(),
        path.display()
    );
    Ok(())
}

async fn cmd_config() -> anyhow::Result<()> {
    let mut ui = controller()?;
    let remote = ui.load_config().await;
    let s = ui.settings();
    println!("settings file : {}", settings::env::settings_path().display());
    println!("backend       : {}", s.backend_url());
    println!(
        "provider      : {} ({})",
        s.provider_url(),
        if s.provider_override().is_some() {
            "override"
        } else if remote {
            "backend config"
        } else {
            "default"
        }
    );
    let f = s.filters();
    println!(
        "filters       : architecture={:?} language={:?} accent={:?} gender={:?}",
        f.architecture, f.language, f.accent, f.gender
    );
    Ok(())
}

fn cmd_set(args: &[String]) -> anyhow::Result<()> {
    let mut settings = load_settings()?;
    match args {
        [what, url] if what == "backend" => settings.set_backend_url(url)?,
        [what, url] if what == "provider" => settings.set_provider_url(url)?,
        [what] if what == "provider" => settings.set_provider_url("")?,
        [what, field, value] if what == "filter" => {
            let Some(field) = FilterField::parse(field) else {
                bail!("unknown filter '{field}' (architecture, language, accent, gender)");
            };
            settings.set_filter(field, value.trim())?;
        }
        _ => bail!("usage: tts-ui set backend|provider <url> | set filter <field> <value>"),
    }
    println!("saved");
    Ok(())
}

async fn cmd_health() -> anyhow::Result<()> {
    let settings = load_settings()?;
    let client = BackendClientBuilder::from_env().build()?;
    let health = client.health(settings.backend_url()).await?;
    if health.is_ok() {
        println!("{}: ok", settings.backend_url());
        Ok(())
    } else {
        bail!("{}: status '{}'", settings.backend_url(), health.status)
    }
}
