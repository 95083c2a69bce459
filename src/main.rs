//! Binary entrypoint: mounts galleries and drives them from stdin.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use flickr_gallery_slider::{
    FlickrSource, GalleryConfig, GalleryHandle, GalleryNotice, Slider, StripLayout,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "gallery-slider", about = "Paginated Flickr gallery carousel")]
struct Cli {
    /// Path to YAML config file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Container to mount a gallery into (repeatable)
    #[arg(long = "target", value_name = "SELECTOR")]
    targets: Vec<String>,

    /// Override the configured tag filter
    #[arg(long, value_name = "TAGS")]
    tags: Option<String>,

    /// Flickr API key
    #[arg(long, env = "FLICKR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("flickr_gallery_slider={level}").parse()?)
        .add_directive(format!("gallery_slider={level}").parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Input {
    Next,
    Prev,
    Jump(usize),
    Resize(StripLayout),
    Class(String),
    Html,
    State,
    Quit,
}

fn parse_input(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(None);
    };
    let input = match cmd {
        "next" | "n" => Input::Next,
        "prev" | "p" => Input::Prev,
        "jump" | "j" => {
            let n = words.next().context("usage: jump N")?;
            Input::Jump(n.parse().with_context(|| format!("bad slide number {n:?}"))?)
        }
        "resize" => {
            let (Some(strip), Some(viewport)) = (words.next(), words.next()) else {
                bail!("usage: resize STRIP_WIDTH VIEWPORT_WIDTH");
            };
            Input::Resize(StripLayout {
                strip_width: strip.parse().context("bad strip width")?,
                viewport_width: viewport.parse().context("bad viewport width")?,
            })
        }
        "class" => Input::Class(words.next().context("usage: class NAME")?.to_owned()),
        "html" => Input::Html,
        "state" => Input::State,
        "quit" | "q" | "exit" => Input::Quit,
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(input))
}

async fn apply(slider: &Slider, galleries: &[GalleryHandle], input: Input) -> Result<()> {
    for g in galleries {
        match &input {
            Input::Next => g.next().await?,
            Input::Prev => g.previous().await?,
            Input::Jump(n) => g.jump_to(*n).await?,
            Input::Resize(layout) => g.resize(*layout).await?,
            Input::Html => {
                let snap = g.snapshot();
                println!("<!-- {} [{}] -->", snap.target, snap.classes.join(" "));
                println!("{}", snap.html);
            }
            Input::State => {
                let s = g.state();
                println!(
                    "{}: slide {}/{} (page {})",
                    g.target(),
                    s.current_index,
                    s.total_loaded,
                    s.page
                );
            }
            Input::Class(_) | Input::Quit => {}
        }
    }
    if let Input::Class(name) = input {
        slider.add_decoration_class(&name).await?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = match &cli.config {
        Some(path) => GalleryConfig::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GalleryConfig::default(),
    };
    if let Some(key) = cli.api_key {
        cfg.api_key = key;
    }
    if let Some(tags) = cli.tags {
        cfg.tags = tags;
    }
    let cfg = cfg.validated().context("validating configuration")?;

    let targets = if cli.targets.is_empty() {
        vec![cfg.container_selector.clone()]
    } else {
        cli.targets
    };

    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel();
    let source = Arc::new(FlickrSource::from_config(&cfg));
    let mut slider = Slider::new(cfg, source).with_notices(notice_tx);
    let galleries = slider.create_all(targets);
    info!(count = galleries.len(), "galleries mounted");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            Some(notice) = notice_rx.recv() => match notice {
                GalleryNotice::Ready { target, total } => info!(%total, "{target}: ready"),
                GalleryNotice::FetchFailed { target, page, message } => {
                    warn!(page, "{target}: could not load page: {message}")
                }
                GalleryNotice::EndOfData { target, page } => info!(page, "{target}: no more photos"),
                GalleryNotice::Detached { target } => info!("{target}: detached"),
            },

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(input)) => apply(&slider, &galleries, input).await?,
                    Ok(None) => {}
                    Err(err) => eprintln!("{err:#}"),
                }
            }
        }
    }

    slider.destroy_all().await;
    Ok(())
}
