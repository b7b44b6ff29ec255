use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mouthpiece::animation::AvatarRig;
use mouthpiece::chat::{Animation, ChatResponse, FacialExpression};
use mouthpiece::expression::ExpressionCatalog;
use mouthpiece::integration::{AvatarConfig, AvatarRuntime, AvatarRuntimeBuilder, SynthesizerKind};
use mouthpiece::lipsync::{FfmpegTranscoder, LipsyncService, RhubarbExtractor};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Talking avatar lip sync and expression runtime
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a saved chat response headlessly
    Play {
        /// JSON file holding `{ "messages": [...] }`
        file: PathBuf,
    },

    /// Speak text without audio, mouth driven by the synthetic envelope
    Say {
        text: String,

        #[arg(short, long, default_value = "default")]
        expression: String,

        #[arg(short, long, default_value = "Talking_0")]
        animation: String,
    },

    /// Run one chat turn through the configured responder and play it
    Chat {
        /// Leave empty for the intro messages
        text: Option<String>,
    },

    /// Extract a cue timeline from an audio file and print it
    Cues { audio: PathBuf },

    /// List the expression catalog
    Expressions,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mouthpiece=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AvatarConfig::load(path)?,
        None => {
            let mut config = AvatarConfig::default();
            config.apply_env();
            config
        }
    };

    match cli.command {
        Commands::Play { file } => {
            let json = std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let response = ChatResponse::from_json(&json)?;
            info!("Playing {} message(s) from {}", response.messages.len(), file.display());

            let runtime = AvatarRuntimeBuilder::new().with_config(config).build().await?;
            play(runtime, &response).await?;
        }
        Commands::Say {
            text,
            expression,
            animation,
        } => {
            let expression = FacialExpression::parse_lenient(&expression);
            let animation = Animation::parse_lenient(&animation);
            let config = config.with_synthesizer(SynthesizerKind::None).with_cue_extraction(false);

            let runtime = AvatarRuntimeBuilder::new().with_config(config).build().await?;
            let mut rig = AvatarRig::arkit_head();
            runtime
                .play_until_idle(&mut rig, |handle| {
                    handle.say(text, expression.as_str(), animation.as_str())?;
                    Ok(1)
                })
                .await?;
        }
        Commands::Chat { text } => {
            let runtime = AvatarRuntimeBuilder::new().with_config(config).build().await?;
            let handle = runtime.handle();
            let response = handle.chat().process_message(text.as_deref()).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            info!("Turn timings: {}", handle.chat().last_metrics().summary());
            play(runtime, &response).await?;
        }
        Commands::Cues { audio } => {
            let service = LipsyncService::new(
                Arc::new(FfmpegTranscoder::new(&config.paths.ffmpeg)),
                Arc::new(RhubarbExtractor::new(&config.paths.rhubarb)),
                &config.paths.audios_dir,
            )
            .with_timeout(config.lifecycle.cue_timeout());
            let timeline = service.generate(&audio).await?;
            println!("{}", timeline.to_json()?);
        }
        Commands::Expressions => {
            let catalog = ExpressionCatalog::builtin();
            for name in catalog.names() {
                println!("{:<16} {} targets", name, catalog.lookup(name).len());
            }
        }
    }

    Ok(())
}

/// Render a response headlessly until every message has played
async fn play(runtime: AvatarRuntime, response: &ChatResponse) -> Result<()> {
    let mut rig = AvatarRig::arkit_head();
    let summary = runtime
        .play_until_idle(&mut rig, |handle| {
            handle.play_response(response)?;
            Ok(response.messages.len())
        })
        .await?;
    info!("Played {} of {} message(s)", summary.played, summary.queued);
    Ok(())
}
