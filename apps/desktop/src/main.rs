use std::path::PathBuf;

use activity_core::{
    load_settings, load_settings_from, ActivityController, AttemptReporter, UniformTileLayout,
};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shared::{domain::StepId, protocol::join_step_ids};
use tracing_subscriber::EnvFilter;

/// Headless tile geometry used to replay an order as drag gestures.
const LAYOUT: UniformTileLayout = UniformTileLayout {
    origin_y: 0.0,
    tile_height: 40.0,
    gap: 0.0,
};

#[derive(Parser, Debug)]
struct Cli {
    /// Settings file; defaults to ./activity.toml when present.
    #[arg(long)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the steps in a fresh shuffled order.
    Steps,
    /// Submit an order and record the attempt with the collector.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Step ids, comma separated, in the order to submit. Accepts the
        /// collector's own "1, 2, 3" form.
        #[arg(long, value_delimiter = ',', required = true, value_parser = parse_step_id)]
        order: Vec<u32>,
    },
}

fn parse_step_id(raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u32>()
        .map_err(|err| format!("invalid step id '{trimmed}': {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    }
    .context("failed to load activity settings")?;
    let model = settings.sequence_model()?;

    match cli.command {
        Command::Steps => {
            println!("{}", settings.activity_title);
            for (position, step) in model.shuffled_copy().iter().enumerate() {
                println!("{:>2}. [{}] {}", position + 1, step.id, step.label);
            }
        }
        Command::Submit { name, email, order } => {
            let reporter =
                AttemptReporter::new(settings.collector()?, tokio::runtime::Handle::current());
            let mut controller = ActivityController::new(model.clone(), reporter);
            controller.start(&name, &email)?;
            let requested: Vec<StepId> = order.into_iter().map(StepId).collect();
            replay_order(&mut controller, &requested);
            if controller.surface().current_order() != requested {
                bail!(
                    "order must list every step id exactly once; expected ids: {}",
                    join_step_ids(&model.canonical_ids())
                );
            }

            let submission = controller.on_submit()?;
            println!("{}", submission.feedback.message());
            // Only waited on so the process does not exit mid-delivery.
            let outcome = submission.report.outcome().await;
            tracing::debug!(?outcome, "report finished");
        }
    }

    Ok(())
}

/// Drags each id to the top of the surface, last id first.
fn replay_order(controller: &mut ActivityController, order: &[StepId]) {
    for id in order.iter().rev().copied() {
        if controller.on_drag_start(id) {
            controller.on_drag_move(LAYOUT.origin_y - 1.0, &LAYOUT);
            controller.on_drag_end(id);
        }
    }
}
