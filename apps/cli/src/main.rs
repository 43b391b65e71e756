use std::{io::Write, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{StudioClient, DEFAULT_SERVER_URL};
use shared::domain::{idea_label, Topic};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Generate video ideas for a topic and a script for one of them")]
struct Args {
    #[arg(long, env = "STUDIO_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    #[arg(long)]
    topic: String,
    /// 1-based idea number to turn into a script. Without it only ideas are printed.
    #[arg(long)]
    pick: Option<usize>,
    #[arg(long, default_value_t = 120)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let args = Args::parse();

    let Some(topic) = Topic::parse(&args.topic) else {
        bail!("Please enter a topic first!");
    };
    let client = StudioClient::new(
        &args.server_url,
        Duration::from_secs(args.request_timeout_secs),
    )?;
    run(&client, &topic, args.pick, &mut std::io::stdout().lock()).await
}

async fn run(
    client: &StudioClient,
    topic: &Topic,
    pick: Option<usize>,
    out: &mut impl Write,
) -> Result<()> {
    let ideas = client
        .generate_ideas(topic.as_str())
        .await
        .inspect_err(|err| tracing::error!(%topic, "idea generation failed: {err}"))
        .context("Error generating ideas. Please try again.")?;
    for (index, idea) in ideas.iter().enumerate() {
        writeln!(out, "{}: {idea}", idea_label(index))?;
    }

    let Some(pick) = pick else {
        return Ok(());
    };
    let idea = pick_idea(&ideas, pick)?;
    let script = client
        .generate_script(idea)
        .await
        .inspect_err(|err| tracing::error!(pick, "script generation failed: {err}"))
        .context("Error generating script. Please try again.")?;
    writeln!(out)?;
    writeln!(out, "{script}")?;
    Ok(())
}

fn pick_idea(ideas: &[String], pick: usize) -> Result<&str> {
    match pick.checked_sub(1).and_then(|index| ideas.get(index)) {
        Some(idea) => Ok(idea),
        None => bail!("--pick must be between 1 and {}, got {pick}", ideas.len()),
    }
}
