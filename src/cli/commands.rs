//! CLI commands

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::agent::flow::{self, Direction};
use crate::api::{ApiServer, Latency};
use crate::campaign::{transcript, Script};
use crate::client::{ApiClient, PollOutcome, RunPoller, RunSource, TranscriptView};
use crate::config::Config;
use crate::core::service::ConsoleService;
use crate::core::state::AppState;
use crate::store::models::{filter_logs, Agent, AgentPatch, CampaignRun, StepKind};
use crate::store::Store;

#[derive(Parser)]
#[command(name = "voxflow")]
#[command(about = "Mock backend and console for the VoxFlow voice AI platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: ~/.voxflow/config.yml)
    #[arg(long)]
    config: Option<String>,

    /// API base URL, overrides client.base_url
    #[arg(long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the mock API server
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Start with an empty store instead of the demo data
        #[arg(long)]
        empty: bool,
    },

    /// Show agent, campaign and log counts
    Stats,

    /// List all agents
    Agents,

    /// Show one agent and its flow
    Agent {
        /// Agent ID
        id: String,
    },

    /// Create a new agent
    CreateAgent {
        /// Agent name
        #[arg(long)]
        name: Option<String>,

        /// Language
        #[arg(long)]
        language: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Edit an agent's name, language or description
    UpdateAgent {
        /// Agent ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New language
        #[arg(long)]
        language: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Append a flow step to an agent
    AddStep {
        /// Agent ID
        agent_id: String,

        /// Step type (prompt, intent)
        #[arg(long, default_value = "prompt")]
        kind: String,

        /// Step content (default: placeholder text)
        #[arg(long)]
        content: Option<String>,
    },

    /// Replace the content of a flow step
    EditStep {
        /// Agent ID
        agent_id: String,

        /// Step ID
        step_id: String,

        /// New content
        content: String,
    },

    /// Remove a flow step from an agent
    DeleteStep {
        /// Agent ID
        agent_id: String,

        /// Step ID
        step_id: String,
    },

    /// Move a flow step one position up or down
    MoveStep {
        /// Agent ID
        agent_id: String,

        /// Step ID
        step_id: String,

        /// Direction (up, down)
        direction: String,
    },

    /// List all campaigns
    Campaigns,

    /// Start a campaign demo and follow its transcript
    Start {
        /// Campaign ID
        campaign_id: String,

        /// Return right after starting
        #[arg(long)]
        detach: bool,
    },

    /// Follow a run's transcript until it completes or pauses
    Watch {
        /// Run ID
        run_id: String,
    },

    /// Pause a run
    Pause {
        /// Run ID
        run_id: String,
    },

    /// Stop a run
    Stop {
        /// Run ID
        run_id: String,
    },

    /// Show the activity log, newest first
    Logs {
        /// Only entries whose title or description contain this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Export a run's transcript to a text file
    Export {
        /// Run ID
        run_id: String,

        /// Output path (default: ./transcript-<run_id>.txt)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.client.base_url = url;
    }

    // Create a multi-threaded runtime for CLI operations
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let client = Arc::new(ApiClient::new(
            config.client.base_url.clone(),
            config.client.timeout(),
        ));

        match cli.command {
        Commands::Serve { host, port, empty } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let store = if empty || !config.simulation.seed {
                Store::new()
            } else {
                Store::seeded()
            };
            let service = ConsoleService::new(
                store,
                Script::demo(),
                config.simulation.messages_per_advance,
                config.simulation.advance_mode,
            );
            let state = AppState::new(service, Latency::from_config(&config.latency));

            let server = ApiServer::new(config.bind_addr(), state, config.simulation.tick_interval());
            server.run().await?;
            Ok(())
        }

        Commands::Stats => {
            let stats = client.stats().await?;
            println!("Agents:    {}", stats.agents);
            println!("Campaigns: {}", stats.campaigns);
            println!("Logs:      {}", stats.logs);
            Ok(())
        }

        Commands::Agents => {
            let agents = client.list_agents().await?;

            if agents.is_empty() {
                println!("No agents found");
            } else {
                for agent in agents {
                    println!(
                        "[{}] {} ({}) - {} steps - {}",
                        short_id(&agent.id),
                        agent.name,
                        agent.language,
                        agent.flow_steps.len(),
                        if agent.description.is_empty() { "-" } else { agent.description.as_str() }
                    );
                }
            }
            Ok(())
        }

        Commands::Agent { id } => {
            let agent = fetch_agent(&client, &id).await?;
            print_agent(&agent);
            Ok(())
        }

        Commands::CreateAgent { name, language, description } => {
            let fields = AgentPatch {
                name,
                language,
                description,
                flow_steps: None,
            };
            let agent = client.create_agent(&fields).await?;

            println!("Created agent: {} ({})", agent.name, agent.id);
            Ok(())
        }

        Commands::UpdateAgent { id, name, language, description } => {
            if name.is_none() && language.is_none() && description.is_none() {
                anyhow::bail!("Nothing to update: pass --name, --language or --description");
            }
            let fields = AgentPatch {
                name,
                language,
                description,
                flow_steps: None,
            };
            let agent = client
                .update_agent(&id, &fields)
                .await?
                .with_context(|| format!("Agent not found: {}", id))?;

            println!("Updated agent: {} ({})", agent.name, agent.id);
            print_agent(&agent);
            Ok(())
        }

        Commands::AddStep { agent_id, kind, content } => {
            let kind = StepKind::from_str(&kind)?;
            let mut agent = fetch_agent(&client, &agent_id).await?;

            let step_id = flow::add_step(&mut agent.flow_steps, kind);
            if let Some(content) = content {
                flow::update_content(&mut agent.flow_steps, &step_id, &content);
            }
            let agent = save_steps(&client, agent).await?;

            println!("Added {} step {}", kind.as_str(), step_id);
            print_agent(&agent);
            Ok(())
        }

        Commands::EditStep { agent_id, step_id, content } => {
            let mut agent = fetch_agent(&client, &agent_id).await?;

            if !flow::update_content(&mut agent.flow_steps, &step_id, &content) {
                anyhow::bail!("Step not found: {}", step_id);
            }
            let agent = save_steps(&client, agent).await?;

            print_agent(&agent);
            Ok(())
        }

        Commands::DeleteStep { agent_id, step_id } => {
            let mut agent = fetch_agent(&client, &agent_id).await?;

            if !flow::delete_step(&mut agent.flow_steps, &step_id) {
                anyhow::bail!("Step not found: {}", step_id);
            }
            let agent = save_steps(&client, agent).await?;

            print_agent(&agent);
            Ok(())
        }

        Commands::MoveStep { agent_id, step_id, direction } => {
            let direction = Direction::from_str(&direction)?;
            let mut agent = fetch_agent(&client, &agent_id).await?;

            if !agent.flow_steps.iter().any(|s| s.id == step_id) {
                anyhow::bail!("Step not found: {}", step_id);
            }
            if flow::move_step(&mut agent.flow_steps, &step_id, direction) {
                agent = save_steps(&client, agent).await?;
            } else {
                println!("Step is already at the edge");
            }

            print_agent(&agent);
            Ok(())
        }

        Commands::Campaigns => {
            let campaigns = client.list_campaigns().await?;

            if campaigns.is_empty() {
                println!("No campaigns found");
            } else {
                for campaign in campaigns {
                    println!(
                        "[{}] {} - {} ({})",
                        short_id(&campaign.id),
                        campaign.name,
                        campaign.agent_name,
                        campaign.status.as_str()
                    );
                }
            }
            Ok(())
        }

        Commands::Start { campaign_id, detach } => {
            let run = client
                .start_campaign(&campaign_id)
                .await?
                .with_context(|| format!("Campaign not found: {}", campaign_id))?;

            println!("Started run: {} ({})", run.id, run.agent_name);
            if detach {
                return Ok(());
            }
            watch(client, &config, &run.id).await
        }

        Commands::Watch { run_id } => watch(client, &config, &run_id).await,

        Commands::Pause { run_id } => {
            let run = client
                .pause_run(&run_id)
                .await?
                .with_context(|| format!("Run not found: {}", run_id))?;

            println!("Campaign paused: {} ({} messages)", run.id, run.transcript.len());
            Ok(())
        }

        Commands::Stop { run_id } => {
            let run = client
                .stop_run(&run_id)
                .await?
                .with_context(|| format!("Run not found: {}", run_id))?;

            println!("Campaign stopped: {} ({} messages)", run.id, run.transcript.len());
            Ok(())
        }

        Commands::Logs { search } => {
            let logs = client.list_logs().await?;
            let logs = filter_logs(logs, search.as_deref().unwrap_or(""));

            if logs.is_empty() {
                if search.is_some() {
                    println!("No matching logs found");
                } else {
                    println!("No logs yet");
                }
            } else {
                for log in logs {
                    println!(
                        "{} [{}] {} - {}",
                        log.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        log.category.as_str(),
                        log.title,
                        log.description
                    );
                }
            }
            Ok(())
        }

        Commands::Export { run_id, output } => {
            let run = client
                .run_status(&run_id)
                .await?
                .with_context(|| format!("Run not found: {}", run_id))?;

            if run.transcript.is_empty() {
                anyhow::bail!("Run {} has no transcript yet", run_id);
            }
            let path = transcript::write_export(&run, output.as_deref())?;

            println!("Transcript exported to {}", path.display());
            Ok(())
        }
        }
    })
}

/// Follow a run, printing messages as they arrive. Ctrl-C stops watching
/// without touching the run.
async fn watch(client: Arc<ApiClient>, config: &Config, run_id: &str) -> Result<()> {
    let poller = RunPoller::new(client, config.client.poll_interval())
        .with_max_failures(config.client.max_poll_failures);
    let mut view = TranscriptView::new();

    let outcome = tokio::select! {
        outcome = poller.watch(run_id, |run| print_fresh(&mut view, run)) => outcome?,
        _ = tokio::signal::ctrl_c() => {
            println!("Stopped watching {}", run_id);
            return Ok(());
        }
    };

    match outcome {
        PollOutcome::Settled(run) => {
            println!(
                "Run {} is {} ({} messages)",
                run.id,
                run.status.as_str(),
                run.transcript.len()
            );
        }
        PollOutcome::Missing => println!("Run not found: {}", run_id),
    }
    Ok(())
}

fn print_fresh(view: &mut TranscriptView, run: &CampaignRun) {
    for msg in view.apply(run) {
        println!("[{}] {}", msg.role.as_str().to_uppercase(), msg.content);
    }
}

async fn fetch_agent(client: &ApiClient, id: &str) -> Result<Agent> {
    client
        .get_agent(id)
        .await?
        .with_context(|| format!("Agent not found: {}", id))
}

async fn save_steps(client: &ApiClient, agent: Agent) -> Result<Agent> {
    let fields = AgentPatch {
        flow_steps: Some(agent.flow_steps),
        ..AgentPatch::default()
    };
    client
        .update_agent(&agent.id, &fields)
        .await?
        .with_context(|| format!("Agent not found: {}", agent.id))
}

fn print_agent(agent: &Agent) {
    println!("{} ({})", agent.name, agent.id);
    println!("Language: {}", agent.language);
    if !agent.description.is_empty() {
        println!("{}", agent.description);
    }
    if agent.flow_steps.is_empty() {
        println!("No flow steps");
    }
    for step in &agent.flow_steps {
        println!(
            "  {}. [{}] {} ({})",
            step.order + 1,
            step.kind().as_str(),
            step.content(),
            short_id(&step.id)
        );
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
