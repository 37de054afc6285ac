pub mod client;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::StudyClient;

#[derive(Parser)]
#[command(name = "study")]
#[command(about = "Study CLI - command-line client for the Study service")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "STUDY_API_URL", default_value = "http://localhost:8080", help = "Base URL of the Study service")]
    pub url: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create a study")]
    Create {
        #[arg(long, help = "Study name")]
        name: String,
        #[arg(long, help = "Optional description")]
        description: Option<String>,
    },

    #[command(about = "List all studies")]
    List,

    #[command(about = "Delete a study by id")]
    Delete {
        #[arg(help = "Study ID to delete")]
        id: i64,
    },

    #[command(about = "Check service health")]
    Health,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = StudyClient::new(cli.url);

    match cli.command {
        Commands::Create { name, description } => {
            let study = client.create(&name, description.as_deref()).await?;
            let message = match study.id {
                Some(id) => format!("Created study {} ({})", id, study.name),
                None => format!("Created study {}", study.name),
            };
            utils::output_success(&output_format, &message, &study)
        }
        Commands::List => {
            let studies = client.list().await?;
            utils::output_studies(&output_format, &studies)
        }
        Commands::Delete { id } => {
            client.delete(id).await?;
            utils::output_success(&output_format, &format!("Deleted study {}", id), &serde_json::json!({ "id": id }))
        }
        Commands::Health => {
            let (status, body) = client.health().await?;
            let message = format!("{} is {} ({})", client.base_url(), body["status"].as_str().unwrap_or("unknown"), status);
            utils::output_success(&output_format, &message, &body)?;
            if !status.is_success() {
                anyhow::bail!("service is not healthy");
            }
            Ok(())
        }
    }
}
