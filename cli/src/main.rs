use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use stovetop_core::ai::prompts::build_recipe_prompt;
use stovetop_core::ai::OpenAiClient;
use stovetop_core::{GenerationRequest, InMemoryRecipeStore, RecipeGenerator};

#[derive(Parser)]
#[command(name = "stovetop")]
#[command(about = "Stovetop CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a recipe once and print the response body
    Generate(RequestArgs),
    /// Print the prompt messages without calling the generation service
    Prompt(RequestArgs),
}

#[derive(Args)]
struct RequestArgs {
    /// Comma-separated ingredients, e.g. "beef, potato"
    prompt: String,
    /// Ask for a vegetarian recipe
    #[arg(long)]
    vegetarian: bool,
    /// Ask for a gluten-free recipe
    #[arg(long)]
    gluten_free: bool,
}

impl From<RequestArgs> for GenerationRequest {
    fn from(args: RequestArgs) -> Self {
        Self {
            prompt: args.prompt,
            is_vegetarian: args.vegetarian,
            is_gluten_free: args.gluten_free,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate(args.into()).await?,
        Commands::Prompt(args) => print_prompt(&args.into()),
    }

    Ok(())
}

async fn generate(request: GenerationRequest) -> Result<()> {
    let client = OpenAiClient::from_env().context("Failed to configure generation service")?;
    let generator = RecipeGenerator::new(Arc::new(client), Arc::new(InMemoryRecipeStore::new()));

    let outcome = generator.generate(&request).await;
    let success = outcome.is_success();
    println!("{}", serde_json::to_string_pretty(&outcome.into_response())?);

    if !success {
        bail!("Recipe generation did not succeed");
    }
    Ok(())
}

fn print_prompt(request: &GenerationRequest) {
    for message in build_recipe_prompt(request).into_messages() {
        println!("--- {} ---", message.role.as_str());
        println!("{}\n", message.content);
    }
}
