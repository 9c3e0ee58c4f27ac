use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use stockroom::cli::{seed_categories, seed_products};
use stockroom::state::init_app_state;
use stockroom_config::ServerConfig;
use stockroom_models::RegisterRequest;

#[derive(Parser)]
#[command(name = "stockroom-cli")]
#[command(about = "Stockroom CLI - Administrative tools for Stockroom", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Optional login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create one category per product label
    SeedCategories,
    /// Seed the database with fake products
    SeedProducts {
        /// Number of products to attempt
        #[arg(short = 'c', long, default_value = "25")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let state = init_app_state(&ServerConfig::from_env()).await?;

    match cli.command {
        Commands::CreateUser {
            username,
            email,
            full_name,
            password,
        } => {
            let request = RegisterRequest {
                username,
                email: Some(prompt_or(email, "Email address")?),
                full_name: Some(prompt_or(full_name, "Full name")?),
                password: Some(match password {
                    Some(password) => password,
                    None => Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()?,
                }),
            };

            match state.auth.register(request).await {
                Ok(user) => {
                    println!("\n✅ User created successfully!");
                    println!("   Id: {}", user.id);
                    println!("   Email: {}", user.email);
                    println!("   Name: {}", user.full_name);
                }
                Err(e) => {
                    eprintln!("\n❌ Error creating user: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::SeedCategories => {
            println!("🌱 Seeding categories...");
            seed_categories(&state.categories).await?;
        }
        Commands::SeedProducts { count } => {
            println!("🌱 Seeding {} products...", count);
            seed_products(&state.products, count).await?;
        }
    }

    Ok(())
}

fn prompt_or(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}
