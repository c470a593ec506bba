use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solo_leveling::app::render;
use solo_leveling::catalog::PaperFilter;
use solo_leveling::claude::ApiKeyManager;
use solo_leveling::model::Subject;
use solo_leveling::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "solo-leveling")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show XP, quest and streak totals
    Status,
    /// List daily and weekly quests
    Quests,
    /// Complete a daily quest
    Complete { id: u64 },
    /// Complete a weekly quest and earn its XP
    CompleteWeekly { id: u64 },
    /// Add XP to a subject (scaled by the XP multiplier)
    AddXp {
        /// Subject name, e.g. "math" or "Computer Science"
        subject: Subject,
        amount: u32,
    },
    /// Record a study day in the streak calendar
    StudyDay { day: u32 },
    /// Browse past papers
    Papers {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Get a personalized study tip
    Tip,
    /// Get study recommendations (with a tip unless --subject is given)
    Advise {
        #[arg(short, long)]
        subject: Option<String>,
    },
    /// Get suggested daily quests
    AiQuests {
        /// Replace completed daily quests with the suggestions
        #[arg(long)]
        accept: bool,
    },
    /// Generate a study plan
    Plan {
        /// Time available, e.g. "45 minutes"
        #[arg(num_args = 1.., required = true)]
        time: Vec<String>,
    },
    /// Local past-paper vault
    Vault {
        #[command(subcommand)]
        command: VaultCommand,
    },
    /// Manage the Claude API key
    Key {
        #[command(subcommand)]
        command: KeyCommand,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    #[arg(short, long)]
    subject: Option<String>,
    #[arg(short, long)]
    difficulty: Option<String>,
    #[arg(short, long)]
    board: Option<String>,
}

impl FilterArgs {
    fn parse(&self) -> Result<PaperFilter> {
        PaperFilter::parse(self.subject.as_deref(), self.difficulty.as_deref(), self.board.as_deref())
            .map_err(anyhow::Error::msg)
    }
}

#[derive(Subcommand)]
enum VaultCommand {
    /// List stored papers
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the path of a paper's file
    Download { id: u32 },
    /// Auto-mark a paper
    Mark { id: u32 },
    /// Record a click on a resource link
    Track { url: String },
    /// List study websites
    Resources,
}

#[derive(Subcommand)]
enum KeyCommand {
    /// Store an API key in the system keyring
    Set { key: String },
    /// Remove the stored API key
    Clear,
    /// Show the active API key (masked)
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solo_leveling=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Status);

    if let Commands::Key { command } = command {
        return run_key(command);
    }

    let config = Config::load()?;
    let mut app = App::new(config)?;
    let session = app.start_session()?;
    if session.regenerated() {
        tracing::info!("New weekly quests for {}", session.week());
    }

    match command {
        Commands::Status => {
            let state = app.state()?;
            print!("{}", render::status(&state, &app.overview()?, &app.weekly_progress()?));
        }
        Commands::Quests => {
            print!("{}", render::quests(&app.state()?, &app.weekly_quests()?));
        }
        Commands::Complete { id } => {
            let state = app.complete_quest(id)?;
            match state.quests.iter().find(|q| q.id == id) {
                Some(quest) if quest.completed => println!("Completed: {}", quest.title),
                Some(quest) => println!("Still open: {}", quest.title),
                None => println!("No daily quest #{}", id),
            }
        }
        Commands::CompleteWeekly { id } => {
            let completion = app.complete_weekly_quest(id)?;
            match completion.awarded {
                Some((subject, xp)) => println!("+{} {} XP", xp, subject),
                None => println!("No XP awarded for #{}", id),
            }
        }
        Commands::AddXp { subject, amount } => {
            let state = app.add_xp(subject, amount)?;
            println!("{}: {} XP", subject, state.xp.get(subject));
        }
        Commands::StudyDay { day } => {
            let state = app.record_study_day(day)?;
            println!("{} study days recorded", state.study_streak.len());
        }
        Commands::Papers { filter } => {
            print!("{}", render::past_papers(&app.papers(&filter.parse()?)?));
        }
        Commands::Tip => {
            print!("{}", render::tip(&app.tip().await?));
        }
        Commands::Advise { subject: Some(subject) } => {
            print!("{}", render::recommendations(&app.recommendations(Some(&subject)).await?));
        }
        Commands::Advise { subject: None } => {
            let (tip, recs) = app.insights().await?;
            print!("{}\n{}", render::tip(&tip), render::recommendations(&recs));
        }
        Commands::AiQuests { accept } => {
            print!("{}", render::ai_quests(&app.ai_quests(accept).await?));
        }
        Commands::Plan { time } => {
            let time = time.join(" ");
            // Ctrl-C aborts a streaming plan, which then falls back
            let watcher = app.advisor().transport().cancel_token().map(|token| {
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        token.cancel();
                    }
                })
            });
            let plan = app.study_plan(&time).await?;
            if let Some(watcher) = watcher {
                watcher.abort();
            }
            print!("{}", render::plan(&plan));
        }
        Commands::Vault { command } => run_vault(&app, command)?,
        Commands::Key { command } => run_key(command)?,
    }

    Ok(())
}

fn run_vault(app: &App, command: VaultCommand) -> Result<()> {
    let vault = app.vault()?;
    match command {
        VaultCommand::List { filter } => {
            print!("{}", render::vault_papers(&vault.list(&filter.parse()?)));
        }
        VaultCommand::Download { id } => println!("{}", vault.download(id)?.display()),
        VaultCommand::Mark { id } => print!("{}", render::mark(id, &vault.mark(id)?)),
        VaultCommand::Track { url } => println!("{}: {} clicks", url, vault.track(&url)?),
        VaultCommand::Resources => print!("{}", render::sites(vault.resources())),
    }
    Ok(())
}

fn run_key(command: KeyCommand) -> Result<()> {
    match command {
        KeyCommand::Set { key } => {
            ApiKeyManager::set_api_key(key.trim()).context("Failed to store API key")?;
            println!("API key saved to keyring");
        }
        KeyCommand::Clear => {
            ApiKeyManager::delete_api_key().context("Failed to remove API key")?;
            println!("API key removed");
        }
        KeyCommand::Show => match ApiKeyManager::resolve() {
            Ok(key) => println!("{}", ApiKeyManager::mask_key(&key)),
            Err(e) if e.requires_reauth() => println!("{}", e),
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}
