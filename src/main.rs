use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use glab_ops::App;
use glab_ops::Config;
use glab_ops::commands::commit::CommitRequest;
use glab_ops::commands::commit::FileContent;
use glab_ops::commands::init::cmd_init;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer as _;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[derive(Parser)]
#[command(name = "glab-ops")]
#[command(about = "Create branches, commits and merge requests through the GitLab GraphQL API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the GraphQL endpoint (and token) to .git/config
    Init {
        /// GraphQL endpoint, e.g. https://gitlab.com/api/graphql
        #[arg(long)]
        endpoint: String,
        /// Personal access token
        #[arg(long)]
        token: Option<String>,
    },
    /// Check read and write access with the configured credentials
    Check,
    /// Create a branch
    CreateBranch {
        /// Full path of the project, e.g. group/project
        #[arg(short, long)]
        project: String,
        /// Ref to branch from
        #[arg(short, long)]
        base: String,
        /// Name of the new branch
        #[arg(long)]
        branch: String,
    },
    /// Create or update a single file on a branch
    Commit {
        /// Full path of the project, e.g. group/project
        #[arg(short, long)]
        project: String,
        /// Branch to commit to
        #[arg(long)]
        branch: String,
        /// Path of the file inside the repository
        #[arg(short, long)]
        file: String,
        /// New file content
        #[arg(long, conflicts_with = "from", required_unless_present = "from")]
        content: Option<String>,
        /// Read the new file content from a local file
        #[arg(long)]
        from: Option<PathBuf>,
        /// Create the file before updating it
        #[arg(long)]
        create: bool,
        /// Commit message used when creating the file
        #[arg(long)]
        create_message: String,
        /// Commit message used when updating the file
        #[arg(long)]
        update_message: String,
    },
    /// Create a merge request and print its URL
    CreateMr {
        /// Full path of the project, e.g. group/project
        #[arg(short, long)]
        project: String,
        /// Source branch
        #[arg(short, long)]
        source: String,
        /// Target branch
        #[arg(short, long)]
        target: String,
        /// Merge request title
        #[arg(long)]
        title: String,
    },
}

fn setup_logging() -> Result<()> {
    let timer = tracing_subscriber::fmt::time::ChronoLocal::new("%H:%M:%S%.3f".into());
    let format = tracing_subscriber::fmt::format().with_timer(timer);
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;
    let subscriber = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(subscriber).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;
    let cli = Cli::parse();

    let app = || -> Result<_> { Ok(App::from_config(&Config::load()?)) };
    let stdout = &mut std::io::stdout();

    match cli.command {
        Commands::Init { endpoint, token } => cmd_init(&endpoint, token.as_deref(), stdout)?,
        Commands::Check => app()?.cmd_check(stdout).await?,
        Commands::CreateBranch {
            project,
            base,
            branch,
        } => {
            app()?
                .cmd_create_branch(&project, &base, &branch, stdout)
                .await?
        }
        Commands::Commit {
            project,
            branch,
            file,
            content,
            from,
            create,
            create_message,
            update_message,
        } => {
            let content = match (&content, &from) {
                (Some(content), _) => FileContent::Inline(content),
                (None, Some(path)) => FileContent::Local(path),
                (None, None) => anyhow::bail!("Either --content or --from is required"),
            };
            let request = CommitRequest {
                project: &project,
                branch: &branch,
                file_path: &file,
                content,
                create,
                create_message: &create_message,
                update_message: &update_message,
            };
            app()?.cmd_commit(request, stdout).await?
        }
        Commands::CreateMr {
            project,
            source,
            target,
            title,
        } => {
            app()?
                .cmd_create_mr(&project, &source, &target, &title, stdout)
                .await?
        }
    }

    Ok(())
}
