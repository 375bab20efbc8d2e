use crate::commands::{
    run_assess, run_dataset_clean, run_dataset_score, run_features, AssessArgs, DatasetArgs,
    FeaturesArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use review_guard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Review Guard",
    about = "Score user reviews for quality, relevancy, and policy violations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single review and print the assessment as JSON
    Assess(AssessArgs),
    /// Print the text features extracted from a review
    Features(FeaturesArgs),
    /// Batch jobs over review CSV exports
    Dataset {
        #[command(subcommand)]
        command: DatasetCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DatasetCommand {
    /// Replace review text with its translation and drop the translation columns
    Clean(DatasetArgs),
    /// Score every review in a CSV export
    Score(DatasetArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Features(args) => run_features(args),
        Command::Dataset {
            command: DatasetCommand::Clean(args),
        } => run_dataset_clean(args),
        Command::Dataset {
            command: DatasetCommand::Score(args),
        } => run_dataset_score(args),
    }
}
