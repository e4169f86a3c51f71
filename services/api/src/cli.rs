use crate::demo::{run_demo, run_review, DemoArgs, ReviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rainguard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rainguard",
    about = "Event ticketing with rain protection and cancellation claim review",
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
    /// Score a single cancellation claim and print the review
    Review(ReviewArgs),
    /// Run a scripted ticketing and claim review walkthrough against in-memory storage
    Demo(DemoArgs),
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
        Command::Review(args) => run_review(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
