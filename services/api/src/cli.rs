use crate::demo::{run_demo, run_plan, DemoArgs, PlanArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use shopper_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Agentic Shopping Deliberator",
    about = "Demonstrate and run the agentic shopping deliberation pipeline from the command line",
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
    /// Deliberate over a shopping request and print the rendered report
    Plan(PlanArgs),
    /// Run an end-to-end demo over the built-in trek plan and mock catalog
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
        Command::Plan(args) => run_plan(args),
        Command::Demo(args) => run_demo(args),
    }
}
