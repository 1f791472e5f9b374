mod cli;

use cli::Cli;
use metascan::backends::MetaDefenderClient;
use metascan::{KeyFile, ScanError, ScanWorkflow, WorkflowOutcome};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(WorkflowOutcome::Rendered { cached, .. }) => {
            tracing::debug!(cached, "report printed");
            ExitCode::SUCCESS
        }
        // The diagnostic has already been printed; a failed request is not fatal.
        Ok(WorkflowOutcome::Aborted { .. }) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<WorkflowOutcome, ScanError> {
    let api_key = KeyFile::load(&cli.keys)?;
    let config = cli.client_config(api_key);
    let poll = config.poll.clone();

    let client = MetaDefenderClient::new(config)?;
    let workflow = ScanWorkflow::new(client).with_poll(poll);

    workflow.run(&cli.file, &mut std::io::stdout()).await
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
