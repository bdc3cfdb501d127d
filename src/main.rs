use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pocket_ledger=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match pocket_ledger::app::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "pocket_ledger failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
