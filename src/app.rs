use std::io::{BufWriter, Write, stdout};

use crate::{
    common::{config::LedgerConfig, error::AppError, error::LedgerError, event::LedgerCommand},
    domain::transaction::Transaction,
    io::{
        reader,
        storage::{self, DirStore},
        writer,
    },
    query::sort_transactions,
    worker::processor::Processor,
};

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let stdout = stdout();
    run_to(args, BufWriter::new(stdout.lock()))
}

/// Command-line entry point writing its CSV to `out`.
///
/// * `accounts` (default) lists the user's accounts.
/// * `transactions` lists the user's history in their saved sort order.
/// * `import <file>` adds every row of a transaction CSV, then lists the
///   accounts. Nothing is saved unless every row applies.
pub fn run_to<I, S, W>(args: I, out: W) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 3 {
        return Err(AppError::MissingArg);
    }
    let mut store = DirStore::open(&args[1])?;
    let username = args[2].trim();
    let mut users = storage::load_users(&store)?;
    let unknown_user = || LedgerError::not_found("user", username);

    match args.get(3).map(String::as_str).unwrap_or("accounts") {
        "accounts" => {
            let ledger = users.ledger(username).ok_or_else(unknown_user)?;
            writer::write_accounts(out, ledger.accounts())?;
        }
        "transactions" => {
            let ledger = users.ledger(username).ok_or_else(unknown_user)?;
            let sort = storage::load_settings(&store)?.sort;
            let all: Vec<&Transaction> = ledger.transactions().iter().collect();
            writer::write_transactions(out, &sort_transactions(&all, sort))?;
        }
        "import" => {
            let path = args.get(4).ok_or(AppError::MissingArg)?;
            let file = std::fs::File::open(path)?;
            let mut csv_reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .flexible(true)
                .from_reader(file);

            let processor = Processor::new(LedgerConfig::default());
            let ledger = users.ledger_mut(username).ok_or_else(unknown_user)?;
            let mut imported = 0usize;
            for row in reader::read_transactions(&mut csv_reader) {
                let input = row.map_err(AppError::Parse)?;
                processor.process(ledger, LedgerCommand::AddTransaction(input))?;
                imported += 1;
            }
            let accounts = ledger.accounts().to_vec();

            storage::save_users(&mut store, &users)?;
            tracing::info!(%username, imported, "transactions imported");
            writer::write_accounts(out, &accounts)?;
        }
        other => return Err(AppError::UnknownCommand(other.to_string())),
    }

    Ok(())
}
