use crate::{
    common::{config::LedgerConfig, error::LedgerError, event::NewTransaction},
    domain::{
        category::Category,
        ids::TransactionId,
        ledger::Ledger,
        transaction::{Transaction, TransactionKind, TxType},
    },
    worker::{
        Outcome,
        handlers::balance::{self, Direction},
    },
};

pub fn handle(
    ledger: &mut Ledger,
    input: NewTransaction,
    config: &LedgerConfig,
) -> Result<Outcome<Transaction>, LedgerError> {
    let kind = validate(ledger, &input, config)?;

    let tx = Transaction {
        id: TransactionId::generate(),
        description: input.description.trim().to_string(),
        amount: input.amount,
        date: input.date,
        kind,
    };
    balance::ensure_in_range(ledger, &tx, Direction::Apply)?;
    Ok(balance::record(ledger, tx))
}

/// Checks the form input against the ledger and builds the per-type fields.
/// Nothing is mutated here, so a rejected input leaves no trace.
fn validate(
    ledger: &Ledger,
    input: &NewTransaction,
    config: &LedgerConfig,
) -> Result<TransactionKind, LedgerError> {
    if input.description.trim().is_empty() {
        return Err(LedgerError::validation("description is required"));
    }
    if !input.amount.is_positive() {
        return Err(LedgerError::validation("amount must be positive"));
    }
    if ledger.account(&input.account_id).is_none() {
        return Err(LedgerError::validation(format!(
            "unknown account: {}",
            input.account_id
        )));
    }

    let account_id = input.account_id.clone();
    match input.tx_type {
        TxType::Transfer => {
            let to = input
                .to_account_id
                .as_ref()
                .ok_or_else(|| LedgerError::validation("destination account is required"))?;
            if ledger.account(to).is_none() {
                return Err(LedgerError::validation(format!(
                    "unknown destination account: {to}"
                )));
            }
            if to == &account_id {
                return Err(LedgerError::validation(
                    "source and destination accounts must differ",
                ));
            }
            Ok(TransactionKind::Transfer {
                account_id,
                to_account_id: to.clone(),
            })
        }
        TxType::Income | TxType::Expense if input.to_account_id.is_some() => Err(
            LedgerError::validation("only transfers have a destination account"),
        ),
        TxType::Income => Ok(TransactionKind::Income { account_id }),
        TxType::Expense => Ok(TransactionKind::Expense {
            account_id,
            category: input
                .category
                .clone()
                .unwrap_or_else(|| Category::new(&config.default_category)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::*;
    use crate::{
        common::money::Money, domain::ids::AccountId, worker::handlers::create_account,
    };

    fn money(v: i64) -> Money {
        Money::from_str(&v.to_string()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn two_accounts() -> (Ledger, AccountId, AccountId) {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        let wallet = create_account::handle(&mut ledger, "Wallet", money(100), today(), &config)
            .unwrap()
            .value
            .id;
        let bank = create_account::handle(&mut ledger, "Bank", Money::zero(), today(), &config)
            .unwrap()
            .value
            .id;
        (ledger, wallet, bank)
    }

    #[test]
    fn expense_reduces_balance_and_is_recorded() {
        let (mut ledger, wallet, _) = two_accounts();

        let input = NewTransaction::expense(&wallet, "Coffee", money(30), today(), "food");
        let tx = handle(&mut ledger, input, &LedgerConfig::default())
            .unwrap()
            .value;

        assert_eq!(ledger.account(&wallet).unwrap().balance, money(70));
        assert_eq!(tx.category(), "food");
        assert_eq!(ledger.transaction(&tx.id), Some(&tx));
    }

    #[test]
    fn expense_without_category_falls_back_to_other() {
        let (mut ledger, wallet, _) = two_accounts();

        let mut input = NewTransaction::expense(&wallet, "Misc", money(1), today(), "x");
        input.category = None;
        let tx = handle(&mut ledger, input, &LedgerConfig::default())
            .unwrap()
            .value;

        assert_eq!(tx.category(), "other");
    }

    #[test]
    fn transfer_to_same_account_is_rejected_without_state_change() {
        let (mut ledger, wallet, _) = two_accounts();
        let before = ledger.clone();

        let input = NewTransaction::transfer(&wallet, &wallet, "loop", money(10), today());
        let err = handle(&mut ledger, input, &LedgerConfig::default()).unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn transfer_requires_existing_destination() {
        let (mut ledger, wallet, _) = two_accounts();

        let mut input = NewTransaction::transfer(&wallet, &wallet, "x", money(1), today());
        input.to_account_id = None;
        let missing = handle(&mut ledger, input.clone(), &LedgerConfig::default()).unwrap_err();
        input.to_account_id = Some(AccountId::from("ghost"));
        let unknown = handle(&mut ledger, input, &LedgerConfig::default()).unwrap_err();

        assert!(matches!(missing, LedgerError::Validation(_)));
        assert!(matches!(unknown, LedgerError::Validation(_)));
    }

    #[test]
    fn destination_is_forbidden_outside_transfers() {
        let (mut ledger, wallet, bank) = two_accounts();

        let mut input = NewTransaction::income(&wallet, "Salary", money(5), today());
        input.to_account_id = Some(bank);
        let err = handle(&mut ledger, input, &LedgerConfig::default()).unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn income_past_the_largest_balance_is_rejected_without_state_change() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        let huge = Money::from_str("900000000000000").unwrap();
        let wallet = create_account::handle(&mut ledger, "Wallet", huge, today(), &config)
            .unwrap()
            .value
            .id;
        let before = ledger.clone();

        let input = NewTransaction::income(&wallet, "Bonus", huge, today());
        let err = handle(&mut ledger, input, &config).unwrap_err();

        assert_eq!(err, LedgerError::validation("amount out of range"));
        assert_eq!(ledger, before);
    }

    #[test]
    fn transfer_is_rejected_when_the_destination_would_overflow() {
        let (mut ledger, wallet, bank) = two_accounts();
        ledger.accounts[1].balance = Money::new(i64::MAX);
        let before = ledger.clone();

        let input = NewTransaction::transfer(&wallet, &bank, "Move", money(1), today());
        let err = handle(&mut ledger, input, &LedgerConfig::default()).unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn rejects_blank_description_non_positive_amount_and_unknown_account() {
        let (mut ledger, wallet, _) = two_accounts();
        let config = LedgerConfig::default();

        let blank = NewTransaction::income(&wallet, "  ", money(5), today());
        let zero = NewTransaction::income(&wallet, "x", Money::zero(), today());
        let negative = NewTransaction::income(&wallet, "x", money(-5), today());
        let unknown = NewTransaction::income(&AccountId::from("nope"), "x", money(5), today());

        for input in [blank, zero, negative, unknown] {
            let err = handle(&mut ledger, input, &config).unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)));
        }
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.account(&wallet).unwrap().balance, money(100));
    }
}
