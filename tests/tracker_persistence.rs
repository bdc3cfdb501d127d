use std::str::FromStr;

use chrono::NaiveDate;
use pocket_ledger::{
    Tracker,
    common::{
        config::{LedgerConfig, PeriodChoice, Settings},
        error::{AppError, LedgerError},
        event::{LedgerCommand, NewTransaction},
        money::Money,
    },
    io::storage::{self, DirStore, KeyValueStore},
    query::{self, SortKey, TransactionFilter},
    worker::processor::Applied,
};

fn config() -> LedgerConfig {
    LedgerConfig {
        hash_cost: 4,
        ..LedgerConfig::default()
    }
}

fn money(v: &str) -> Money {
    Money::from_str(v).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn open(dir: &std::path::Path) -> Tracker<DirStore> {
    Tracker::open(DirStore::open(dir).unwrap(), config())
        .unwrap()
        .with_fixed_date(today())
}

#[test]
fn ledger_and_session_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut t = open(dir.path());
        t.register("ana", "Secret#12").unwrap();
        let out = t
            .execute(LedgerCommand::CreateAccount {
                name: "Wallet".into(),
                initial_balance: money("100"),
            })
            .unwrap();
        let Applied::AccountCreated(wallet) = out.value else {
            panic!("unexpected outcome");
        };
        t.execute(LedgerCommand::AddTransaction(NewTransaction::expense(
            &wallet.id,
            "Coffee",
            money("30"),
            today(),
            "food",
        )))
        .unwrap();
        t.save_settings(Settings {
            sort: SortKey::AmountAsc,
            period: PeriodChoice::All,
            ..Settings::default()
        })
        .unwrap();
    }

    let t = open(dir.path());
    assert_eq!(t.active_user(), Some("ana"));
    let ledger = t.ledger().unwrap();
    assert_eq!(ledger.accounts()[0].balance, money("70"));

    let filter = TransactionFilter {
        period: t.settings().period.resolve(t.today()),
        ..TransactionFilter::default()
    };
    let hits = query::filter_transactions(ledger, &filter);
    let sorted = query::sort_transactions(&hits, t.settings().sort);
    let amounts: Vec<Money> = sorted.iter().map(|tx| tx.amount).collect();
    assert_eq!(amounts, vec![money("30"), money("100")]);
}

#[test]
fn store_layout_uses_the_documented_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut t = open(dir.path());
    t.register("ana", "Secret#12").unwrap();

    let store = t.into_store();
    let raw = store.get(storage::USERS_DB).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["username"], "ana");
    assert!(!raw.contains("Secret#12"));
    assert_eq!(store.get(storage::CURRENT_USER).unwrap().as_deref(), Some("ana"));
    assert!(dir.path().join("users_db.json").exists());
}

#[test]
fn legacy_users_db_with_data_field_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirStore::open(dir.path()).unwrap();
    store
        .set(
            storage::USERS_DB,
            r#"[{"username":"ana","password":"53656372657423313232","data":{
                "accounts":[{"id":"a1","name":"Wallet","balance":50}],
                "transactions":[{"id":"t1","type":"income","description":"initial deposit",
                    "amount":50,"date":"2024-01-02","accountId":"a1","category":"outros"}]
            }}]"#,
        )
        .unwrap();

    let mut t = Tracker::open(store, config()).unwrap();
    assert!(matches!(
        t.login("ana", "Secret#12"),
        Err(AppError::Ledger(LedgerError::Auth))
    ));
    t.login("ana", "Secret#122").unwrap();

    let ledger = t.ledger().unwrap();
    assert_eq!(ledger.accounts()[0].balance, money("50"));
    assert_eq!(ledger.transactions().len(), 1);

    // The hex credential is replaced by a bcrypt hash on first login.
    let store = t.into_store();
    let raw = store.get(storage::USERS_DB).unwrap().unwrap();
    assert!(!raw.contains("53656372657423313232"));
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(json[0]["credential"].as_str().unwrap().starts_with("$2"));

    let mut t = Tracker::open(store, config()).unwrap();
    t.logout().unwrap();
    t.login("ana", "Secret#122").unwrap();
}

#[test]
fn corrupt_users_db_refuses_to_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("users_db.json"), "{truncated").unwrap();

    let result = Tracker::open(DirStore::open(dir.path()).unwrap(), config());

    assert!(matches!(result, Err(AppError::Store(_))));
    // The damaged file is left for inspection.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("users_db.json")).unwrap(),
        "{truncated"
    );
}

#[test]
fn logged_out_tracker_rejects_ledger_access() {
    let dir = tempfile::tempdir().unwrap();
    let mut t = open(dir.path());
    t.register("ana", "Secret#12").unwrap();
    t.logout().unwrap();

    let t = open(dir.path());
    assert_eq!(t.active_user(), None);
    assert_eq!(t.ledger(), Err(LedgerError::NotLoggedIn));
}
