use newsproof_cli::{run, Command, LedgerConfig};
use newsproof_ledger::{GenesisConfig, LedgerEvent};
use newsproof_types::Identity;
use tempfile::TempDir;

fn id(s: &str) -> Identity {
    Identity::parse(s).unwrap()
}

fn config(dir: &TempDir) -> LedgerConfig {
    LedgerConfig {
        data_dir: dir.path().join("ledger"),
        map_size_mb: 16,
        ..Default::default()
    }
}

fn init(config: &LedgerConfig) {
    run(
        config,
        None,
        &Command::Init {
            owner: Some("0xAdmin".into()),
            moderators: vec!["0xMod".into()],
            oracles: vec!["0xOracle".into()],
        },
    )
    .unwrap();
}

fn submit_text(text: &str, score: i64, clamp: bool) -> Command {
    Command::Submit {
        hash: None,
        text: Some(text.into()),
        source: "https://example.org/story".into(),
        score,
        clamp,
    }
}

#[test]
fn init_then_submit_emits_event() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    init(&config);

    let output = run(&config, Some("0xUser1"), &submit_text("Breaking news", 80, false)).unwrap();
    assert_eq!(output.result["index"], 0);
    assert_eq!(output.events.len(), 1);
    assert!(matches!(
        &output.events[0],
        LedgerEvent::InformationSubmitted { index: 0, author, .. } if *author == id("0xuser1")
    ));

    let count = run(&config, None, &Command::Count).unwrap();
    assert_eq!(count.result["count"], 1);
    assert!(count.events.is_empty());
}

#[test]
fn commands_before_init_fail() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    assert!(run(&config, None, &Command::Count).is_err());
}

#[test]
fn init_twice_fails() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    init(&config);
    let again = run(
        &config,
        None,
        &Command::Init {
            owner: Some("0xOther".into()),
            moderators: vec![],
            oracles: vec![],
        },
    );
    assert!(again.is_err());
}

#[test]
fn init_uses_genesis_table_without_owner_flag() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.genesis = Some(GenesisConfig::new(id("0xadmin")).with_oracle(id("0xoracle")));
    let output = run(
        &config,
        None,
        &Command::Init {
            owner: None,
            moderators: vec![],
            oracles: vec![],
        },
    )
    .unwrap();
    assert_eq!(output.result["owner"], "0xadmin");

    let role = run(&config, None, &Command::Role { identity: Some("0xOracle".into()) }).unwrap();
    assert_eq!(role.result["label"], "Oracle");
}

#[test]
fn init_without_any_owner_fails() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let result = run(
        &config,
        None,
        &Command::Init {
            owner: None,
            moderators: vec![],
            oracles: vec![],
        },
    );
    assert!(result.is_err());
}

#[test]
fn submit_requires_acting_identity() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    init(&config);
    assert!(run(&config, None, &submit_text("story", 50, false)).is_err());
}

#[test]
fn clamp_bounds_out_of_range_score() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    init(&config);

    assert!(run(&config, Some("user"), &submit_text("story", 150, false)).is_err());
    run(&config, Some("user"), &submit_text("story", 150, true)).unwrap();

    let shown = run(&config, None, &Command::Show { index: 0 }).unwrap();
    assert_eq!(shown.result["reliability_score"], 100);
    assert_eq!(shown.result["index"], 0);
}

#[test]
fn moderation_and_scoring_flow() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    init(&config);
    run(&config, Some("user"), &submit_text("story", 60, false)).unwrap();

    assert!(run(&config, Some("user"), &Command::ModeratorValidate { index: 0 }).is_err());
    let validated = run(&config, Some("0xMOD"), &Command::ModeratorValidate { index: 0 }).unwrap();
    assert_eq!(validated.result["validation"]["validator"], "0xmod");
    assert!(matches!(
        validated.events.as_slice(),
        [LedgerEvent::InformationValidated { index: 0, .. }]
    ));

    let score = Command::Score {
        index: 0,
        score: 87,
        label: true,
        model_version: "v1".into(),
    };
    assert!(run(&config, Some("user"), &score).is_err());
    let scored = run(&config, Some("0xoracle"), &score).unwrap();
    assert_eq!(scored.result["scoring"]["score"], 87);
    assert_eq!(scored.result["scoring"]["model_version"], "v1");

    let summary = run(&config, None, &Command::Summary).unwrap();
    assert_eq!(summary.result["records"], 1);
    assert_eq!(summary.result["validated"], 1);
    assert_eq!(summary.result["scored"], 1);
}

#[test]
fn owner_manages_moderators() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    init(&config);

    let add = Command::SetModerator {
        identity: "0xNew".into(),
        enabled: true,
    };
    assert!(run(&config, Some("0xmod"), &add).is_err());
    let output = run(&config, Some("0xadmin"), &add).unwrap();
    assert_eq!(output.result["is_moderator"], true);
    assert!(matches!(
        output.events.as_slice(),
        [LedgerEvent::ModeratorUpdated { enabled: true, .. }]
    ));

    let role = run(&config, Some("0xnew"), &Command::Role { identity: None }).unwrap();
    assert_eq!(role.result["label"], "Moderator");
}

#[test]
fn list_newest_first_reverses_order() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    init(&config);
    for text in ["first", "second", "third"] {
        run(&config, Some("user"), &submit_text(text, 50, false)).unwrap();
    }

    let oldest = run(&config, None, &Command::List { newest_first: false }).unwrap();
    let newest = run(&config, None, &Command::List { newest_first: true }).unwrap();
    let indices = |v: &serde_json::Value| -> Vec<u64> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|e| e["index"].as_u64().unwrap())
            .collect()
    };
    assert_eq!(indices(&oldest.result), vec![0, 1, 2]);
    assert_eq!(indices(&newest.result), vec![2, 1, 0]);
}

#[test]
fn show_past_end_fails() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    init(&config);
    assert!(run(&config, None, &Command::Show { index: 0 }).is_err());
}
