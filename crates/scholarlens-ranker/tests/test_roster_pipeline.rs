//! End-to-end: raw JSON rosters through to a leaderboard.

use pretty_assertions::assert_eq;
use scholarlens_common::{EarlyCareerRecord, JoinPolicy, Roster, ScholarLensConfig, ScholarRecord};
use scholarlens_ranker::career_provider::MockCareerProvider;
use scholarlens_ranker::{MetricKey, RankEntry, RankingEngine};
use scholarlens_test_utils::{sample_early_career, sample_scholars, to_json_array, DetailBuilder, EarlyCareerBuilder};

const SCHOLARS_JSON: &str = r#"[
    {"id": "https://openalex.org/A1", "name": "Ada", "works_count": 40, "cited_by_count": 8000,
     "h_index": 35, "i10_index": 30, "mean_citedness_2yr": 4.5, "country": "GB"},
    {"id": "https://openalex.org/A2", "name": "Ben", "works_count": 10, "cited_by_count": 900,
     "h_index": 12, "mean_citedness_2yr": 2.0},
    {"id": "https://openalex.org/A3", "name": "", "works_count": 10, "cited_by_count": 900, "h_index": 12},
    {"id": "https://openalex.org/A4", "works_count": "many"},
    {"id": "https://openalex.org/A1", "name": "Ada again", "works_count": 1, "cited_by_count": 1, "h_index": 1}
]"#;

const EARLY_JSON: &str = r#"[
    {"name": "Ada", "firstPubYear": 2005, "earlyCareerCitations": 900, "totalCitations": 8000, "earlyPct": 11.25},
    {"name": "Ben", "firstPubYear": 2012},
    {"name": "Ben", "firstPubYear": 1999}
]"#;

fn config() -> ScholarLensConfig {
    let mut config = ScholarLensConfig::default();
    config.scoring.current_year = Some(2025);
    config
}

#[test]
fn test_malformed_and_duplicate_records_are_skipped() {
    let scholars = Roster::<ScholarRecord>::from_json_str(SCHOLARS_JSON).unwrap();
    assert_eq!(scholars.len(), 2);
    assert_eq!(scholars.skipped(), 3);
}

#[test]
fn test_ambiguous_names_join_nothing_by_default() {
    let scholars = Roster::<ScholarRecord>::from_json_str(SCHOLARS_JSON).unwrap();
    let early = Roster::<EarlyCareerRecord>::from_json_str_allow_duplicates(EARLY_JSON).unwrap();
    let engine = RankingEngine::from_rosters(config(), &scholars, &early);

    let ben = &engine.scholars()[1];
    assert_eq!(ben.name(), "Ben");
    assert_eq!(ben.academic_age, None);
    assert_eq!(engine.rankings().entry(&ben.record.id, MetricKey::MIndex), RankEntry::NotRanked);

    let ada = &engine.scholars()[0];
    assert_eq!(ada.academic_age, Some(20));
}

#[test]
fn test_first_wins_policy() {
    let scholars = Roster::<ScholarRecord>::from_json_str(SCHOLARS_JSON).unwrap();
    let early = Roster::<EarlyCareerRecord>::from_json_str_allow_duplicates(EARLY_JSON).unwrap();
    let mut cfg = config();
    cfg.roster.join_policy = JoinPolicy::FirstWins;
    let engine = RankingEngine::from_rosters(cfg, &scholars, &early);

    assert_eq!(engine.scholars()[1].academic_age, Some(13));
}

#[test]
fn test_absurd_first_year_leaves_age_unknown() {
    let scholars = Roster::<ScholarRecord>::from_json_str(SCHOLARS_JSON).unwrap();
    let early = Roster::<EarlyCareerRecord>::from_json_str_allow_duplicates(
        r#"[{"name": "Ada", "firstPubYear": -2147483648}, {"name": "Ben", "firstPubYear": 2015}]"#,
    )
    .unwrap();
    assert_eq!(early.len(), 2);

    let engine = RankingEngine::from_rosters(config(), &scholars, &early);
    let ada = &engine.scholars()[0];
    assert_eq!(ada.academic_age, None);
    assert_eq!(engine.rankings().entry(&ada.record.id, MetricKey::MIndex), RankEntry::NotRanked);
    assert_eq!(engine.scholars()[1].academic_age, Some(10));
}

#[test]
fn test_load_from_configured_paths() {
    let dir = tempfile::tempdir().unwrap();
    let scholars_path = dir.path().join("scholars.json");
    let early_path = dir.path().join("earlyCareer.json");

    let mut early = sample_early_career();
    early.push(EarlyCareerBuilder::new("Dana Diaz").build());
    std::fs::write(&scholars_path, to_json_array(&sample_scholars())).unwrap();
    std::fs::write(&early_path, to_json_array(&early)).unwrap();

    let mut cfg = config();
    cfg.roster.scholars_path = scholars_path.to_string_lossy().into_owned();
    cfg.roster.early_career_path = early_path.to_string_lossy().into_owned();

    let engine = RankingEngine::load(cfg).unwrap();
    let board = engine.leaderboard("stature", 3).unwrap();
    let ids: Vec<&str> = board.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["B", "A", "C"]);
    // Dana Diaz joined, but without a first publication year
    assert_eq!(engine.scholars()[3].academic_age, None);
    assert_eq!(engine.scholars()[0].early_pct, Some(20.0));
}

#[test]
fn test_load_profiles_from_details_path() {
    let dir = tempfile::tempdir().unwrap();
    let details_path = dir.path().join("scholarDetails.json");
    let details = vec![
        DetailBuilder::new("A", "Alice Ames").works(20).citations(10_000).h_index(50).two_year(5.0).build(),
        DetailBuilder::new("B", "Bruno Berg").works(100).citations(50_000).h_index(80).two_year(15.0).build(),
        DetailBuilder::new("C", "Chen Cao").works(5).citations(500).h_index(10).two_year(1.0).build(),
    ];
    let mut raw: Vec<serde_json::Value> = serde_json::from_str(&to_json_array(&details)).unwrap();
    raw.push(serde_json::json!({"id": "", "name": "Nobody", "worksCount": 1, "citedByCount": 1, "hIndex": 1}));
    std::fs::write(&details_path, serde_json::to_string(&raw).unwrap()).unwrap();

    let mut cfg = config();
    cfg.roster.details_path = details_path.to_string_lossy().into_owned();
    let engine = RankingEngine::new(cfg, &sample_scholars(), &MockCareerProvider::new());

    let profiles = engine.load_profiles().unwrap();
    let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(profiles[1].dimensions.len(), 7);
    assert!(profiles[1].overall > profiles[2].overall);
}

#[test]
fn test_load_profiles_reports_missing_details() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config();
    cfg.roster.details_path = dir.path().join("absent.json").to_string_lossy().into_owned();
    let engine = RankingEngine::new(cfg, &sample_scholars(), &MockCareerProvider::new());
    assert!(engine.load_profiles().is_err());
}

#[test]
fn test_load_reports_missing_roster() {
    let mut cfg = config();
    cfg.roster.scholars_path = "/nonexistent/scholars.json".to_string();
    assert!(RankingEngine::load(cfg).is_err());
}
