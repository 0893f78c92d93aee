//! Loading CSV data and writing reports

use approx::assert_relative_eq;
use rm_io::{
    load_reader, write_report, CompositeMeasure, Error, LevelCodes, LoaderConfig,
};
use rm_study::{Capabilities, FactorSpec, MeasureSpec, ScaleSpec, StudyConfig, StudyRunner};

const FIXTURE: &str = "\
PID,ConditionSAT,ConditionTransparancy,Trust,Mental,Effort
1, Conservative ,T,5,10,12
1,Conservative,NT,4,8,
1,Risky,T,3,14,16
1,Risky,NT,2,15,17
2,Conservative,T,6,9,9
2,Conservative,NT,5,7,11
2,Risky,T,4,13,13
2,Risky,NT,NA,12,14
";

fn study() -> StudyConfig {
    let scale = ScaleSpec::new(1.0, 21.0, "test");
    StudyConfig {
        design: "2 × 2".to_string(),
        factors: vec![
            FactorSpec::new("SAT", "SAT", ["Conservative", "Risky"]),
            FactorSpec::new("Transparency", "Uncertainty Communication", ["Yes", "No"]),
        ],
        measures: vec![
            MeasureSpec::new("Trust", "Trust", scale.clone()),
            MeasureSpec::new("Workload", "Workload", scale),
        ],
        primary_factor: "SAT".to_string(),
        interaction_pairs: vec![("SAT".to_string(), "Transparency".to_string())],
        p_adjust: Default::default(),
    }
}

fn loader() -> LoaderConfig {
    LoaderConfig {
        subject_column: "PID".to_string(),
        renames: vec![
            ("ConditionSAT".to_string(), "SAT".to_string()),
            ("ConditionTransparancy".to_string(), "Transparency".to_string()),
        ],
        level_codes: vec![LevelCodes::new("Transparency", &[("T", "Yes"), ("NT", "No")])],
        composites: vec![CompositeMeasure {
            name: "Workload".to_string(),
            sources: vec!["Mental".to_string(), "Effort".to_string()],
        }],
    }
}

fn replace_line(csv: &str, line: usize, with: &str) -> String {
    csv.lines()
        .enumerate()
        .map(|(i, l)| if i + 1 == line { with } else { l })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_load_fixture() {
    let ds = load_reader(FIXTURE.as_bytes(), &study(), &loader()).unwrap();

    assert_eq!(ds.n_observations(), 8);
    assert_eq!(ds.n_subjects(), 2);
    assert_eq!(ds.subject_ids(), ["1", "2"]);

    // Codes mapped onto configured levels, padded labels trimmed
    let transparency = ds.factor_index("Transparency").unwrap();
    assert_eq!(&ds.levels_of_row(transparency)[..4], [0, 1, 0, 1]);
    assert_eq!(ds.levels_of_row(ds.factor_index("SAT").unwrap())[0], 0);

    let trust = ds.values("Trust").unwrap();
    assert_eq!(trust[0], Some(5.0));
    assert_eq!(trust[7], None);
}

#[test]
fn test_composite_needs_every_source() {
    let ds = load_reader(FIXTURE.as_bytes(), &study(), &loader()).unwrap();
    let workload = ds.values("Workload").unwrap();

    assert_relative_eq!(workload[0].unwrap(), 11.0);
    assert_eq!(workload[1], None);
    assert_relative_eq!(workload[7].unwrap(), 13.0);
    // Sources are kept as measures of their own
    assert!(ds.has_measure("Mental"));
}

#[test]
fn test_missing_column() {
    let csv = FIXTURE.replace("Trust", "Confidence");
    let err = load_reader(csv.as_bytes(), &study(), &loader()).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "Trust"));

    // Without the rename the raw header does not satisfy the factor
    let mut no_rename = loader();
    no_rename.renames.clear();
    let err = load_reader(FIXTURE.as_bytes(), &study(), &no_rename).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "SAT"));
}

#[test]
fn test_invalid_number_reports_line() {
    let csv = replace_line(FIXTURE, 4, "1,Risky,T,high,14,16");
    let err = load_reader(csv.as_bytes(), &study(), &loader()).unwrap_err();
    match err {
        Error::InvalidNumber {
            column,
            value,
            line,
        } => {
            assert_eq!(column, "Trust");
            assert_eq!(value, "high");
            assert_eq!(line, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unmapped_code() {
    let csv = replace_line(FIXTURE, 3, "1,Conservative,Maybe,4,8,9");
    let err = load_reader(csv.as_bytes(), &study(), &loader()).unwrap_err();
    assert!(matches!(
        err,
        Error::UnmappedCode { ref column, ref value, line: 3 }
            if column == "Transparency" && value == "Maybe"
    ));
}

#[test]
fn test_unknown_level_is_fatal() {
    let csv = replace_line(FIXTURE, 2, "1,Moderate,T,5,10,12");
    let err = load_reader(csv.as_bytes(), &study(), &loader()).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(rm_core::Error::UnmappedLevel { .. })
    ));
}

#[test]
fn test_empty_subject() {
    let csv = replace_line(FIXTURE, 6, ",Conservative,T,6,9,9");
    let err = load_reader(csv.as_bytes(), &study(), &loader()).unwrap_err();
    assert!(matches!(err, Error::EmptySubject(6)));
}

#[test]
fn test_ragged_row_is_csv_error() {
    let csv = replace_line(FIXTURE, 5, "1,Risky,NT,2,15");
    let err = load_reader(csv.as_bytes(), &study(), &loader()).unwrap_err();
    assert!(matches!(err, Error::Csv(_)));
}

#[test]
fn test_default_layout_derives_tlx_overall() {
    let mut config = StudyConfig::default();
    config.measures.retain(|m| m.variable == "TLX_Overall");

    let mut csv = String::from(
        "PID,ConditionSAT,ConditionTransparancy,ConditionUserDecision,\
         TLX_Mental,TLX_Physical,TLX_Temporal,TLX_Performance,TLX_Effort,TLX_Frustration\n",
    );
    for pid in 1..=2 {
        for sat in ["Conservative", "Moderate", "Risky"] {
            for t in ["T", "NT"] {
                for ud in ["UD", "NUD"] {
                    csv.push_str(&format!("{pid},{sat},{t},{ud},1,2,3,4,5,{}\n", 2 + pid));
                }
            }
        }
    }

    let ds = load_reader(csv.as_bytes(), &config, &LoaderConfig::default()).unwrap();
    assert_eq!(ds.n_observations(), 24);
    assert!(ds.design_check().is_fully_crossed());

    let overall = ds.values("TLX_Overall").unwrap();
    assert_relative_eq!(overall[0].unwrap(), 18.0 / 6.0);
    assert_relative_eq!(overall[23].unwrap(), 19.0 / 6.0);
}

#[test]
fn test_load_run_and_write() {
    let csv = replace_line(FIXTURE, 3, "1,Conservative,NT,4,8,10");
    let csv = replace_line(&csv, 9, "2,Risky,NT,3,12,14");
    let config = study();
    let ds = load_reader(csv.as_bytes(), &config, &loader()).unwrap();
    let report = StudyRunner::new(config, Capabilities::full()).run(&ds).unwrap();

    let mut out = Vec::new();
    write_report(&mut out, &report).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("{\n  \"study_info\": {\n    \"design\""));

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["study_info"]["n_participants"], 2);
    assert_eq!(json["study_info"]["n_observations"], 8);
    assert_eq!(json["analyses"]["Workload"]["variable"], "Workload");
    assert_eq!(
        json["analyses"]["Trust"]["descriptives_SAT"]["Risky"]["mean"],
        3.0
    );
}
