//! Integration tests for repeated-measures ANOVA

mod common;

use approx::assert_abs_diff_eq;
use common::{dataset_from_rows, sat_transparency, two_factor_rows};
use proptest::prelude::*;
use rm_anova::{fit_one_way, one_way, two_way};
use rm_core::{DatasetBuilder, Factor, Outcome, UnavailableReason};

#[test]
fn test_two_way_reference_values() {
    let ds = dataset_from_rows(sat_transparency(), &two_factor_rows());
    let anova = two_way(&ds, "y", "SAT", "Transparency").into_option().unwrap();

    let a = anova.main_a().computed().unwrap();
    assert_eq!(a.factor, "SAT");
    assert_eq!((a.df1, a.df2), (2, 6));
    assert_abs_diff_eq!(a.f, 51.162162, epsilon = 1e-5);
    assert_abs_diff_eq!(a.p, 0.000170, epsilon = 1e-5);
    assert_abs_diff_eq!(a.epsilon, 0.626258, epsilon = 1e-5);
    assert_abs_diff_eq!(a.p_corr, 0.002295, epsilon = 1e-5);
    assert_abs_diff_eq!(a.eta_sq, 0.752983, epsilon = 1e-5);
    let mauchly = a.sphericity.as_ref().unwrap();
    assert_abs_diff_eq!(mauchly.w, 0.403214, epsilon = 1e-5);
    assert_abs_diff_eq!(mauchly.chi2, 1.816576, epsilon = 1e-5);

    let b = anova.main_b().computed().unwrap();
    assert_eq!((b.df1, b.df2), (1, 3));
    assert_abs_diff_eq!(b.f, 115.105263, epsilon = 1e-4);
    assert_abs_diff_eq!(b.p, 0.001731, epsilon = 1e-5);
    assert_eq!(b.p, b.p_corr);
    assert!(b.sphericity.is_none());
    assert_abs_diff_eq!(b.eta_sq, 0.637795, epsilon = 1e-5);

    let ab = anova.interaction().computed().unwrap();
    assert_eq!(ab.factor, "SAT * Transparency");
    assert_eq!((ab.df1, ab.df2), (2, 6));
    assert_abs_diff_eq!(ab.f, 1.879121, epsilon = 1e-5);
    assert_abs_diff_eq!(ab.p, 0.232455, epsilon = 1e-5);
    assert_abs_diff_eq!(ab.p_corr, 0.257495, epsilon = 1e-5);
    assert_abs_diff_eq!(ab.eta_sq, 0.215909, epsilon = 1e-5);
    assert!(!ab.significant);
}

#[test]
fn test_two_way_serializes_in_effect_order() {
    let ds = dataset_from_rows(sat_transparency(), &two_factor_rows());
    let anova = two_way(&ds, "y", "SAT", "Transparency");
    let text = serde_json::to_string(&anova).unwrap();
    let positions: Vec<usize> = ["\"SAT\":", "\"Transparency\":", "\"SAT * Transparency\":"]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let json = serde_json::to_value(&anova).unwrap();
    assert_eq!(json["SAT"]["F"], 51.162);
    assert_eq!(json["SAT"]["p"], 0.0002);
    assert_eq!(json["Transparency"]["df1"], 1);
}

#[test]
fn test_one_way_averages_other_factors() {
    let rows = two_factor_rows();
    let ds = dataset_from_rows(sat_transparency(), &rows);
    let averaged: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| row.chunks(2).map(|pair| (pair[0] + pair[1]) / 2.0).collect())
        .collect();

    let from_dataset = one_way(&ds, "y", "SAT").into_option().unwrap();
    let direct = fit_one_way(&averaged, "SAT").unwrap();
    assert_abs_diff_eq!(from_dataset.f, direct.f, epsilon = 1e-10);
    assert_abs_diff_eq!(from_dataset.p, direct.p, epsilon = 1e-12);
    assert_eq!(from_dataset.factor, "SAT");
}

#[test]
fn test_one_way_main_effect_matches_two_way_f() {
    // In a balanced design the two-way main effect and the one-way test on
    // averaged data share sums of squares and error terms
    let ds = dataset_from_rows(sat_transparency(), &two_factor_rows());
    let one = one_way(&ds, "y", "SAT").into_option().unwrap();
    let two = two_way(&ds, "y", "SAT", "Transparency").into_option().unwrap();
    let main_a = two.main_a().computed().unwrap();
    assert_abs_diff_eq!(one.f, main_a.f, epsilon = 1e-9);
    assert_abs_diff_eq!(one.epsilon, main_a.epsilon, epsilon = 1e-9);
}

#[test]
fn test_two_level_factor_has_identical_corrected_p() {
    let ds = dataset_from_rows(sat_transparency(), &two_factor_rows());
    let effect = one_way(&ds, "y", "Transparency").into_option().unwrap();
    assert_eq!(effect.df1, 1);
    assert_eq!(effect.epsilon, 1.0);
    assert_eq!(effect.p, effect.p_corr);
}

#[test]
fn test_degenerate_error_term_keeps_other_effects() {
    // Every subject's Yes − No difference averages to exactly −2, so the
    // Transparency × subject term vanishes while the others vary
    let rows = vec![
        vec![1.0, 4.0, 2.0, 4.0, 5.0, 6.0],
        vec![2.0, 3.0, 4.0, 7.0, 5.0, 7.0],
        vec![3.0, 6.0, 3.0, 4.0, 8.0, 10.0],
    ];
    let ds = dataset_from_rows(sat_transparency(), &rows);
    let anova = two_way(&ds, "y", "SAT", "Transparency").into_option().unwrap();

    assert!(matches!(
        anova.main_b().reason(),
        Some(UnavailableReason::DegenerateVariance(_))
    ));
    let sat = anova.main_a().computed().unwrap();
    assert_eq!((sat.df1, sat.df2), (2, 4));
    assert_abs_diff_eq!(sat.f, 6.045455, epsilon = 1e-5);
    let interaction = anova.interaction().computed().unwrap();
    assert_eq!(interaction.factor, "SAT * Transparency");
    assert_abs_diff_eq!(interaction.f, 0.25, epsilon = 1e-9);

    let json = serde_json::to_value(&anova).unwrap();
    assert!(json["Transparency"].is_null());
    assert_eq!(json["SAT * Transparency"]["df1"], 2);
}

#[test]
fn test_constant_data_is_unavailable() {
    let rows = vec![vec![3.0; 6], vec![3.0; 6], vec![3.0; 6]];
    let ds = dataset_from_rows(sat_transparency(), &rows);
    assert!(matches!(
        two_way(&ds, "y", "SAT", "Transparency"),
        Outcome::Unavailable(UnavailableReason::DegenerateVariance(_))
    ));
}

#[test]
fn test_single_subject_is_unavailable() {
    let ds = dataset_from_rows(sat_transparency(), &two_factor_rows()[..1]);
    assert_eq!(
        one_way(&ds, "y", "SAT"),
        Outcome::Unavailable(UnavailableReason::InsufficientSubjects {
            required: 2,
            actual: 1
        })
    );
    assert!(!two_way(&ds, "y", "SAT", "Transparency").is_computed());
}

#[test]
fn test_missing_cell_is_unavailable() {
    let factors = vec![Factor::new("Level", ["A", "B", "C"]).unwrap()];
    let mut builder = DatasetBuilder::new(factors, ["y"]).unwrap();
    for (s, level, v) in [
        ("1", "A", 1.0),
        ("1", "B", 2.0),
        ("1", "C", 4.0),
        ("2", "A", 2.0),
        ("2", "B", 2.5),
    ] {
        builder.push(s, &[level], &[Some(v)]).unwrap();
    }
    let ds = builder.build().unwrap();

    match one_way(&ds, "y", "Level") {
        Outcome::Unavailable(UnavailableReason::MissingCells { subject, cell }) => {
            assert_eq!(subject, "2");
            assert_eq!(cell, "C");
        }
        other => panic!("expected missing cells, got {other:?}"),
    }
}

#[test]
fn test_unavailable_serializes_as_null() {
    let ds = dataset_from_rows(sat_transparency(), &two_factor_rows()[..1]);
    let json = serde_json::to_string(&one_way(&ds, "y", "SAT")).unwrap();
    assert_eq!(json, "null");
}

proptest! {
    #[test]
    fn prop_effect_bounds(
        values in proptest::collection::vec(0.0f64..10.0, 30),
    ) {
        let rows: Vec<Vec<f64>> = values.chunks(6).map(<[f64]>::to_vec).collect();
        let ds = dataset_from_rows(sat_transparency(), &rows);
        if let Outcome::Computed(anova) = two_way(&ds, "y", "SAT", "Transparency") {
            for effect in anova.iter().filter_map(|(_, e)| e.computed()) {
                prop_assert!((0.0..=1.0).contains(&effect.eta_sq));
                prop_assert!((0.0..=1.0).contains(&effect.p));
                prop_assert!((0.0..=1.0).contains(&effect.p_corr));
                prop_assert!(effect.epsilon >= 1.0 / effect.df1 as f64 - 1e-12);
                prop_assert!(effect.epsilon <= 1.0);
                prop_assert_eq!(effect.significant, effect.p < 0.05);
                if effect.df1 == 1 {
                    prop_assert_eq!(effect.p, effect.p_corr);
                }
            }
        }
    }
}
