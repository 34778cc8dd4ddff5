//! Dimension scoring and tagging against whole detail populations.

use pretty_assertions::assert_eq;
use scholarlens_common::ScholarDetail;
use scholarlens_ranker::{
    build_profiles, compute_dimension_scores, compute_tags, Dimension, DimensionPopulation, ScholarTag,
};
use scholarlens_test_utils::DetailBuilder;

/// Eighteen modest profiles; callers append the scholars under test.
fn background() -> Vec<ScholarDetail> {
    (0..18)
        .map(|i| {
            DetailBuilder::new(format!("bg{i}"), format!("Background {i}"))
                .works(50 + i)
                .citations(1_000 + i * 100)
                .h_index(10 + i as u32)
                .two_year(1.0)
                .topics(&["Neural coding"])
                .build()
        })
        .collect()
}

fn tags_of(details: &[ScholarDetail], id: &str) -> Vec<ScholarTag> {
    let population = DimensionPopulation::build(details, 2025);
    let scholar = details.iter().find(|d| d.id == id).unwrap();
    let scores = compute_dimension_scores(scholar, &population);
    compute_tags(scholar, &scores, 2025)
}

#[test]
fn test_legend_requires_top_impact_and_citations() {
    let mut details = background();
    // Impact blend 0.5·120000 + 0.5·40000 = 80000
    details.push(DetailBuilder::new("X", "Xu").works(300).citations(120_000).h_index(40).build());
    // Impact blend 0.5·110000 + 0.5·150000 = 130000, the population maximum
    details.push(DetailBuilder::new("Z", "Zhao").works(400).citations(110_000).h_index(150).build());

    let population = DimensionPopulation::build(&details, 2025);
    let x = compute_dimension_scores(&details[18], &population);
    let z = compute_dimension_scores(&details[19], &population);
    assert_eq!(x[0].dimension, Dimension::Impact);
    assert_eq!(x[0].score, 90);
    assert_eq!(z[0].score, 95);

    assert!(!tags_of(&details, "X").contains(&ScholarTag::Legend));
    assert!(tags_of(&details, "Z").contains(&ScholarTag::Legend));
}

#[test]
fn test_legend_not_awarded_on_impact_alone() {
    let mut details = background();
    details.push(DetailBuilder::new("X", "Xu").works(300).citations(90_000).h_index(40).build());
    details.push(DetailBuilder::new("Y", "Yang").works(10).citations(1_000).h_index(9).build());

    let population = DimensionPopulation::build(&details, 2025);
    let scores = compute_dimension_scores(&details[18], &population);
    assert_eq!(scores[0].score, 95);
    assert!(!tags_of(&details, "X").contains(&ScholarTag::Legend));
}

#[test]
fn test_tags_are_deterministic() {
    let mut details = background();
    details.push(
        DetailBuilder::new("P", "Park")
            .works(500)
            .citations(40_000)
            .h_index(70)
            .two_year(6.0)
            .topics(&["Neural coding", "Plasticity", "Decision making", "Memory"])
            .top_works(&[9_000, 5_000, 4_000])
            .early_career(1990, 8.0)
            .build(),
    );
    let first = tags_of(&details, "P");
    for _ in 0..5 {
        assert_eq!(tags_of(&details, "P"), first);
    }
}

#[test]
fn test_build_profiles_covers_every_detail() {
    let mut details = background();
    details.push(DetailBuilder::new("E", "Empty").build());

    let profiles = build_profiles(&details, 2025);
    assert_eq!(profiles.len(), details.len());
    for profile in &profiles {
        assert_eq!(profile.dimensions.len(), 7);
        assert!(profile.dimensions.iter().all(|d| d.score <= 100));
    }
    let empty = profiles.iter().find(|p| p.id == "E").unwrap();
    assert_eq!(empty.dimensions[5].score, 0);
}
