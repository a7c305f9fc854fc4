use crate::components::features_section::FEATURES;
use crate::components::footer::FOOTER_TEXT;
use crate::components::problem_section::PROBLEMS;

#[test]
fn problem_section_lists_three_problems() {
    let titles: Vec<&str> = PROBLEMS.iter().map(|(_, title, _)| *title).collect();
    assert_eq!(titles, ["Empty Courts", "Fragmented Info", "Lost Connections"]);
}

#[test]
fn features_section_covers_each_audience_and_reputation() {
    let titles: Vec<&str> = FEATURES.iter().map(|(title, _)| *title).collect();
    assert_eq!(titles, ["For Players", "For Teams & Clubs", "For Coaches", "Reputation System"]);
    assert!(FEATURES.iter().all(|(_, body)| !body.is_empty()));
}

#[test]
fn footer_carries_brand_line() {
    assert!(FOOTER_TEXT.contains("Trego"));
}
