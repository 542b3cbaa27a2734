use insights_types::VariantStats;
use insights_variants::{ComparatorConfig, VariantComparator};

fn campaign() -> Vec<VariantStats> {
    serde_json::from_str(
        r#"[
            {"id": "ctl", "name": "Handwritten letter", "isControl": true,
             "piecesMailed": 5200, "piecesDelivered": 5000, "calls": 100,
             "contracts": 4, "grossProfit": 88000.0, "allocationPercent": 50.0},
            {"id": "pc", "name": "Oversized postcard",
             "piecesMailed": 5200, "piecesDelivered": 5000, "calls": 150,
             "contracts": 5, "grossProfit": 97500.0, "allocationPercent": 25.0},
            {"id": "yl", "name": "Yellow letter",
             "piecesMailed": 5200, "piecesDelivered": 4900, "calls": 104,
             "contracts": 6, "grossProfit": 140000.0, "allocationPercent": 25.0}
        ]"#,
    )
    .unwrap()
}

#[test]
fn compares_a_realistic_campaign() {
    let result = VariantComparator::default().compare(&campaign()).unwrap();

    assert_eq!(result.control.id.as_str(), "ctl");
    assert_eq!(result.variants.len(), 2);

    let postcard = &result.variants[0];
    assert!((postcard.response_rate - 0.03).abs() < 1e-12);
    assert!((postcard.lift_vs_control - 0.5).abs() < 1e-9);
    assert!(postcard.is_significant);

    let yellow = &result.variants[1];
    assert!(!yellow.is_significant, "p = {}", yellow.p_value);

    // The yellow letter is more profitable but not significant on response.
    let winner = result.recommended_winner.as_ref().unwrap();
    assert_eq!(winner.id.as_str(), "pc");
}

#[test]
fn output_is_deterministic() {
    let comparator = VariantComparator::default();
    let first = serde_json::to_string(&comparator.compare(&campaign()).unwrap()).unwrap();
    let second = serde_json::to_string(&comparator.compare(&campaign()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn absent_winner_is_omitted_from_json() {
    let variants = vec![
        VariantStats::new("a", "A").control().mailed(1000, 1000).outcomes(20, 1, 0.0),
        VariantStats::new("b", "B").mailed(1000, 1000).outcomes(21, 1, 0.0),
    ];
    let result = VariantComparator::default().compare(&variants).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert!(json.get("recommendedWinner").is_none());
    assert!(json["variants"][0].get("liftVsControl").is_some());
    assert!(json["control"].get("confidenceInterval").is_some());
    assert_eq!(json["control"]["selection"], "flagged");
}

#[test]
fn stricter_alpha_can_remove_the_winner() {
    let strict = VariantComparator::new(ComparatorConfig {
        alpha: 0.0001,
        ..Default::default()
    })
    .unwrap();
    let result = strict.compare(&campaign()).unwrap();
    assert!(result.recommended_winner.is_none());
}
