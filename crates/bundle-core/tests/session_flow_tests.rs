use bundle_core::{
    group_cart_lines, BundleConfig, BundleError, BundleSession, CounterTokens, Progress,
    StockLevel,
};
use bundle_test_utils::{sample_catalog, ScriptedSource};

fn session() -> BundleSession {
    BundleSession::new(sample_catalog(), BundleConfig::new())
}

#[test]
fn manual_box_to_cart() {
    let mut session = session();
    for _ in 0..3 {
        assert!(session.increment("classic").unwrap());
    }
    for _ in 0..4 {
        assert!(session.increment("merken").unwrap());
    }
    assert!(!session.increment("smoky").unwrap());

    let status = session.status();
    assert!(status.is_complete());
    assert_eq!(status.action_label(), "Add to cart");

    let lines = session.checkout(&mut CounterTokens::new()).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].purchasing_option_id.as_str(), "classic-v1");
    assert_eq!(lines[1].quantity, 4);

    let grouping = group_cart_lines(&lines);
    assert_eq!(grouping.bundles.len(), 1);
    assert_eq!(grouping.bundles[0].label, "Box of 7");
    assert_eq!(grouping.bundles[0].total_quantity(), 7);
    assert!(grouping.regular.is_empty());
}

#[test]
fn two_checkouts_form_two_groups() {
    let mut session = session();
    session.surprise_me(&mut ScriptedSource::default());
    let mut tokens = CounterTokens::new();

    let mut lines = session.checkout(&mut tokens).unwrap();
    lines.extend(session.checkout(&mut tokens).unwrap());

    let grouping = group_cart_lines(&lines);
    assert_eq!(grouping.bundles.len(), 2);
    assert_eq!(grouping.bundles[0].token, "bundle-1");
    assert_eq!(grouping.bundles[1].token, "bundle-2");
}

#[test]
fn over_target_then_corrected() {
    let mut session = session();
    session.set_quantity("classic", 3).unwrap();
    session.set_quantity("teriyaki", 5).unwrap();

    let status = session.status();
    assert_eq!(status.progress, Progress::OverTarget { excess: 1 });
    assert_eq!(status.message(), "over by 1");
    assert!(status.progress_percent() > 100.0);
    assert!(matches!(
        session.checkout(&mut CounterTokens::new()),
        Err(BundleError::OverTarget { excess: 1 })
    ));

    assert!(session.decrement("teriyaki").unwrap());
    assert!(session.status().can_checkout());
}

#[test]
fn incomplete_box_blocks_checkout() {
    let mut session = session();
    assert!(matches!(
        session.checkout(&mut CounterTokens::new()),
        Err(BundleError::EmptySelection)
    ));

    session.set_quantity("pepper", 2).unwrap();
    let err = session.checkout(&mut CounterTokens::new()).unwrap_err();
    assert!(matches!(err, BundleError::Incomplete { missing: 5 }));
    assert!(err.is_checkout_block());
}

#[test]
fn surprise_replaces_existing_selection() {
    let mut session = session();
    session.set_quantity("classic", 6).unwrap();
    // identity shuffle, zero draws, every leftover unit to pool[4] (smoky)
    assert!(session.surprise_me(&mut ScriptedSource::new([4, 3, 2, 1, 0, 0, 0, 0, 0, 4, 4, 4, 4, 4, 4, 4])));
    assert_eq!(session.selection().len(), 1);
    assert_eq!(session.selection().quantity_of("smoky"), 7);
}

#[test]
fn custom_target_config() {
    let config = BundleConfig::new().with_target(3);
    let mut session = BundleSession::new(sample_catalog(), config);
    session.surprise_me(&mut ScriptedSource::default());
    assert_eq!(session.status().total, 3);

    let lines = session.checkout(&mut CounterTokens::new()).unwrap();
    assert!(lines.iter().all(|l| l.bundle_label() == Some("Box of 3")));
}

#[test]
fn stock_levels_from_catalog() {
    let session = session();
    let threshold = session.config().low_stock_threshold;
    let habanero = session.catalog().get("habanero").unwrap();
    assert_eq!(habanero.stock_level(threshold), StockLevel::Unavailable);
    let classic = session.catalog().get("classic").unwrap();
    assert_eq!(classic.stock_level(threshold), StockLevel::InStock);
}
