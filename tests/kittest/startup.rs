use crate::harness::{FundHarness, TestIndexer};
use egui_kittest::kittest::Queryable;

/// Start the app and check that the page is composed and both queries land.
#[test]
fn test_app_startup() {
    let mut harness = FundHarness::new(TestIndexer::with_collection());

    harness.kittest.get_by_label("Collectooorr Mek");
    harness.kittest.get_by_label("ropsten");
    harness.kittest.get_by_label("Connect");
    harness.kittest.get_by_label("Connect wallet to donate");

    harness.wait_for_label("1.5 ETH");
    harness.wait_for_label("Fidenza #250");
    harness.kittest.get_by_label("Total Deposits");
    harness.kittest.get_by_label("Pieces Collected");
    harness.kittest.get_by_label("2");
}

/// NFTs from other collections are filtered out, and broken metadata keeps the card.
#[test]
fn test_collection_grid_filters_and_tolerates_bad_metadata() {
    let mut harness = FundHarness::new(TestIndexer::with_collection());
    harness.wait_for_label("Fidenza #250");

    assert!(harness.kittest.query_by_label("Hidden").is_none());
    harness.kittest.get_by_label("Art Blocks #7");
    harness.kittest.get_by_label("metadata unavailable");
}

#[test]
fn test_indexer_failure_is_shown_inline() {
    let mut harness = FundHarness::new(TestIndexer::failing());

    harness.step_until("indexer errors", |h| {
        h.query_all_by_label("Indexer returned 500: boom").count() == 2
    });
    harness.kittest.get_by_label("--");
    harness.kittest.get_by_label("Refresh");
}
