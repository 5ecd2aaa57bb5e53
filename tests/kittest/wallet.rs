use crate::harness::{FundHarness, TestIndexer};
use egui_kittest::kittest::Queryable;

/// Connecting swaps the button for Disconnect and shows the account; disconnecting
/// goes back.
#[test]
fn test_connect_and_disconnect() {
    let mut harness = FundHarness::new(TestIndexer::with_collection());

    harness.click("Connect");
    harness.wait_for_label("Disconnect");
    harness.kittest.get_by_label("0x1111…1111");
    assert!(
        harness
            .kittest
            .query_by_label("Connect wallet to donate")
            .is_none()
    );

    harness.click("Disconnect");
    harness.wait_for_label("Connect");
    harness.kittest.get_by_label("Connect wallet to donate");
}
