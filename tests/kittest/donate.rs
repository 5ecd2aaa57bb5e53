use crate::harness::{FundHarness, TX_HASH, TestIndexer};
use egui::accesskit::Role;
use egui_kittest::kittest::Queryable;

/// When I connect, enter 0.5 and press Donate,
/// Then exactly one transaction of 0.5 ETH goes to the fund and its hash is shown.
#[test]
fn test_donate_half_eth() {
    let mut harness = FundHarness::new(TestIndexer::with_collection());
    harness.click("Connect");
    harness.wait_for_label("Disconnect");

    harness.kittest.get_by_role(Role::TextInput).focus();
    harness.step();
    harness.kittest.get_by_role(Role::TextInput).type_text("0.5");
    harness.step();

    harness.click("Donate");
    harness.wait_for_label(&format!("Transaction {}", TX_HASH));
    harness.kittest.get_by_label("Thank you for your donation!");

    let sent = harness.wallet.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].value, 500_000_000_000_000_000);
    assert_eq!(sent[0].chain_id, 3);
    assert_eq!(
        sent[0].to.to_string(),
        "0x2cab92c1e9d2a701ca0411b0ff35a0907ca31f7f"
    );
}
