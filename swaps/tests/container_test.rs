
use std::sync::Arc;
use std::time::Duration;

use corelib::{BtcNetwork, ClarityValue};
use mock_node::*;
use swaps::{InvalidReason, SwapContainer, SwapParams, SwapView};

fn stx_record(ustx: u128) -> corelib::SwapRecord {
    record([
        ("when", ClarityValue::UInt(10)),
        ("done", ClarityValue::UInt(0)),
        ("sats", ClarityValue::UInt(100_000_000)),
        ("ustx", ClarityValue::UInt(ustx)),
        ("btc-receiver", p2pkh_zero()),
        ("stx-receiver", ClarityValue::OptionalNone),
        ("stx-sender", principal(SELLER)),
    ])
}

#[tokio::test]
async fn mount_records_block_height() {
    let node = Arc::new(MockNode::new());
    let container = SwapContainer::new(node, None, BtcNetwork::Mainnet);

    container.mount().await.unwrap();

    let snap = container.snapshot().await;
    assert_eq!(snap.block_height, Some(150_000));
    assert_eq!(snap.height_error, None);
}

#[tokio::test]
async fn height_failure_is_recorded_not_raised() {
    let node = Arc::new(MockNode {
        height: None,
        ..MockNode::new()
    });
    let container = SwapContainer::new(node, None, BtcNetwork::Mainnet);

    container.mount().await.unwrap();

    let snap = container.snapshot().await;
    assert_eq!(snap.block_height, None);
    assert!(snap.height_error.unwrap().contains("node unreachable"));
}

#[tokio::test]
async fn existing_swap_goes_loading_then_ready() {
    let node = Arc::new(MockNode::new());
    node.insert("stx", 1, stx_record(5_000_000)).await;
    let container = SwapContainer::new(node, None, BtcNetwork::Mainnet);

    let task = container
        .set_params(SwapParams::existing("stx", 1))
        .await
        .expect("load task");

    // The spawned task cannot run before we yield on this runtime.
    assert_eq!(container.snapshot().await.view, SwapView::Loading);

    task.await.unwrap();

    let snap = container.snapshot().await;
    assert_eq!(snap.view, SwapView::Ready);
    assert_eq!(snap.form.amount, Some(5.0));
    assert_eq!(snap.create_tab_label, "Swap Details");
    assert!(snap.show_submit);
}

#[tokio::test]
async fn new_swap_needs_no_load() {
    let node = Arc::new(MockNode::new());
    let container = SwapContainer::new(node.clone(), None, BtcNetwork::Mainnet);

    let task = container
        .set_params(SwapParams {
            swap_type: Some("nft".into()),
            id: None,
            asset_trait: Some("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7.punks::punk".into()),
            nft_id: Some(4),
        })
        .await;

    assert!(task.is_none());
    assert_eq!(node.entry_calls(), 0);

    let snap = container.snapshot().await;
    assert_eq!(snap.view, SwapView::Idle);
    assert_eq!(snap.create_tab_label, "Create Swap");
    assert_eq!(snap.form.nft_id, Some(4));
}

#[tokio::test]
async fn missing_swap_is_invalid() {
    let node = Arc::new(MockNode::new());
    let container = SwapContainer::new(node, None, BtcNetwork::Mainnet);

    container
        .set_params(SwapParams::existing("ft", 99))
        .await
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        container.snapshot().await.view,
        SwapView::Invalid {
            reason: InvalidReason::NotFound
        }
    );
}

#[tokio::test]
async fn unsupported_type_is_invalid() {
    let node = Arc::new(MockNode::new());
    let container = SwapContainer::new(node, None, BtcNetwork::Mainnet);

    container
        .set_params(SwapParams::existing("banana-nft", 1))
        .await
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        container.snapshot().await.view,
        SwapView::Invalid {
            reason: InvalidReason::UnsupportedType
        }
    );
}

#[tokio::test(start_paused = true)]
async fn late_result_for_old_params_is_discarded() {
    let node = Arc::new(MockNode::new());
    node.insert("stx", 1, stx_record(1_000_000)).await;
    node.insert("stx", 2, stx_record(2_000_000)).await;
    node.delay(1, Duration::from_secs(5)).await;
    node.delay(2, Duration::from_secs(1)).await;

    let container = SwapContainer::new(node, None, BtcNetwork::Mainnet);

    let slow = container
        .set_params(SwapParams::existing("stx", 1))
        .await
        .unwrap();
    let fast = container
        .set_params(SwapParams::existing("stx", 2))
        .await
        .unwrap();

    fast.await.unwrap();
    assert_eq!(container.snapshot().await.form.amount, Some(2.0));

    // Swap 1 lands after swap 2 and must not overwrite it.
    slow.await.unwrap();
    let snap = container.snapshot().await;
    assert_eq!(snap.view, SwapView::Ready);
    assert_eq!(snap.form.amount, Some(2.0));
}

#[tokio::test]
async fn atomic_swap_defaults_recipient_to_owner() {
    let node = Arc::new(MockNode::new());
    let container = SwapContainer::new(node, Some(BUYER.to_string()), BtcNetwork::Mainnet);

    container
        .set_params(SwapParams {
            swap_type: Some("stx-ft".into()),
            ..SwapParams::default()
        })
        .await;
    let snap = container.snapshot().await;
    assert_eq!(snap.form.asset_recipient.as_deref(), Some(BUYER));
    assert_eq!(snap.fee_options, vec!["stx", "stx-proportional", "banana", "usda", "xbtc"]);

    container
        .set_params(SwapParams {
            swap_type: Some("nft".into()),
            ..SwapParams::default()
        })
        .await;
    assert_eq!(container.snapshot().await.form.asset_recipient, None);
}

#[tokio::test]
async fn same_key_with_new_asset_params_keeps_loaded_swap() {
    let node = Arc::new(MockNode::new());
    node.insert("stx", 1, stx_record(5_000_000)).await;
    let container = SwapContainer::new(node.clone(), None, BtcNetwork::Mainnet);

    container
        .set_params(SwapParams::existing("stx", 1))
        .await
        .unwrap()
        .await
        .unwrap();
    assert_eq!(container.snapshot().await.form.amount, Some(5.0));

    let task = container
        .set_params(SwapParams {
            asset_trait: Some("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7.token-a::tok-a".into()),
            nft_id: Some(3),
            ..SwapParams::existing("stx", 1)
        })
        .await;

    assert!(task.is_none());
    let snap = container.snapshot().await;
    assert_eq!(snap.view, SwapView::Ready);
    assert_eq!(snap.form.amount, Some(5.0));
    assert_eq!(node.entry_calls(), 1);

    // A different id is a key change and loads again.
    node.insert("stx", 2, stx_record(7_000_000)).await;
    container
        .set_params(SwapParams::existing("stx", 2))
        .await
        .unwrap()
        .await
        .unwrap();
    assert_eq!(container.snapshot().await.form.amount, Some(7.0));
    assert_eq!(node.entry_calls(), 2);
}
