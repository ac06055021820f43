//! 交易历史列表：原始 JSON → 分类结果

mod common;

use common::*;
use rwallet_core::{
    domain::{
        find_latest_block_height, ChainFamily, LatestBlockHeight, NetworkSelector, Transaction,
        TransactionState as State,
    },
    service::TransactionClassifier,
};

#[test]
fn test_history_from_json() {
    let raw = format!(
        r#"[
            {{"hash": "0x01", "from": "{wallet}", "to": "{other}", "value": "0xde0b6b3a7640000",
              "blockHeight": -1, "createdAt": "2019-03-05T10:00:00Z"}},
            {{"hash": "0x02", "from": "{other}", "to": "{wallet}", "value": "0x6f05b59d3b20000",
              "blockHeight": 500000, "createdAt": "2019-02-01T10:00:00Z",
              "confirmedAt": "2019-02-02T10:00:00Z"}}
        ]"#,
        wallet = RSK_WALLET,
        other = RSK_COUNTERPARTY
    );
    let txs: Vec<Transaction> = serde_json::from_str(&raw).unwrap();
    let list = TransactionClassifier::classify_all(&engine().converter, Some(&txs), &rsk_wallet("RBTC"));

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].state, State::Sending);
    assert_eq!(list[0].amount, "1 RBTC");
    assert_eq!(list[0].datetime, "Mar 5. 2019");

    assert_eq!(list[1].state, State::Received);
    assert_eq!(list[1].amount, "0.5 RBTC");
    assert_eq!(list[1].datetime, "Feb 2. 2019");
    assert_eq!(list[1].display_timestamp, txs[1].confirmed_at);
}

#[test]
fn test_malformed_value_is_rejected_at_boundary() {
    let raw = r#"{"from": "a", "to": "b", "value": "0xnothex", "blockHeight": 1,
                 "createdAt": "2019-03-05T10:00:00Z"}"#;
    assert!(serde_json::from_str::<Transaction>(raw).is_err());
}

#[test]
fn test_utxo_history() {
    let txs = vec![
        transaction(BTC_TESTNET_WALLET, "someone", "0x5f5e100", 1_500_000),
        transaction("someone", BTC_TESTNET_WALLET, "0x2faf080", -1),
    ];
    let list = TransactionClassifier::classify_all(&engine().converter, Some(&txs), &btc_wallet());

    assert_eq!(list[0].state, State::Sent);
    assert_eq!(list[0].amount, "1 BTC");
    assert_eq!(list[1].state, State::Receiving);
    assert_eq!(list[1].amount, "0.5 BTC");
    assert!(list.iter().any(|c| c.state.is_pending()));
}

#[test]
fn test_mis_tagged_wallet_uses_registered_exponent() {
    let mut wallet = btc_wallet();
    wallet.chain_family = ChainFamily::Account;
    let txs = vec![transaction(BTC_TESTNET_WALLET, "someone", "0x5f5e100", 10)];
    let list = TransactionClassifier::classify_all(&engine().converter, Some(&txs), &wallet);
    assert_eq!(list[0].amount, "1 BTC");
}

#[test]
fn test_classification_is_order_independent() {
    let converter = engine().converter;
    let wallet = rsk_wallet("RIF");
    let mut txs = vec![
        transaction(RSK_WALLET, RSK_COUNTERPARTY, "0x1", 10),
        transaction(RSK_COUNTERPARTY, RSK_WALLET, "0x2", -1),
        transaction(RSK_WALLET, RSK_COUNTERPARTY, "0x3", -1),
    ];
    let forward = TransactionClassifier::classify_all(&converter, Some(&txs), &wallet);
    txs.reverse();
    let mut backward = TransactionClassifier::classify_all(&converter, Some(&txs), &wallet);
    backward.reverse();

    assert_eq!(forward, backward);
    assert!(TransactionClassifier::classify_all(&converter, None, &wallet).is_empty());
}

#[test]
fn test_latest_block_height_lookup() {
    let heights: Vec<LatestBlockHeight> = serde_json::from_str(
        r#"[
            {"chain": "Bitcoin", "type": "Testnet", "blockHeight": 1574000},
            {"chain": "Rootstock", "type": "Mainnet", "blockHeight": 0},
            {"chain": "Bitcoin", "type": "Mainnet"}
        ]"#,
    )
    .unwrap();

    assert_eq!(
        find_latest_block_height(&heights, "Bitcoin", NetworkSelector::Testnet),
        Some(1_574_000)
    );
    assert_eq!(
        find_latest_block_height(&heights, "Rootstock", NetworkSelector::Mainnet),
        None
    );
    assert_eq!(
        find_latest_block_height(&heights, "Bitcoin", NetworkSelector::Mainnet),
        None
    );
    assert_eq!(
        find_latest_block_height(&heights, "Rootstock", NetworkSelector::Testnet),
        None
    );
}

#[test]
fn test_transaction_links() {
    let engine = engine();
    let url = engine.transaction_url("BTC", NetworkSelector::Mainnet, "abcd");
    assert!(url.ends_with("/abcd/"));
    let url = engine.transaction_url("RIF", NetworkSelector::Mainnet, "0xabcd");
    assert!(url.ends_with("/0xabcd"));
}
