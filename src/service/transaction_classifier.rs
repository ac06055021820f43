//! 交易分类服务
//!
//! 相对钱包地址把原始交易归类为 Sent / Sending / Received / Receiving，
//! 并生成列表展示需要的金额文本和日期文本。

use crate::{
    domain::{
        chain::WalletIdentity,
        transaction::{ClassifiedTransaction, Transaction, TransactionState},
    },
    service::unit_converter::UnitConverter,
    utils::time_utils,
};

/// 交易分类器（无状态）
pub struct TransactionClassifier;

impl TransactionClassifier {
    /// 分类单条交易
    ///
    /// 金额指数按币种查注册表，钱包标注的链族只用于未注册币种。
    pub fn classify(
        converter: &UnitConverter,
        tx: &Transaction,
        wallet: &WalletIdentity,
    ) -> ClassifiedTransaction {
        let is_sender = tx.is_sent_by(&wallet.address);
        let is_confirmed = tx.is_confirmed();
        let state = TransactionState::from_facts(is_sender, is_confirmed);

        // 已确认用上链时间，未确认用创建时间
        let display_timestamp = if is_confirmed {
            tx.confirmed_at
        } else {
            Some(tx.created_at)
        };

        let display_amount =
            converter.display_amount_for(&wallet.symbol, wallet.chain_family, tx.value.units());
        let amount = format!("{} {}", display_amount, wallet.symbol);

        ClassifiedTransaction {
            state,
            datetime: time_utils::format_display_date(display_timestamp.as_ref()),
            display_timestamp,
            display_amount,
            amount,
        }
    }

    /// 分类交易列表；列表缺失时返回空
    pub fn classify_all(
        converter: &UnitConverter,
        txs: Option<&[Transaction]>,
        wallet: &WalletIdentity,
    ) -> Vec<ClassifiedTransaction> {
        let Some(txs) = txs else {
            return Vec::new();
        };

        let classified: Vec<ClassifiedTransaction> =
            txs.iter().map(|tx| Self::classify(converter, tx, wallet)).collect();

        tracing::debug!(
            symbol = %wallet.symbol,
            total = classified.len(),
            pending = classified.iter().filter(|c| c.state.is_pending()).count(),
            "Classified transactions"
        );

        classified
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{
        chain::{ChainFamily, NetworkSelector},
        decimal::Decimal,
        transaction::{HexValue, UNCONFIRMED_BLOCK_HEIGHT},
    };

    const WALLET: &str = "0x7986b3df570230288501eea3d890bd66948c9b79";
    const OTHER: &str = "0x1234567890123456789012345678901234567890";

    fn converter() -> UnitConverter {
        UnitConverter::default()
    }

    fn wallet() -> WalletIdentity {
        WalletIdentity::new(WALLET, "RBTC", ChainFamily::Account, NetworkSelector::Mainnet)
    }

    fn tx(from: &str, block_height: i64) -> Transaction {
        Transaction {
            hash: Some("0xabc".into()),
            from: from.into(),
            to: OTHER.into(),
            value: HexValue::parse("0xde0b6b3a7640000").unwrap(),
            block_height,
            created_at: Utc.with_ymd_and_hms(2019, 3, 4, 8, 0, 0).unwrap(),
            confirmed_at: (block_height != UNCONFIRMED_BLOCK_HEIGHT)
                .then(|| Utc.with_ymd_and_hms(2019, 3, 5, 9, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_sending() {
        let c = TransactionClassifier::classify(&converter(), &tx(WALLET, -1), &wallet());
        assert_eq!(c.state, TransactionState::Sending);
        assert_eq!(c.datetime, "Mar 4. 2019");
        assert_eq!(c.amount, "1 RBTC");
        assert_eq!(c.display_amount, Decimal::one());
    }

    #[test]
    fn test_received_uses_confirmed_at() {
        let t = tx(OTHER, 500_000);
        let c = TransactionClassifier::classify(&converter(), &t, &wallet());
        assert_eq!(c.state, TransactionState::Received);
        assert_eq!(c.display_timestamp, t.confirmed_at);
        assert_eq!(c.datetime, "Mar 5. 2019");
    }

    #[test]
    fn test_all_states() {
        let w = wallet();
        assert_eq!(
            TransactionClassifier::classify(&converter(), &tx(WALLET, 10), &w).state,
            TransactionState::Sent
        );
        assert_eq!(
            TransactionClassifier::classify(&converter(), &tx(OTHER, -1), &w).state,
            TransactionState::Receiving
        );
    }

    #[test]
    fn test_confirmed_without_timestamp() {
        let mut t = tx(OTHER, 42);
        t.confirmed_at = None;
        let c = TransactionClassifier::classify(&converter(), &t, &wallet());
        assert_eq!(c.display_timestamp, None);
        assert_eq!(c.datetime, "");
    }

    #[test]
    fn test_sender_match_is_exact() {
        // 大小写不同视为不同地址
        let upper = WALLET.to_uppercase();
        let c = TransactionClassifier::classify(&converter(), &tx(&upper, 10), &wallet());
        assert_eq!(c.state, TransactionState::Received);
    }

    #[test]
    fn test_utxo_amount() {
        let btc = WalletIdentity::new(
            "mzBc4XEFSdzCDcTxAgf6EZXgsZWpztRhef",
            "BTC",
            ChainFamily::Utxo,
            NetworkSelector::Testnet,
        );
        let mut t = tx("someone", 10);
        t.value = HexValue::from(150_000_000u64);
        let c = TransactionClassifier::classify(&converter(), &t, &btc);
        assert_eq!(c.amount, "1.5 BTC");
    }

    #[test]
    fn test_amount_exponent_follows_registry() {
        // 钱包把 BTC 标成账户模型，仍按 8 位换算
        let mis_tagged = WalletIdentity::new(
            "mzBc4XEFSdzCDcTxAgf6EZXgsZWpztRhef",
            "BTC",
            ChainFamily::Account,
            NetworkSelector::Testnet,
        );
        let mut t = tx("someone", 10);
        t.value = HexValue::from(100_000_000u64);
        let c = TransactionClassifier::classify(&converter(), &t, &mis_tagged);
        assert_eq!(c.amount, "1 BTC");
        assert_eq!(c.display_amount, Decimal::one());
    }

    #[test]
    fn test_unregistered_symbol_uses_wallet_family() {
        let token = WalletIdentity::new(WALLET, "XYZ", ChainFamily::Account, NetworkSelector::Mainnet);
        let c = TransactionClassifier::classify(&converter(), &tx(OTHER, 10), &token);
        assert_eq!(c.amount, "1 XYZ");
    }

    #[test]
    fn test_classify_all() {
        let w = wallet();
        assert!(TransactionClassifier::classify_all(&converter(), None, &w).is_empty());

        let txs = vec![tx(WALLET, -1), tx(OTHER, 7), tx(WALLET, 8)];
        let first = TransactionClassifier::classify_all(&converter(), Some(&txs), &w);
        let second = TransactionClassifier::classify_all(&converter(), Some(&txs), &w);
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|c| c.state).collect::<Vec<_>>(),
            vec![
                TransactionState::Sending,
                TransactionState::Received,
                TransactionState::Sent
            ]
        );
    }
}
