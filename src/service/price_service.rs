use crate::{
    domain::{
        decimal::Decimal,
        price::{PriceQuote, PriceTable},
    },
    error::{EngineError, EngineResult},
};

/// 锚定价格的计价币种
pub const PEG_CURRENCY: &str = "USD";

/// 默认参考币种
pub const DEFAULT_REFERENCE_SYMBOL: &str = "BTC";

/// 合成锚定价格时的除法精度
pub const PEG_PRICE_SCALE: u32 = 18;

/// 价格服务：查询与锚定价格合成
pub struct PriceService;

impl PriceService {
    /// 查询币种在指定法币下的价格
    ///
    /// 币种不存在或该法币无报价时返回 None。
    pub fn lookup(table: &PriceTable, symbol: &str, currency: &str) -> Option<Decimal> {
        table
            .quote(symbol)
            .and_then(|quote| quote.get(currency))
            .cloned()
    }

    /// 为锚定币合成报价
    ///
    /// 锚定币 USD 价格固定为 1；其它法币按参考币交叉换算：
    /// `peg[c] = reference[c] / reference[USD]`。
    /// 返回新表，原表不变。
    pub fn synthesize_pegged_price(
        table: &PriceTable,
        pegged_symbol: &str,
        reference_symbol: &str,
    ) -> EngineResult<PriceTable> {
        let reference = table
            .quote(reference_symbol)
            .ok_or_else(|| EngineError::missing_reference(reference_symbol))?;
        let reference_usd = reference
            .get(PEG_CURRENCY)
            .ok_or_else(|| EngineError::missing_reference_currency(reference_symbol, PEG_CURRENCY))?;

        if reference_usd.is_zero() {
            return Err(EngineError::InvalidReferencePrice {
                symbol: reference_symbol.to_string(),
                currency: PEG_CURRENCY.to_string(),
                price: reference_usd.to_string(),
            });
        }

        let mut pegged = table
            .quote(pegged_symbol)
            .cloned()
            .unwrap_or_else(|| PriceQuote::new(pegged_symbol));
        pegged.price.insert(PEG_CURRENCY.to_string(), Decimal::one());

        for (currency, price) in reference.price.iter().filter(|(c, _)| c.as_str() != PEG_CURRENCY) {
            let cross = price.divide(reference_usd, PEG_PRICE_SCALE)?.normalized();
            pegged.price.insert(currency.clone(), cross);
        }

        tracing::debug!(
            pegged = %pegged_symbol,
            reference = %reference_symbol,
            currencies = pegged.price.len(),
            "Synthesized pegged price"
        );

        Ok(table.upsert(pegged))
    }

    /// DOC 锚定 1 美元，按 BTC 报价换算其它法币
    pub fn add_or_update_doc_price(table: &PriceTable) -> EngineResult<PriceTable> {
        Self::synthesize_pegged_price(table, "DOC", DEFAULT_REFERENCE_SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_numeric_literal(s).unwrap()
    }

    fn btc_table() -> PriceTable {
        PriceTable::new(vec![
            PriceQuote::new("BTC")
                .with_price("USD", dec("10000"))
                .with_price("EUR", dec("9000")),
            PriceQuote::new("RIF").with_price("USD", dec("0.07")),
        ])
    }

    #[test]
    fn test_lookup() {
        let table = btc_table();
        assert_eq!(PriceService::lookup(&table, "BTC", "EUR"), Some(dec("9000")));
        assert_eq!(PriceService::lookup(&table, "BTC", "JPY"), None);
        assert_eq!(PriceService::lookup(&table, "DOC", "USD"), None);
        assert_eq!(PriceService::lookup(&PriceTable::default(), "BTC", "USD"), None);
    }

    #[test]
    fn test_synthesize_doc_price() {
        let table = PriceService::add_or_update_doc_price(&btc_table()).unwrap();

        assert_eq!(PriceService::lookup(&table, "DOC", "USD"), Some(Decimal::one()));
        let eur = PriceService::lookup(&table, "DOC", "EUR").unwrap();
        assert_eq!(eur.to_string(), "0.9");
        // 追加在末尾
        assert_eq!(table.quotes().last().unwrap().symbol, "DOC");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_synthesize_updates_existing_quote() {
        let table = btc_table().upsert(
            PriceQuote::new("DOC")
                .with_price("USD", dec("0.98"))
                .with_price("ARS", dec("60")),
        );
        let synthesized = PriceService::add_or_update_doc_price(&table).unwrap();
        let doc = synthesized.quote("DOC").unwrap();

        assert_eq!(doc.get("USD"), Some(&Decimal::one()));
        assert_eq!(doc.get("EUR"), Some(&dec("0.9")));
        // 参考报价里没有的法币保留
        assert_eq!(doc.get("ARS"), Some(&dec("60")));
        assert_eq!(synthesized.len(), 3);
    }

    #[test]
    fn test_cross_rate_is_truncated() {
        let table = PriceTable::new(vec![PriceQuote::new("BTC")
            .with_price("USD", dec("3"))
            .with_price("GBP", dec("2"))]);
        let synthesized = PriceService::add_or_update_doc_price(&table).unwrap();
        assert_eq!(
            PriceService::lookup(&synthesized, "DOC", "GBP").unwrap().to_string(),
            "0.666666666666666666"
        );
    }

    #[test]
    fn test_missing_reference_quote() {
        let table = PriceTable::new(vec![PriceQuote::new("RIF").with_price("USD", dec("0.07"))]);
        assert_eq!(
            PriceService::add_or_update_doc_price(&table),
            Err(EngineError::missing_reference("BTC"))
        );
    }

    #[test]
    fn test_missing_reference_usd() {
        let table = PriceTable::new(vec![PriceQuote::new("BTC").with_price("EUR", dec("9000"))]);
        assert_eq!(
            PriceService::add_or_update_doc_price(&table),
            Err(EngineError::missing_reference_currency("BTC", "USD"))
        );
    }

    #[test]
    fn test_zero_reference_usd() {
        let table = PriceTable::new(vec![PriceQuote::new("BTC").with_price("USD", dec("0"))]);
        assert!(matches!(
            PriceService::add_or_update_doc_price(&table),
            Err(EngineError::InvalidReferencePrice { .. })
        ));
    }

    #[test]
    fn test_custom_reference_symbol() {
        let table = PriceTable::new(vec![PriceQuote::new("RBTC")
            .with_price("USD", dec("8000"))
            .with_price("JPY", dec("880000"))]);
        let synthesized = PriceService::synthesize_pegged_price(&table, "USDX", "RBTC").unwrap();
        assert_eq!(PriceService::lookup(&synthesized, "USDX", "JPY"), Some(dec("110")));
    }
}
