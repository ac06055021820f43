//! 价格表
//!
//! 外部拉取的价格快照：`[{symbol, price: {currency -> numeric-string}}]`。
//! 按币种建索引查询，同一币种出现多次时以第一条为准。

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::decimal::Decimal;

/// 单个币种的报价
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    #[serde(default)]
    pub price: BTreeMap<String, Decimal>,
}

impl PriceQuote {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_price(mut self, currency: impl Into<String>, price: Decimal) -> Self {
        self.price.insert(currency.into(), price);
        self
    }

    pub fn get(&self, currency: &str) -> Option<&Decimal> {
        self.price.get(currency)
    }
}

/// 价格表快照
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    quotes: Vec<PriceQuote>,
    index: HashMap<String, usize>,
}

impl PriceTable {
    pub fn new(quotes: Vec<PriceQuote>) -> Self {
        let mut index = HashMap::with_capacity(quotes.len());
        for (i, quote) in quotes.iter().enumerate() {
            index.entry(quote.symbol.clone()).or_insert(i);
        }
        Self { quotes, index }
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn quote(&self, symbol: &str) -> Option<&PriceQuote> {
        self.index.get(symbol).map(|&i| &self.quotes[i])
    }

    pub fn quotes(&self) -> &[PriceQuote] {
        &self.quotes
    }

    /// 新增或替换币种报价，返回新表
    #[must_use]
    pub fn upsert(&self, quote: PriceQuote) -> Self {
        let mut quotes = self.quotes.clone();
        match self.index.get(&quote.symbol) {
            Some(&i) => quotes[i] = quote,
            None => quotes.push(quote),
        }
        Self::new(quotes)
    }

    pub fn into_quotes(self) -> Vec<PriceQuote> {
        self.quotes
    }
}

impl PartialEq for PriceTable {
    fn eq(&self, other: &Self) -> bool {
        self.quotes == other.quotes
    }
}

impl Eq for PriceTable {}

impl From<Vec<PriceQuote>> for PriceTable {
    fn from(quotes: Vec<PriceQuote>) -> Self {
        Self::new(quotes)
    }
}

impl FromIterator<PriceQuote> for PriceTable {
    fn from_iter<I: IntoIterator<Item = PriceQuote>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for PriceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.quotes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PriceTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<PriceQuote>::deserialize(deserializer).map(Self::new)
    }
}
