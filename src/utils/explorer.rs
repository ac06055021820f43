//! 区块浏览器链接

use crate::{config::ExplorerConfig, domain::chain::NetworkSelector};

/// 交易详情链接
///
/// BTC 使用 BTC 浏览器并以 `/` 结尾；其它币种都在 RSK 浏览器上，无尾随斜杠。
pub fn transaction_url(
    config: &ExplorerConfig,
    symbol: &str,
    network: NetworkSelector,
    hash: &str,
) -> String {
    if symbol.eq_ignore_ascii_case("BTC") {
        let base = match network {
            NetworkSelector::Mainnet => &config.btc_mainnet,
            NetworkSelector::Testnet => &config.btc_testnet,
        };
        format!("{}/{}/", base.trim_end_matches('/'), hash)
    } else {
        let base = match network {
            NetworkSelector::Mainnet => &config.rbtc_mainnet,
            NetworkSelector::Testnet => &config.rbtc_testnet,
        };
        format!("{}/{}", base.trim_end_matches('/'), hash)
    }
}
