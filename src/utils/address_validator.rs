//! 地址验证模块
//!
//! 按链族分派：UTXO 链交给 `bitcoin` 解析并要求网络匹配，
//! 账户模型链校验十六进制格式和 EIP-1191 / EIP-55 校验和。
//! 校验失败一律返回 false，不抛错。

use std::str::FromStr;

use bitcoin::{address::NetworkUnchecked, Address, Network};
use sha3::{Digest, Keccak256};

use crate::{
    domain::chain::{ChainFamily, ChainRegistry, NetworkSelector, WalletIdentity},
    utils::string_utils,
};

/// 地址验证器
#[derive(Debug, Clone, Default)]
pub struct AddressValidator {
    registry: ChainRegistry,
}

impl AddressValidator {
    pub fn new(registry: ChainRegistry) -> Self {
        Self { registry }
    }

    /// 验证地址格式
    ///
    /// # 参数
    /// - `address`: 待验证的地址
    /// - `symbol`: 币种（账户模型用于查链ID）
    /// - `family`: 链族，决定校验规则
    /// - `network`: 主网 / 测试网
    pub fn is_valid_address(
        &self,
        address: &str,
        symbol: &str,
        family: ChainFamily,
        network: NetworkSelector,
    ) -> bool {
        if string_utils::is_blank(address) {
            return false;
        }

        let valid = match family {
            ChainFamily::Utxo => Self::validate_bitcoin_address(address, network),
            ChainFamily::Account => {
                let chain_id = self
                    .registry
                    .get(symbol)
                    .ok()
                    .and_then(|spec| spec.chain_id(network));
                Self::validate_account_address(address, chain_id)
            }
        };

        if !valid {
            tracing::debug!(
                symbol = %symbol,
                network = %network,
                "Rejected address: {}",
                address
            );
        }
        valid
    }

    /// 验证钱包自身地址
    pub fn is_wallet_address(&self, wallet: &WalletIdentity) -> bool {
        self.is_valid_address(
            &wallet.address,
            &wallet.symbol,
            wallet.chain_family,
            wallet.network,
        )
    }

    /// 验证Bitcoin地址：解析 → 网络匹配 → 生成输出脚本
    fn validate_bitcoin_address(address: &str, network: NetworkSelector) -> bool {
        let required = if network.is_testnet() {
            Network::Testnet
        } else {
            Network::Bitcoin
        };

        match Address::<NetworkUnchecked>::from_str(address) {
            Ok(unchecked) => match unchecked.require_network(required) {
                Ok(checked) => !checked.script_pubkey().is_empty(),
                Err(e) => {
                    tracing::debug!("Address network mismatch: {}", e);
                    false
                }
            },
            Err(e) => {
                tracing::debug!("Failed to parse bitcoin address: {}", e);
                false
            }
        }
    }

    /// 验证账户模型地址（0x 前缀可选，40 位十六进制）
    fn validate_account_address(address: &str, chain_id: Option<u64>) -> bool {
        let hex_part = strip_hex_prefix(address);

        if !is_address_body(hex_part) {
            return false;
        }

        // 全小写或全大写不做校验和检查
        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        if !(has_lower && has_upper) {
            return true;
        }

        verify_checksum(hex_part, chain_id)
    }
}

fn strip_hex_prefix(address: &str) -> &str {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address)
}

/// 20 字节地址的十六进制表示
fn is_address_body(hex_part: &str) -> bool {
    hex_part.len() == 40 && hex::decode(hex_part).is_ok()
}

/// 校验和哈希：EIP-1191 带链ID前缀，无链ID时退化为 EIP-55
/// https://eips.ethereum.org/EIPS/eip-1191
fn checksum_hash(lower_hex: &str, chain_id: Option<u64>) -> [u8; 32] {
    let preimage = match chain_id {
        Some(id) => format!("{}0x{}", id, lower_hex),
        None => lower_hex.to_string(),
    };
    let mut hasher = Keccak256::new();
    hasher.update(preimage.as_bytes());
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

fn hash_nibble(hash: &[u8; 32], i: usize) -> u8 {
    let byte = hash[i / 2];
    if i % 2 == 0 {
        byte >> 4
    } else {
        byte & 0x0f
    }
}

fn verify_checksum(hex_part: &str, chain_id: Option<u64>) -> bool {
    let hash = checksum_hash(&hex_part.to_ascii_lowercase(), chain_id);

    hex_part.chars().enumerate().all(|(i, ch)| {
        if !ch.is_ascii_alphabetic() {
            return true;
        }
        let should_be_uppercase = hash_nibble(&hash, i) >= 8;
        ch.is_ascii_uppercase() == should_be_uppercase
    })
}

/// 生成带校验和的地址（"0x" + 40 位）；输入不是 40 位十六进制时返回 None
pub fn to_checksum_address(address: &str, chain_id: Option<u64>) -> Option<String> {
    let hex_part = strip_hex_prefix(address);
    if !is_address_body(hex_part) {
        return None;
    }

    let lower = hex_part.to_ascii_lowercase();
    let hash = checksum_hash(&lower, chain_id);
    let body: String = lower
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            if ch.is_ascii_alphabetic() && hash_nibble(&hash, i) >= 8 {
                ch.to_ascii_uppercase()
            } else {
                ch
            }
        })
        .collect();

    Some(format!("0x{}", body))
}
