//! Limit-order form inputs and their EIP-712 rendering.

use alloy::primitives::{Address, U256};
use eyre::{Result, WrapErr};
use serde_json::json;

use order_connector_core::TypedDataPayload;

/// Limit order protocol v4 router, same address on every supported chain.
pub const LIMIT_ORDER_PROTOCOL: &str = "0x111111125421ca6dc452d289314280a0f8842a65";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrderForm {
    pub salt: U256,
    pub maker: Address,
    pub receiver: Address,
    pub maker_asset: Address,
    pub taker_asset: Address,
    pub making_amount: U256,
    pub taking_amount: U256,
    pub maker_traits: U256,
}

fn parse_address(field: &str, raw: &str) -> Result<Address> {
    raw.trim()
        .parse()
        .wrap_err_with(|| format!("{field} is not a valid address: {raw}"))
}

fn parse_amount(field: &str, raw: &str) -> Result<U256> {
    raw.trim()
        .parse()
        .wrap_err_with(|| format!("{field} is not a valid amount: {raw}"))
}

impl LimitOrderForm {
    pub fn parse(
        maker: &str,
        maker_asset: &str,
        taker_asset: &str,
        making_amount: &str,
        taking_amount: &str,
        salt: U256,
    ) -> Result<Self> {
        Ok(Self {
            salt,
            maker: parse_address("maker", maker)?,
            receiver: Address::ZERO,
            maker_asset: parse_address("maker asset", maker_asset)?,
            taker_asset: parse_address("taker asset", taker_asset)?,
            making_amount: parse_amount("making amount", making_amount)?,
            taking_amount: parse_amount("taking amount", taking_amount)?,
            maker_traits: U256::ZERO,
        })
    }

    pub fn to_typed_data(&self, chain_id: u64) -> TypedDataPayload {
        TypedDataPayload::new(json!({
            "primaryType": "Order",
            "domain": {
                "name": "1inch Aggregation Router",
                "version": "6",
                "chainId": chain_id,
                "verifyingContract": LIMIT_ORDER_PROTOCOL,
            },
            "types": {
                "EIP712Domain": [
                    {"name": "name", "type": "string"},
                    {"name": "version", "type": "string"},
                    {"name": "chainId", "type": "uint256"},
                    {"name": "verifyingContract", "type": "address"}
                ],
                "Order": [
                    {"name": "salt", "type": "uint256"},
                    {"name": "maker", "type": "address"},
                    {"name": "receiver", "type": "address"},
                    {"name": "makerAsset", "type": "address"},
                    {"name": "takerAsset", "type": "address"},
                    {"name": "makingAmount", "type": "uint256"},
                    {"name": "takingAmount", "type": "uint256"},
                    {"name": "makerTraits", "type": "uint256"}
                ]
            },
            "message": {
                "salt": self.salt.to_string(),
                "maker": self.maker.to_string(),
                "receiver": self.receiver.to_string(),
                "makerAsset": self.maker_asset.to_string(),
                "takerAsset": self.taker_asset.to_string(),
                "makingAmount": self.making_amount.to_string(),
                "takingAmount": self.taking_amount.to_string(),
                "makerTraits": self.maker_traits.to_string(),
            }
        }))
    }
}
