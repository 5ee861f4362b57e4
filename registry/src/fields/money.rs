//! Money-like amounts.
//!
//! Callers hand amounts over either as a bare integer (coins of the native
//! asset) or as a full `{coins, assetId, decimals}` object. Both shapes land
//! in the same [`Money`] value.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::config::NATIVE_DECIMALS;

/// An amount in the smallest unit of an asset.
///
/// `asset_id == None` is the native asset. Values are signed and are not
/// range-checked; business validation happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub coins: i64,
    pub asset_id: Option<String>,
    pub decimals: u8,
}

impl Money {
    /// Native-asset amount.
    pub fn native(coins: i64) -> Self {
        Self {
            coins,
            asset_id: None,
            decimals: NATIVE_DECIMALS,
        }
    }

    /// Amount of a specific asset.
    pub fn asset(coins: i64, asset_id: impl Into<String>, decimals: u8) -> Self {
        Self {
            coins,
            asset_id: Some(asset_id.into()),
            decimals,
        }
    }

    /// Same amount re-denominated in another asset id.
    pub fn with_asset_id(mut self, asset_id: Option<String>) -> Self {
        self.asset_id = asset_id;
        self
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.asset_id {
            Some(id) => write!(f, "{} {}", self.coins, id),
            None => write!(f, "{} native", self.coins),
        }
    }
}

/// Integer coins, optionally given as a decimal string (large JS numbers).
#[derive(Deserialize)]
#[serde(untagged)]
enum Coins {
    Number(i64),
    Text(String),
}

impl Coins {
    fn value<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid coin amount `{s}`"))),
        }
    }
}

fn native_decimals() -> u8 {
    NATIVE_DECIMALS
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyObject {
    #[serde(alias = "amount")]
    coins: Coins,
    #[serde(default)]
    asset_id: Option<String>,
    #[serde(default = "native_decimals", alias = "precision")]
    decimals: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Bare(Coins),
    Object(MoneyObject),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MoneyRepr::deserialize(deserializer)? {
            MoneyRepr::Bare(coins) => Ok(Money::native(coins.value::<D::Error>()?)),
            MoneyRepr::Object(obj) => Ok(Money {
                coins: obj.coins.value::<D::Error>()?,
                asset_id: obj.asset_id,
                decimals: obj.decimals,
            }),
        }
    }
}
