use serde::{Deserialize, Serialize};

/// View-owned projection of a swap.
///
/// Amounts are always in human units (already divided by the asset's
/// scaling factor); raw chain integers never reach this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// `<issuer>.<contract>::<asset>` of the swapped token.
    #[serde(rename = "trait", skip_serializing_if = "Option::is_none")]
    pub asset_trait: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub btc_recipient: Option<String>,

    /// Price in units of the counter asset (BTC, STX, …).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_sats: Option<f64>,

    /// Swapped fungible amount in token units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_id: Option<u128>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_recipient: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_recipient_from_swap: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_sender_from_swap: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub when_from_swap: Option<u64>,

    /// 1 once the swap settled, 0 while open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_from_swap: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_id: Option<String>,

    /// `fee_id` is the default tier, not a registry match.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fee_fallback: bool,
}

impl FormState {
    /// State shown before any record has been decoded.
    pub fn for_new_swap(
        asset_trait: Option<String>,
        nft_id: Option<u128>,
        default_recipient: Option<String>,
    ) -> Self {
        Self {
            asset_trait,
            nft_id,
            asset_recipient: default_recipient,
            ..Self::default()
        }
    }

    pub fn is_done(&self) -> bool {
        self.done_from_swap == Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_view_field_names() {
        let form = FormState {
            asset_trait: Some("SP1.token::t".into()),
            amount_sats: Some(0.5),
            done_from_swap: Some(0),
            ..FormState::default()
        };
        let json = serde_json::to_value(&form).unwrap();

        assert_eq!(json["trait"], "SP1.token::t");
        assert_eq!(json["amountSats"], 0.5);
        assert_eq!(json["doneFromSwap"], 0);
        assert!(json.get("feeFallback").is_none());
        assert!(json.get("btcRecipient").is_none());
    }

    #[test]
    fn new_swap_defaults_recipient() {
        let form = FormState::for_new_swap(None, Some(3), Some("SP1".into()));
        assert_eq!(form.asset_recipient.as_deref(), Some("SP1"));
        assert_eq!(form.nft_id, Some(3));
        assert!(!form.is_done());
    }
}
