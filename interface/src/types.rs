//! Argument and result types shared by instruction records and events.

use instruction_macros::Layout;
use solana_address::Address;

#[repr(u8)]
#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Side {
    /// Buys base with quote.
    Bid = 0,
    /// Sells base for quote.
    Ask = 1,
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapType {
    /// Spend exactly `amount_in`, failing if less than `min_amount_out` comes back.
    ExactIn { amount_in: u64, min_amount_out: u64 },
    /// Receive exactly `amount_out`, failing if it costs more than `max_amount_in`.
    ExactOut { amount_out: u64, max_amount_in: u64 },
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolFeeRecipientParams {
    pub recipient: Address,
    pub shares: u64,
}

impl ProtocolFeeRecipientParams {
    pub const fn new(recipient: Address, shares: u64) -> Self {
        Self { recipient, shares }
    }

    /// An unused recipient slot.
    pub const fn empty() -> Self {
        Self::new(Address::new_from_array([0; 32]), 0)
    }
}

impl Default for ProtocolFeeRecipientParams {
    fn default() -> Self {
        Self::empty()
    }
}

/// How a swap was filled, as reported in [`crate::events::SwapEvent`].
#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResult {
    pub side: Side,
    pub base_amount_to_transfer: u64,
    pub quote_amount_to_transfer: u64,
    pub base_matched_as_limit_order: u64,
    pub quote_matched_as_limit_order: u64,
    pub base_matched_as_swap: u64,
    pub quote_matched_as_swap: u64,
    pub fee_in_quote: u64,
}

#[cfg(test)]
mod tests {
    use borsh::BorshSerialize;
    use instruction_macros_traits::{
        DecodingErrorKind,
        Layout,
    };

    use super::*;

    #[derive(BorshSerialize)]
    enum BorshSide {
        _Bid,
        Ask,
    }

    #[derive(BorshSerialize)]
    enum BorshSwapType {
        ExactIn { amount_in: u64, min_amount_out: u64 },
        _ExactOut { amount_out: u64, max_amount_in: u64 },
    }

    #[test]
    fn side_and_swap_type_match_borsh() {
        assert_eq!(Side::Ask.to_bytes().unwrap(), borsh::to_vec(&BorshSide::Ask).unwrap());

        let ours = SwapType::ExactIn {
            amount_in: 1_000,
            min_amount_out: 990,
        };
        let theirs = BorshSwapType::ExactIn {
            amount_in: 1_000,
            min_amount_out: 990,
        };
        assert_eq!(ours.to_bytes().unwrap(), borsh::to_vec(&theirs).unwrap());
        assert_eq!(ours.encoded_len(), 17);
    }

    #[test]
    fn unknown_side_is_rejected() {
        let err = Side::from_bytes(&[2]).unwrap_err();
        assert_eq!(
            err.kind,
            DecodingErrorKind::InvalidVariantTag {
                tag: 2,
                type_name: "Side",
            }
        );
    }

    #[test]
    fn swap_type_errors_name_the_variant() {
        // ExactOut with a truncated `max_amount_in`.
        let bytes = [1, 5, 0, 0, 0, 0, 0, 0, 0, 7, 0];
        let err = SwapType::from_bytes(&bytes).unwrap_err();
        assert_eq!(err.path.to_string(), "ExactOut.max_amount_in");
    }

    #[test]
    fn fee_recipient_is_forty_bytes() {
        let params = ProtocolFeeRecipientParams::new(Address::new_from_array([9; 32]), 3);
        let bytes = params.to_bytes().unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[..32], &[9; 32]);
        assert_eq!(ProtocolFeeRecipientParams::from_bytes(&bytes).unwrap(), params);
    }
}
