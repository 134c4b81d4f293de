//! Account data owned by the Plasma program: the pool account and per-owner LP positions.
//!
//! Both are fixed-size packed records, so they decode with the same [`Layout`] rules as
//! instruction arguments.

use instruction_macros::Layout;
use instruction_macros_traits::{
    DecodingError,
    Layout,
};
use solana_address::Address;
use static_assertions::const_assert_eq;
use thiserror::Error;

pub const POOL_LEN: usize = 624;
pub const POOL_DISCRIMINATOR: [u8; 8] = [116, 210, 187, 119, 196, 196, 52, 137];
pub const POOL_HEADER_LEN: usize = 528;
/// The AMM curve state stored after the header. Kept as raw bytes.
pub const AMM_STATE_LEN: usize = 96;
pub const LP_POSITION_LEN: usize = 64;

const_assert_eq!(POOL_HEADER_LEN + AMM_STATE_LEN, POOL_LEN);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AccountDataError {
    #[error("`{account}` data must be {expected} bytes, got {found}")]
    WrongLength {
        account: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("discriminator {found:?} isn't a pool's")]
    WrongDiscriminator { found: [u8; 8] },
    #[error(transparent)]
    Decoding(#[from] DecodingError),
}

fn require_len(account: &'static str, data: &[u8], expected: usize) -> Result<(), AccountDataError> {
    match data.len() {
        found if found == expected => Ok(()),
        found => Err(AccountDataError::WrongLength {
            account,
            expected,
            found,
        }),
    }
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenParams {
    /// e.g. 9 for SOL, 6 for USDC.
    pub decimals: u32,
    /// Bump seed of the pool's vault for this mint.
    pub vault_bump: u32,
    pub mint_key: Address,
    pub vault_key: Address,
}

#[derive(Layout, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProtocolFeeRecipient {
    pub recipient: Address,
    pub shares: u64,
    pub total_accumulated_quote_fees: u64,
    pub collected_quote_fees: u64,
}

impl ProtocolFeeRecipient {
    /// Fees accrued to this recipient that haven't been withdrawn yet.
    pub fn uncollected_quote_fees(&self) -> u64 {
        self.total_accumulated_quote_fees
            .saturating_sub(self.collected_quote_fees)
    }
}

#[derive(Layout, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProtocolFeeRecipients {
    pub recipients: [ProtocolFeeRecipient; 3],
    pub padding: [u64; 12],
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolHeader {
    pub discriminator: [u8; 8],
    pub sequence_number: u64,
    pub base_params: TokenParams,
    pub quote_params: TokenParams,
    pub fee_recipients: ProtocolFeeRecipients,
    pub swap_sequence_number: u64,
    pub padding: [u64; 12],
}

/// The full pool account: its header followed by the AMM state.
#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pool {
    pub header: PoolHeader,
    pub amm: [u8; AMM_STATE_LEN],
}

impl Pool {
    /// Decodes a pool account's data, which must be exactly [`POOL_LEN`] bytes and start with
    /// [`POOL_DISCRIMINATOR`].
    pub fn from_account_data(data: &[u8]) -> Result<Self, AccountDataError> {
        require_len("Pool", data, POOL_LEN)?;
        let (discriminator, _) = <[u8; 8]>::decode_from(data, 0)?;
        if discriminator != POOL_DISCRIMINATOR {
            return Err(AccountDataError::WrongDiscriminator {
                found: discriminator,
            });
        }
        Ok(Self::from_bytes(data)?)
    }
}

#[derive(Layout, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingSharesToVest {
    /// Zero when nothing is vesting.
    pub deposit_slot: u64,
    pub lp_shares_to_vest: u64,
}

impl PendingSharesToVest {
    pub fn is_vesting(&self) -> bool {
        self.lp_shares_to_vest > 0 || self.deposit_slot != 0
    }
}

#[derive(Layout, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LpPosition {
    /// Raw bits of the pool's I80F48 reward factor when fees were last settled.
    pub reward_factor_snapshot: i128,
    pub lp_shares: u64,
    pub withdrawable_lp_shares: u64,
    pub uncollected_fees: u64,
    pub collected_fees: u64,
    pub pending_shares_to_vest: PendingSharesToVest,
}

impl LpPosition {
    pub fn from_account_data(data: &[u8]) -> Result<Self, AccountDataError> {
        require_len("LpPosition", data, LP_POSITION_LEN)?;
        Ok(Self::from_bytes(data)?)
    }

    pub fn is_empty(&self) -> bool {
        self.lp_shares == 0
    }
}
