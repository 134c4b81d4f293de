//! Event records the program emits through its `Log` self-invocation.
//!
//! [`PlasmaEvent`]'s variant tags line up with [`PlasmaInstruction`] discriminators, so the event
//! emitted by an instruction carries that instruction's tag. `Log` itself never emits one and only
//! holds its slot.

use instruction_macros::Layout;
use solana_address::Address;

use crate::{
    instructions::PlasmaInstruction,
    types::{
        ProtocolFeeRecipientParams,
        SwapResult,
    },
};

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlasmaEventHeader {
    pub sequence_number: u64,
    pub slot: u64,
    pub timestamp: i64,
    pub pool: Address,
    pub signer: Address,
    pub base_decimals: u8,
    pub quote_decimals: u8,
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapEvent {
    pub swap_sequence_number: u64,
    pub pre_base_liquidity: u64,
    pub pre_quote_liquidity: u64,
    pub post_base_liquidity: u64,
    pub post_quote_liquidity: u64,
    pub snapshot_base_liquidity: u64,
    pub snapshot_quote_liquidity: u64,
    pub swap_result: SwapResult,
}

#[derive(Layout, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddLiquidityEvent {
    pub pool_total_lp_shares: u64,
    pub pool_total_base_liquidity: u64,
    pub pool_total_quote_liquidity: u64,
    pub snapshot_base_liquidity: u64,
    pub snapshot_quote_liquidity: u64,
    pub user_lp_shares_received: u64,
    pub user_lp_shares_available: u64,
    pub user_lp_shares_locked: u64,
    pub user_lp_shares_unlocked_for_withdrawal: u64,
    pub user_base_deposited: u64,
    pub user_quote_deposited: u64,
    pub user_total_withdrawable_base: u64,
    pub user_total_withdrawable_quote: u64,
}

#[derive(Layout, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemoveLiquidityEvent {
    pub pool_total_lp_shares: u64,
    pub pool_total_base_liquidity: u64,
    pub pool_total_quote_liquidity: u64,
    pub snapshot_base_liquidity: u64,
    pub snapshot_quote_liquidity: u64,
    pub user_lp_shares_burned: u64,
    pub user_lp_shares_available: u64,
    pub user_lp_shares_locked: u64,
    pub user_lp_shares_unlocked_for_withdrawal: u64,
    pub user_base_withdrawn: u64,
    pub user_quote_withdrawn: u64,
    pub user_total_withdrawable_base: u64,
    pub user_total_withdrawable_quote: u64,
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenounceLiquidityEvent {
    pub allow_fee_withdrawal: bool,
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawLpFeesEvent {
    pub fees_withdrawn: u64,
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeLpPositionEvent {
    pub owner: Address,
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializePoolEvent {
    pub lp_fee_in_bps: u64,
    pub protocol_fee_in_pct: u64,
    pub fee_recipient_params: [ProtocolFeeRecipientParams; 3],
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawProtocolFeesEvent {
    pub protocol_fee_recipient: Address,
    pub fees_withdrawn: u64,
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferLiquidityEvent {
    pub src: Address,
    pub dst: Address,
    pub lp_shares_transferred: u64,
}

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlasmaEvent {
    Swap {
        header: PlasmaEventHeader,
        event: SwapEvent,
    },
    AddLiquidity {
        header: PlasmaEventHeader,
        event: AddLiquidityEvent,
    },
    RemoveLiquidity {
        header: PlasmaEventHeader,
        event: RemoveLiquidityEvent,
    },
    RenounceLiquidity {
        header: PlasmaEventHeader,
        event: RenounceLiquidityEvent,
    },
    WithdrawLpFees {
        header: PlasmaEventHeader,
        event: WithdrawLpFeesEvent,
    },
    InitializeLpPosition {
        header: PlasmaEventHeader,
        event: InitializeLpPositionEvent,
    },
    InitializePool {
        header: PlasmaEventHeader,
        event: InitializePoolEvent,
    },
    WithdrawProtocolFees {
        header: PlasmaEventHeader,
        event: WithdrawProtocolFeesEvent,
    },
    Log {
        header: PlasmaEventHeader,
        event: (),
    },
    TransferLiquidity {
        header: PlasmaEventHeader,
        event: TransferLiquidityEvent,
    },
}

impl PlasmaEvent {
    pub fn header(&self) -> &PlasmaEventHeader {
        match self {
            Self::Swap { header, .. }
            | Self::AddLiquidity { header, .. }
            | Self::RemoveLiquidity { header, .. }
            | Self::RenounceLiquidity { header, .. }
            | Self::WithdrawLpFees { header, .. }
            | Self::InitializeLpPosition { header, .. }
            | Self::InitializePool { header, .. }
            | Self::WithdrawProtocolFees { header, .. }
            | Self::Log { header, .. }
            | Self::TransferLiquidity { header, .. } => header,
        }
    }

    /// The instruction that emitted this event.
    pub fn instruction(&self) -> PlasmaInstruction {
        match self {
            Self::Swap { .. } => PlasmaInstruction::Swap,
            Self::AddLiquidity { .. } => PlasmaInstruction::AddLiquidity,
            Self::RemoveLiquidity { .. } => PlasmaInstruction::RemoveLiquidity,
            Self::RenounceLiquidity { .. } => PlasmaInstruction::RenounceLiquidity,
            Self::WithdrawLpFees { .. } => PlasmaInstruction::WithdrawLpFees,
            Self::InitializeLpPosition { .. } => PlasmaInstruction::InitializeLpPosition,
            Self::InitializePool { .. } => PlasmaInstruction::InitializePool,
            Self::WithdrawProtocolFees { .. } => PlasmaInstruction::WithdrawProtocolFees,
            Self::Log { .. } => PlasmaInstruction::Log,
            Self::TransferLiquidity { .. } => PlasmaInstruction::TransferLiquidity,
        }
    }
}

macro_rules! impl_from_header_and_event {
    ($($event:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<(PlasmaEventHeader, $event)> for PlasmaEvent {
                fn from((header, event): (PlasmaEventHeader, $event)) -> Self {
                    PlasmaEvent::$variant { header, event }
                }
            }
        )*
    };
}

impl_from_header_and_event!(
    SwapEvent => Swap,
    AddLiquidityEvent => AddLiquidity,
    RemoveLiquidityEvent => RemoveLiquidity,
    RenounceLiquidityEvent => RenounceLiquidity,
    WithdrawLpFeesEvent => WithdrawLpFees,
    InitializeLpPositionEvent => InitializeLpPosition,
    InitializePoolEvent => InitializePool,
    WithdrawProtocolFeesEvent => WithdrawProtocolFees,
    TransferLiquidityEvent => TransferLiquidity,
);
