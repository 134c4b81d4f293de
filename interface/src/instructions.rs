//! The program's instruction set.
//!
//! `#[derive(ProgramInstruction)]` generates, for each variant, a `{Variant}InstructionData`
//! argument record and a `{Variant}Accounts` struct holding one address per account role, plus the
//! [`InstructionSet`](instruction_macros_traits::InstructionSet) registry on the enum itself.

use instruction_macros::ProgramInstruction;
use static_assertions::const_assert_eq;

use crate::types::{
    ProtocolFeeRecipientParams,
    Side,
    SwapType,
};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ProgramInstruction, strum_macros::Display)]
#[cfg_attr(test, derive(strum_macros::FromRepr, strum_macros::EnumIter))]
#[program_id(crate::program::ID)]
#[rustfmt::skip]
pub enum PlasmaInstruction {
    /// Swaps against the pool.
    #[account(0,                   name = "plasma_program", desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",  desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",           desc = "The pool state account.")]
    #[account(3, signer,           name = "trader",         desc = "The trader.")]
    #[account(4, writable,         name = "base_account",   desc = "The trader's base token account.")]
    #[account(5, writable,         name = "quote_account",  desc = "The trader's quote token account.")]
    #[account(6, writable,         name = "base_vault",     desc = "Base vault PDA, seeds are [b'vault', pool, base_mint].")]
    #[account(7, writable,         name = "quote_vault",    desc = "Quote vault PDA, seeds are [b'vault', pool, quote_mint].")]
    #[account(8,                   name = "token_program",  desc = "The SPL token program.")]
    #[args(side: Side, "Which side of the pool the trader takes.")]
    #[args(swap_type: SwapType, "Exact-in or exact-out amounts and their slippage bound.")]
    Swap = 0,

    /// Deposits base and quote into the pool in exchange for LP shares.
    #[account(0,                   name = "plasma_program", desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",  desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",           desc = "The pool state account.")]
    #[account(3, signer,           name = "trader",         desc = "The liquidity provider.")]
    #[account(4, writable,         name = "lp_position",    desc = "LP position PDA, seeds are [b'lp_position', pool, trader].")]
    #[account(5, writable,         name = "base_account",   desc = "The trader's base token account.")]
    #[account(6, writable,         name = "quote_account",  desc = "The trader's quote token account.")]
    #[account(7, writable,         name = "base_vault",     desc = "Base vault PDA, seeds are [b'vault', pool, base_mint].")]
    #[account(8, writable,         name = "quote_vault",    desc = "Quote vault PDA, seeds are [b'vault', pool, quote_mint].")]
    #[account(9,                   name = "token_program",  desc = "The SPL token program.")]
    #[args(desired_base_amount_in: u64, "Upper bound on the base deposited.")]
    #[args(desired_quote_amount_in: u64, "Upper bound on the quote deposited.")]
    #[args(initial_lp_shares: Option<u64>, "Shares minted by the first deposit into an empty pool.")]
    AddLiquidity = 1,

    /// Burns LP shares for their share of the pool's base and quote.
    #[account(0,                   name = "plasma_program", desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",  desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",           desc = "The pool state account.")]
    #[account(3, signer,           name = "trader",         desc = "The liquidity provider.")]
    #[account(4, writable,         name = "lp_position",    desc = "LP position PDA, seeds are [b'lp_position', pool, trader].")]
    #[account(5, writable,         name = "base_account",   desc = "The trader's base token account.")]
    #[account(6, writable,         name = "quote_account",  desc = "The trader's quote token account.")]
    #[account(7, writable,         name = "base_vault",     desc = "Base vault PDA, seeds are [b'vault', pool, base_mint].")]
    #[account(8, writable,         name = "quote_vault",    desc = "Quote vault PDA, seeds are [b'vault', pool, quote_mint].")]
    #[account(9,                   name = "token_program",  desc = "The SPL token program.")]
    #[args(shares: u64, "LP shares to burn.")]
    RemoveLiquidity = 2,

    /// Gives up ownership of an LP position's liquidity.
    #[account(0,                   name = "plasma_program", desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",  desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",           desc = "The pool state account.")]
    #[account(3, signer,           name = "trader",         desc = "The position owner.")]
    #[account(4, writable,         name = "lp_position",    desc = "LP position PDA, seeds are [b'lp_position', pool, trader].")]
    #[args(allow_fee_withdrawal: bool, "Whether the owner may still withdraw accrued fees.")]
    RenounceLiquidity = 3,

    /// Withdraws the quote fees accrued by an LP position.
    #[account(0,                   name = "plasma_program",    desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",     desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",              desc = "The pool state account.")]
    #[account(3, signer,           name = "trader",            desc = "The fee recipient.")]
    #[account(4,                   name = "lp_position_owner", desc = "The owner the LP position PDA is derived from.")]
    #[account(5, writable,         name = "lp_position",       desc = "LP position PDA, seeds are [b'lp_position', pool, lp_position_owner].")]
    #[account(6, writable,         name = "quote_account",     desc = "The trader's quote token account.")]
    #[account(7, writable,         name = "quote_vault",       desc = "Quote vault PDA, seeds are [b'vault', pool, quote_mint].")]
    #[account(8,                   name = "token_program",     desc = "The SPL token program.")]
    WithdrawLpFees = 4,

    /// Creates an LP position for `lp_position_owner`.
    #[account(0,                   name = "plasma_program",    desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",     desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",              desc = "The pool state account.")]
    #[account(3, signer, writable, name = "payer",             desc = "Pays rent for the new position.")]
    #[account(4,                   name = "lp_position_owner", desc = "The owner of the new position.")]
    #[account(5, writable,         name = "lp_position",       desc = "LP position PDA, seeds are [b'lp_position', pool, lp_position_owner].")]
    #[account(6,                   name = "system_program",    desc = "The system program.")]
    InitializeLpPosition = 5,

    /// Creates a pool and its two vaults.
    #[account(0,                   name = "plasma_program", desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",  desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",           desc = "The pool state account.")]
    #[account(3, signer, writable, name = "pool_creator",   desc = "Pays for and signs the creation of the vaults.")]
    #[account(4,                   name = "base_mint",      desc = "The base mint.")]
    #[account(5,                   name = "quote_mint",     desc = "The quote mint.")]
    #[account(6, writable,         name = "base_vault",     desc = "Base vault PDA, seeds are [b'vault', pool, base_mint].")]
    #[account(7, writable,         name = "quote_vault",    desc = "Quote vault PDA, seeds are [b'vault', pool, quote_mint].")]
    #[account(8,                   name = "system_program", desc = "The system program.")]
    #[account(9,                   name = "token_program",  desc = "The SPL token program.")]
    #[args(lp_fee_in_bps: u64, "Fee charged on swaps, in basis points.")]
    #[args(protocol_fee_allocation_in_pct: u64, "Percentage of the fee kept by the protocol.")]
    #[args(fee_recipients_params: [ProtocolFeeRecipientParams; 3], "Protocol fee recipients and their shares.")]
    #[args(num_slots_to_vest_lp_shares: Option<u64>, "Vesting window for newly minted LP shares.")]
    InitializePool = 6,

    /// Withdraws the protocol's share of the fees.
    #[account(0,                   name = "plasma_program",         desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",          desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",                   desc = "The pool state account.")]
    #[account(3, signer,           name = "protocol_fee_recipient", desc = "A registered protocol fee recipient.")]
    #[account(4, writable,         name = "quote_account",          desc = "The recipient's quote token account.")]
    #[account(5, writable,         name = "quote_vault",            desc = "Quote vault PDA, seeds are [b'vault', pool, quote_mint].")]
    #[account(6,                   name = "token_program",          desc = "The SPL token program.")]
    WithdrawProtocolFees = 7,

    // Only the program invokes this, to carry events in its instruction data.
    #[account(0, signer,           name = "log_authority", desc = "The log authority PDA.")]
    Log = 8,

    /// Moves all liquidity from the signer's LP position to another owner's.
    #[account(0,                   name = "plasma_program",  desc = "The Plasma program.")]
    #[account(1,                   name = "log_authority",   desc = "The log authority PDA.")]
    #[account(2, writable,         name = "pool",            desc = "The pool state account.")]
    #[account(3, signer, writable, name = "trader",          desc = "The current position owner.")]
    #[account(4, writable,         name = "src_lp_position", desc = "LP position PDA of the trader.")]
    #[account(5, writable,         name = "dst_lp_position", desc = "LP position PDA of the new owner.")]
    TransferLiquidity = 9,
}

// Discriminators are part of the wire contract.
const_assert_eq!(PlasmaInstruction::Swap as u8, 0);
const_assert_eq!(PlasmaInstruction::Log as u8, 8);
const_assert_eq!(PlasmaInstruction::TransferLiquidity as u8, 9);
