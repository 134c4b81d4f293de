//! Seeds and address derivation for the program's PDAs.

use solana_address::Address;

pub const VAULT_SEED: &[u8] = b"vault";
pub const LP_POSITION_SEED: &[u8] = b"lp_position";
pub const LOG_AUTHORITY_SEED: &[u8] = b"log";

/// The token vault a pool holds `mint` in.
pub fn find_vault_address(program_id: &Address, pool: &Address, mint: &Address) -> (Address, u8) {
    Address::find_program_address(&[VAULT_SEED, pool.as_ref(), mint.as_ref()], program_id)
}

/// The liquidity position `owner` holds in `pool`.
pub fn find_lp_position_address(
    program_id: &Address,
    pool: &Address,
    owner: &Address,
) -> (Address, u8) {
    Address::find_program_address(&[LP_POSITION_SEED, pool.as_ref(), owner.as_ref()], program_id)
}

/// The PDA that signs the program's `Log` self-invocations.
pub fn find_log_authority(program_id: &Address) -> (Address, u8) {
    Address::find_program_address(&[LOG_AUTHORITY_SEED], program_id)
}
