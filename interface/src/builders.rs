//! Pool-level context for building Plasma instructions from contextual address data.

use instruction_macros_traits::CodecError;
use solana_address::Address;
use solana_instruction::Instruction;

use crate::{
    instructions::*,
    program,
    seeds::{
        find_log_authority,
        find_lp_position_address,
        find_vault_address,
    },
    system_program,
    token_program,
    types::{
        ProtocolFeeRecipientParams,
        Side,
        SwapType,
    },
};

/// A struct containing the addresses every instruction on one pool needs.
///
/// Implements helper methods for building all user-facing program instructions from those values;
/// PDAs are derived under [`PoolContext::program_id`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolContext {
    pub program_id: Address,
    pub pool: Address,
    pub base_mint: Address,
    pub quote_mint: Address,
    pub base_vault: Address,
    pub quote_vault: Address,
    pub log_authority: Address,
}

impl PoolContext {
    /// Creates a new [`PoolContext`] for the canonical Plasma deployment.
    pub fn new(pool: Address, base_mint: Address, quote_mint: Address) -> Self {
        Self::for_program(program::ID, pool, base_mint, quote_mint)
    }

    /// Creates a new [`PoolContext`] for a deployment of the program at `program_id`.
    pub fn for_program(
        program_id: Address,
        pool: Address,
        base_mint: Address,
        quote_mint: Address,
    ) -> Self {
        let (base_vault, _bump) = find_vault_address(&program_id, &pool, &base_mint);
        let (quote_vault, _bump) = find_vault_address(&program_id, &pool, &quote_mint);
        let (log_authority, _bump) = find_log_authority(&program_id);

        Self {
            program_id,
            pool,
            base_mint,
            quote_mint,
            base_vault,
            quote_vault,
            log_authority,
        }
    }

    pub fn get_lp_position(&self, owner: &Address) -> Address {
        find_lp_position_address(&self.program_id, &self.pool, owner).0
    }

    pub fn swap(
        &self,
        trader: Address,
        base_account: Address,
        quote_account: Address,
        side: Side,
        swap_type: SwapType,
    ) -> Result<Instruction, CodecError> {
        let accounts = SwapAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            trader,
            base_account,
            quote_account,
            base_vault: self.base_vault,
            quote_vault: self.quote_vault,
            token_program: token_program::ID,
        };
        let data = SwapInstructionData::new(side, swap_type);
        Ok(accounts.create_instruction_for(self.program_id, &data)?)
    }

    pub fn add_liquidity(
        &self,
        trader: Address,
        base_account: Address,
        quote_account: Address,
        desired_base_amount_in: u64,
        desired_quote_amount_in: u64,
        initial_lp_shares: Option<u64>,
    ) -> Result<Instruction, CodecError> {
        let accounts = AddLiquidityAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            trader,
            lp_position: self.get_lp_position(&trader),
            base_account,
            quote_account,
            base_vault: self.base_vault,
            quote_vault: self.quote_vault,
            token_program: token_program::ID,
        };
        let data = AddLiquidityInstructionData::new(
            desired_base_amount_in,
            desired_quote_amount_in,
            initial_lp_shares,
        );
        Ok(accounts.create_instruction_for(self.program_id, &data)?)
    }

    pub fn remove_liquidity(
        &self,
        trader: Address,
        base_account: Address,
        quote_account: Address,
        shares: u64,
    ) -> Result<Instruction, CodecError> {
        let accounts = RemoveLiquidityAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            trader,
            lp_position: self.get_lp_position(&trader),
            base_account,
            quote_account,
            base_vault: self.base_vault,
            quote_vault: self.quote_vault,
            token_program: token_program::ID,
        };
        let data = RemoveLiquidityInstructionData::new(shares);
        Ok(accounts.create_instruction_for(self.program_id, &data)?)
    }

    pub fn renounce_liquidity(
        &self,
        trader: Address,
        allow_fee_withdrawal: bool,
    ) -> Result<Instruction, CodecError> {
        let accounts = RenounceLiquidityAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            trader,
            lp_position: self.get_lp_position(&trader),
        };
        let data = RenounceLiquidityInstructionData::new(allow_fee_withdrawal);
        Ok(accounts.create_instruction_for(self.program_id, &data)?)
    }

    /// `trader` receives the fees accrued by `lp_position_owner`'s position.
    pub fn withdraw_lp_fees(
        &self,
        trader: Address,
        lp_position_owner: Address,
        quote_account: Address,
    ) -> Result<Instruction, CodecError> {
        let accounts = WithdrawLpFeesAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            trader,
            lp_position_owner,
            lp_position: self.get_lp_position(&lp_position_owner),
            quote_account,
            quote_vault: self.quote_vault,
            token_program: token_program::ID,
        };
        Ok(accounts.create_instruction_for(self.program_id, &WithdrawLpFeesInstructionData::new())?)
    }

    pub fn initialize_lp_position(
        &self,
        payer: Address,
        lp_position_owner: Address,
    ) -> Result<Instruction, CodecError> {
        let accounts = InitializeLpPositionAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            payer,
            lp_position_owner,
            lp_position: self.get_lp_position(&lp_position_owner),
            system_program: system_program::ID,
        };
        let data = InitializeLpPositionInstructionData::new();
        Ok(accounts.create_instruction_for(self.program_id, &data)?)
    }

    pub fn initialize_pool(
        &self,
        pool_creator: Address,
        lp_fee_in_bps: u64,
        protocol_fee_allocation_in_pct: u64,
        fee_recipients_params: [ProtocolFeeRecipientParams; 3],
        num_slots_to_vest_lp_shares: Option<u64>,
    ) -> Result<Instruction, CodecError> {
        let accounts = InitializePoolAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            pool_creator,
            base_mint: self.base_mint,
            quote_mint: self.quote_mint,
            base_vault: self.base_vault,
            quote_vault: self.quote_vault,
            system_program: system_program::ID,
            token_program: token_program::ID,
        };
        let data = InitializePoolInstructionData::new(
            lp_fee_in_bps,
            protocol_fee_allocation_in_pct,
            fee_recipients_params,
            num_slots_to_vest_lp_shares,
        );
        Ok(accounts.create_instruction_for(self.program_id, &data)?)
    }

    pub fn withdraw_protocol_fees(
        &self,
        protocol_fee_recipient: Address,
        quote_account: Address,
    ) -> Result<Instruction, CodecError> {
        let accounts = WithdrawProtocolFeesAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            protocol_fee_recipient,
            quote_account,
            quote_vault: self.quote_vault,
            token_program: token_program::ID,
        };
        let data = WithdrawProtocolFeesInstructionData::new();
        Ok(accounts.create_instruction_for(self.program_id, &data)?)
    }

    /// Moves `src`'s liquidity to `dst`'s LP position. `src` signs.
    pub fn transfer_liquidity(&self, src: Address, dst: Address) -> Result<Instruction, CodecError> {
        let accounts = TransferLiquidityAccounts {
            plasma_program: self.program_id,
            log_authority: self.log_authority,
            pool: self.pool,
            trader: src,
            src_lp_position: self.get_lp_position(&src),
            dst_lp_position: self.get_lp_position(&dst),
        };
        let data = TransferLiquidityInstructionData::new();
        Ok(accounts.create_instruction_for(self.program_id, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use instruction_macros_traits::{
        AccountBinding,
        AccountError,
        ProgramInstructionData,
    };
    use solana_instruction::AccountMeta;

    use super::*;

    fn addr(b: u8) -> Address {
        Address::new_from_array([b; 32])
    }

    fn ctx() -> PoolContext {
        PoolContext::new(addr(1), addr(2), addr(3))
    }

    #[test]
    fn swap_orders_accounts_like_the_template() {
        let ctx = ctx();
        let ix = ctx
            .swap(
                addr(10),
                addr(11),
                addr(12),
                Side::Bid,
                SwapType::ExactIn {
                    amount_in: 100,
                    min_amount_out: 50,
                },
            )
            .unwrap();

        assert_eq!(ix.program_id, program::ID);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new_readonly(program::ID, false),
                AccountMeta::new_readonly(ctx.log_authority, false),
                AccountMeta::new(ctx.pool, false),
                AccountMeta::new_readonly(addr(10), true),
                AccountMeta::new(addr(11), false),
                AccountMeta::new(addr(12), false),
                AccountMeta::new(ctx.base_vault, false),
                AccountMeta::new(ctx.quote_vault, false),
                AccountMeta::new_readonly(token_program::ID, false),
            ]
        );

        let mut expected = vec![0, 0, 0];
        expected.extend(100u64.to_le_bytes());
        expected.extend(50u64.to_le_bytes());
        assert_eq!(ix.data, expected);
    }

    #[test]
    fn swap_without_quote_vault_names_the_role() {
        let ctx = ctx();
        let binding = AccountBinding::new()
            .with("plasma_program", program::ID)
            .with("log_authority", ctx.log_authority)
            .with("pool", ctx.pool)
            .with("trader", addr(10))
            .with("base_account", addr(11))
            .with("quote_account", addr(12))
            .with("base_vault", ctx.base_vault)
            .with("token_program", token_program::ID);
        let data = SwapInstructionData::new(
            Side::Ask,
            SwapType::ExactOut {
                amount_out: 1,
                max_amount_in: 2,
            },
        );

        let err = data.build(&binding).unwrap_err();
        assert_eq!(
            err,
            CodecError::Account(AccountError::MissingAccount {
                role: "quote_vault".to_string()
            })
        );
        assert_eq!(err.to_string(), "missing account for role `quote_vault`");
    }

    #[test]
    fn role_binding_and_typed_accounts_agree() {
        let ctx = ctx();
        let ix = ctx.add_liquidity(addr(10), addr(11), addr(12), 5, 6, None).unwrap();
        let accounts = AddLiquidityAccounts::load_accounts(
            &ix.accounts.iter().map(|m| m.pubkey).collect::<Vec<_>>(),
        )
        .unwrap();
        assert_eq!(accounts.lp_position, ctx.get_lp_position(&addr(10)));

        let data = AddLiquidityInstructionData::unpack_with_tag(&ix.data).unwrap();
        assert_eq!(data.build(&accounts.to_binding()).unwrap(), ix);
        assert_eq!(ix.data.len(), 1 + 8 + 8 + 1);
    }

    #[test]
    fn remove_liquidity_packs_shares() {
        let ix = ctx().remove_liquidity(addr(10), addr(11), addr(12), 7).unwrap();
        assert_eq!(ix.data, [2, 7, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(ix.accounts.len(), 10);
    }

    #[test]
    fn initialize_pool_payload_layout() {
        let recipients = [
            ProtocolFeeRecipientParams::new(addr(20), 60),
            ProtocolFeeRecipientParams::new(addr(21), 40),
            ProtocolFeeRecipientParams::empty(),
        ];
        let ix = ctx().initialize_pool(addr(9), 30, 20, recipients, Some(150)).unwrap();

        // tag + two u64 + three 40 byte recipients + Some(u64)
        assert_eq!(ix.data.len(), 1 + 16 + 120 + 9);
        assert_eq!(ix.data[0], 6);
        assert_eq!(&ix.data[17..49], addr(20).as_ref());
        assert_eq!(ix.data[137], 1);
        assert_eq!(ix.accounts[3], AccountMeta::new(addr(9), true));
        assert_eq!(ix.accounts[8].pubkey, system_program::ID);
    }

    #[test]
    fn transfer_liquidity_signer_is_writable() {
        let ctx = ctx();
        let ix = ctx.transfer_liquidity(addr(10), addr(11)).unwrap();
        assert_eq!(ix.data, [9]);
        assert_eq!(ix.accounts[3], AccountMeta::new(addr(10), true));
        assert_eq!(ix.accounts[4].pubkey, ctx.get_lp_position(&addr(10)));
        assert_eq!(ix.accounts[5].pubkey, ctx.get_lp_position(&addr(11)));
    }

    #[test]
    fn fee_withdrawals_and_lp_positions() {
        let ctx = ctx();
        let ix = ctx.withdraw_lp_fees(addr(10), addr(11), addr(12)).unwrap();
        assert_eq!(ix.data, [4]);
        assert_eq!(ix.accounts[5].pubkey, ctx.get_lp_position(&addr(11)));

        let ix = ctx.withdraw_protocol_fees(addr(13), addr(12)).unwrap();
        assert_eq!(ix.data, [7]);
        assert_eq!(ix.accounts[3], AccountMeta::new_readonly(addr(13), true));

        let ix = ctx.initialize_lp_position(addr(14), addr(11)).unwrap();
        assert_eq!(ix.data, [5]);
        assert_eq!(ix.accounts[3], AccountMeta::new(addr(14), true));
        assert_eq!(ix.accounts[5].pubkey, ctx.get_lp_position(&addr(11)));

        let ix = ctx.renounce_liquidity(addr(10), true).unwrap();
        assert_eq!(ix.data, [3, 1]);
    }

    #[test]
    fn other_deployments_derive_their_own_pdas() {
        let other = PoolContext::for_program(addr(99), addr(1), addr(2), addr(3));
        assert_ne!(other.base_vault, ctx().base_vault);

        let ix = other.renounce_liquidity(addr(10), false).unwrap();
        assert_eq!(ix.program_id, addr(99));
        assert_eq!(ix.accounts[0].pubkey, addr(99));
    }
}
