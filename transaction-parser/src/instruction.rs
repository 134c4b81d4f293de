//! Decodes a Plasma instruction back into its action, argument record and role-labelled accounts.

use instruction_macros_traits::{
    AccountRole,
    DecodingErrorKind,
    InstructionSet,
    ProgramInstructionData,
};
use plasma_interface::{
    events::PlasmaEvent,
    instructions::*,
    program,
};
use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

use crate::{
    error::ParseError,
    events::unpack_events,
};

/// The decoded argument record of each action. `Log` carries the events it logged instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedArgs {
    Swap(SwapInstructionData),
    AddLiquidity(AddLiquidityInstructionData),
    RemoveLiquidity(RemoveLiquidityInstructionData),
    RenounceLiquidity(RenounceLiquidityInstructionData),
    WithdrawLpFees(WithdrawLpFeesInstructionData),
    InitializeLpPosition(InitializeLpPositionInstructionData),
    InitializePool(InitializePoolInstructionData),
    WithdrawProtocolFees(WithdrawProtocolFeesInstructionData),
    Log(Vec<PlasmaEvent>),
    TransferLiquidity(TransferLiquidityInstructionData),
}

impl ParsedArgs {
    /// Splits off the discriminator and decodes the rest of `data` as that action's arguments.
    pub fn unpack(data: &[u8]) -> Result<(PlasmaInstruction, Self), ParseError> {
        let (action, rest) = PlasmaInstruction::split_tag(data).map_err(|e| match e.kind {
            DecodingErrorKind::UnknownDiscriminator(tag) => ParseError::UnknownDiscriminator(tag),
            _ => ParseError::MissingDiscriminator,
        })?;
        let err = |source| ParseError::Arguments { action, source };

        let args = match action {
            PlasmaInstruction::Swap => Self::Swap(SwapInstructionData::unpack(rest).map_err(err)?),
            PlasmaInstruction::AddLiquidity => {
                Self::AddLiquidity(AddLiquidityInstructionData::unpack(rest).map_err(err)?)
            }
            PlasmaInstruction::RemoveLiquidity => {
                Self::RemoveLiquidity(RemoveLiquidityInstructionData::unpack(rest).map_err(err)?)
            }
            PlasmaInstruction::RenounceLiquidity => Self::RenounceLiquidity(
                RenounceLiquidityInstructionData::unpack(rest).map_err(err)?,
            ),
            PlasmaInstruction::WithdrawLpFees => {
                Self::WithdrawLpFees(WithdrawLpFeesInstructionData::unpack(rest).map_err(err)?)
            }
            PlasmaInstruction::InitializeLpPosition => Self::InitializeLpPosition(
                InitializeLpPositionInstructionData::unpack(rest).map_err(err)?,
            ),
            PlasmaInstruction::InitializePool => {
                Self::InitializePool(InitializePoolInstructionData::unpack(rest).map_err(err)?)
            }
            PlasmaInstruction::WithdrawProtocolFees => Self::WithdrawProtocolFees(
                WithdrawProtocolFeesInstructionData::unpack(rest).map_err(err)?,
            ),
            PlasmaInstruction::Log => Self::Log(unpack_events(rest)?),
            PlasmaInstruction::TransferLiquidity => Self::TransferLiquidity(
                TransferLiquidityInstructionData::unpack(rest).map_err(err)?,
            ),
        };

        Ok((action, args))
    }
}

/// An account meta next to the template role it fills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelledAccount {
    pub role: AccountRole,
    pub meta: AccountMeta,
}

impl LabelledAccount {
    /// Whether the meta carries at least the flags the role asks for.
    pub fn satisfies_role(&self) -> bool {
        (self.meta.is_signer || !self.role.is_signer)
            && (self.meta.is_writable || !self.role.is_writable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedInstruction {
    pub action: PlasmaInstruction,
    pub args: ParsedArgs,
    pub accounts: Vec<LabelledAccount>,
    /// Accounts past the end of the action's template.
    pub remaining_accounts: Vec<AccountMeta>,
}

/// Parses an instruction sent to the canonical Plasma deployment.
pub fn parse_instruction(instruction: &Instruction) -> Result<ParsedInstruction, ParseError> {
    parse_instruction_for(&program::ID, instruction)
}

pub fn parse_instruction_for(
    program_id: &Address,
    instruction: &Instruction,
) -> Result<ParsedInstruction, ParseError> {
    if &instruction.program_id != program_id {
        return Err(ParseError::WrongProgram {
            expected: *program_id,
            found: instruction.program_id,
        });
    }

    let (action, args) = ParsedArgs::unpack(&instruction.data)?;
    let (accounts, remaining_accounts) = label_accounts(action, &instruction.accounts)?;

    Ok(ParsedInstruction {
        action,
        args,
        accounts,
        remaining_accounts,
    })
}

/// Pairs each meta with the role at its position in `action`'s template.
pub fn label_accounts(
    action: PlasmaInstruction,
    metas: &[AccountMeta],
) -> Result<(Vec<LabelledAccount>, Vec<AccountMeta>), ParseError> {
    let template = action.account_template();
    if metas.len() < template.len() {
        return Err(ParseError::TooFewAccounts {
            action,
            expected: template.len(),
            found: metas.len(),
        });
    }

    let (labelled, remaining) = metas.split_at(template.len());
    let labelled = template
        .iter()
        .zip(labelled)
        .map(|(role, meta)| LabelledAccount {
            role: *role,
            meta: meta.clone(),
        })
        .collect();

    Ok((labelled, remaining.to_vec()))
}

#[cfg(test)]
mod tests {
    use instruction_macros_traits::DecodingError;
    use plasma_interface::{
        builders::PoolContext,
        types::{
            Side,
            SwapType,
        },
    };

    use super::*;

    fn addr(b: u8) -> Address {
        Address::new_from_array([b; 32])
    }

    fn swap() -> Instruction {
        PoolContext::new(addr(1), addr(2), addr(3))
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
            .unwrap()
    }

    #[test]
    fn parses_a_built_swap() {
        let parsed = parse_instruction(&swap()).unwrap();
        assert_eq!(parsed.action, PlasmaInstruction::Swap);
        assert_eq!(
            parsed.args,
            ParsedArgs::Swap(SwapInstructionData::new(
                Side::Bid,
                SwapType::ExactIn {
                    amount_in: 100,
                    min_amount_out: 50,
                },
            ))
        );
        assert_eq!(parsed.accounts[3].role.name, "trader");
        assert_eq!(parsed.accounts[3].meta.pubkey, addr(10));
        assert!(parsed.accounts.iter().all(LabelledAccount::satisfies_role));
        assert!(parsed.remaining_accounts.is_empty());
    }

    #[test]
    fn extra_accounts_are_kept_aside() {
        let mut ix = swap();
        ix.accounts.push(AccountMeta::new_readonly(addr(99), false));
        let parsed = parse_instruction(&ix).unwrap();
        assert_eq!(parsed.accounts.len(), 9);
        assert_eq!(parsed.remaining_accounts, [AccountMeta::new_readonly(addr(99), false)]);
    }

    #[test]
    fn rejects_other_programs_and_short_account_lists() {
        let mut ix = swap();
        ix.program_id = addr(7);
        assert_eq!(
            parse_instruction(&ix).unwrap_err(),
            ParseError::WrongProgram {
                expected: program::ID,
                found: addr(7),
            }
        );
        assert!(parse_instruction_for(&addr(7), &ix).is_ok());

        let mut ix = swap();
        ix.accounts.truncate(8);
        assert_eq!(
            parse_instruction(&ix).unwrap_err(),
            ParseError::TooFewAccounts {
                action: PlasmaInstruction::Swap,
                expected: 9,
                found: 8,
            }
        );
    }

    #[test]
    fn bad_payloads_name_the_action() {
        assert_eq!(ParsedArgs::unpack(&[]).unwrap_err(), ParseError::MissingDiscriminator);
        assert_eq!(ParsedArgs::unpack(&[42]).unwrap_err(), ParseError::UnknownDiscriminator(42));

        let err = ParsedArgs::unpack(&[3, 2]).unwrap_err();
        assert_eq!(
            err,
            ParseError::Arguments {
                action: PlasmaInstruction::RenounceLiquidity,
                source: DecodingError::new(DecodingErrorKind::InvalidBool(2))
                    .within("allow_fee_withdrawal"),
            }
        );
        assert!(err.to_string().starts_with("couldn't decode RenounceLiquidity arguments"));

        // Argument-less actions take nothing after the tag.
        assert!(matches!(
            ParsedArgs::unpack(&[9, 0]).unwrap_err(),
            ParseError::Arguments {
                action: PlasmaInstruction::TransferLiquidity,
                ..
            }
        ));
    }
}
