//! The `registry`, `encode` and `decode` subcommands.

use anyhow::{
    bail,
    Context,
};
use colored::Colorize;
use instruction_macros_traits::{
    AccountRole,
    InstructionSet,
    LayoutKind,
};
use itertools::Itertools;
use plasma_interface::{
    builders::PoolContext,
    instructions::PlasmaInstruction,
    state::{
        LpPosition,
        Pool,
    },
    types::ProtocolFeeRecipientParams,
};
use solana_address::Address;
use solana_instruction::Instruction;
use transaction_parser::{
    instruction::label_accounts,
    ParsedArgs,
};

use crate::{
    cli::{
        AccountKind,
        CliArgs,
        Command,
        DecodeAccountArgs,
        DecodeArgs,
        EncodeAction,
        EncodeArgs,
    },
    logs::{
        log_divider,
        LogColor,
    },
    print_kv,
};

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let program_id = args.program_id();
    match args.command {
        Command::Registry => print_registry(),
        Command::Encode(encode_args) => {
            let instruction = encode(program_id, encode_args)?;
            print_instruction(&instruction)?;
        }
        Command::Decode(decode_args) => decode(program_id, decode_args)?,
        Command::DecodeAccount(account_args) => decode_account(account_args)?,
    }
    Ok(())
}

fn fmt_flags(role: &AccountRole) -> String {
    [(role.is_signer, "signer"), (role.is_writable, "writable")]
        .into_iter()
        .filter_map(|(set, flag)| set.then_some(flag))
        .join(", ")
}

fn fmt_fields(layout: &LayoutKind) -> String {
    match layout {
        LayoutKind::Record { fields, .. } if !fields.is_empty() => fields
            .iter()
            .map(|field| format!("{}: {}", field.name, field.layout))
            .join(", "),
        _ => "none".into(),
    }
}

pub fn print_registry() {
    for action in PlasmaInstruction::ALL {
        log_divider();
        print_kv!(action.tag(), action.name(), LogColor::Action, LogColor::Name);
        print_kv!("args", fmt_fields(&action.describe_args()));
        for (i, role) in action.account_template().iter().enumerate() {
            print_kv!(
                format!("  {i:>2} {}", role.name),
                format!("[{}] {}", fmt_flags(role), role.desc),
                LogColor::Account,
            );
        }
    }
    log_divider();
}

/// Builds the instruction an `encode` invocation describes.
pub fn encode(program_id: Address, args: EncodeArgs) -> anyhow::Result<Instruction> {
    let EncodeArgs { pool, action } = args;
    let ctx = PoolContext::for_program(program_id, pool.pool, pool.base_mint, pool.quote_mint);

    let instruction = match action {
        EncodeAction::Swap {
            trader,
            base_account,
            quote_account,
            side,
            mode,
            amount,
            limit,
        } => ctx.swap(
            trader,
            base_account,
            quote_account,
            side.into(),
            mode.swap_type(amount, limit),
        ),
        EncodeAction::AddLiquidity {
            trader,
            base_account,
            quote_account,
            base_amount,
            quote_amount,
            initial_lp_shares,
        } => ctx.add_liquidity(
            trader,
            base_account,
            quote_account,
            base_amount,
            quote_amount,
            initial_lp_shares,
        ),
        EncodeAction::RemoveLiquidity {
            trader,
            base_account,
            quote_account,
            shares,
        } => ctx.remove_liquidity(trader, base_account, quote_account, shares),
        EncodeAction::RenounceLiquidity {
            trader,
            allow_fee_withdrawal,
        } => ctx.renounce_liquidity(trader, allow_fee_withdrawal),
        EncodeAction::WithdrawLpFees {
            trader,
            lp_position_owner,
            quote_account,
        } => ctx.withdraw_lp_fees(trader, lp_position_owner.unwrap_or(trader), quote_account),
        EncodeAction::InitializeLpPosition {
            payer,
            lp_position_owner,
        } => ctx.initialize_lp_position(payer, lp_position_owner.unwrap_or(payer)),
        EncodeAction::InitializePool {
            pool_creator,
            lp_fee_in_bps,
            protocol_fee_allocation_in_pct,
            fee_recipients,
            num_slots_to_vest_lp_shares,
        } => ctx.initialize_pool(
            pool_creator,
            lp_fee_in_bps,
            protocol_fee_allocation_in_pct,
            fee_recipient_slots(&fee_recipients)?,
            num_slots_to_vest_lp_shares,
        ),
        EncodeAction::WithdrawProtocolFees {
            protocol_fee_recipient,
            quote_account,
        } => ctx.withdraw_protocol_fees(protocol_fee_recipient, quote_account),
        EncodeAction::TransferLiquidity { src, dst } => ctx.transfer_liquidity(src, dst),
    };

    instruction.context("Failed to build the instruction")
}

fn fee_recipient_slots(
    recipients: &[(Address, u64)],
) -> anyhow::Result<[ProtocolFeeRecipientParams; 3]> {
    if recipients.len() > 3 {
        bail!("At most 3 fee recipients, got {}", recipients.len());
    }
    let mut slots = [ProtocolFeeRecipientParams::empty(); 3];
    for (slot, (recipient, shares)) in slots.iter_mut().zip(recipients) {
        *slot = ProtocolFeeRecipientParams::new(*recipient, *shares);
    }
    Ok(slots)
}

pub fn print_instruction(instruction: &Instruction) -> anyhow::Result<()> {
    let (action, _) = ParsedArgs::unpack(&instruction.data)?;
    let template = action.account_template();

    print_kv!("action", action, LogColor::Action, LogColor::Name);
    print_kv!("program", instruction.program_id);
    for (role, meta) in template.iter().zip(&instruction.accounts) {
        print_kv!(
            format!("  {}", role.name),
            format!("{} [{}]", meta.pubkey, fmt_flags(role)),
            LogColor::Account,
        );
    }
    print_kv!("data (hex)", hex::encode(&instruction.data), LogColor::Key, LogColor::Bytes);
    print_kv!(
        "data (base58)",
        bs58::encode(&instruction.data).into_string(),
        LogColor::Key,
        LogColor::Bytes,
    );
    print_kv!("length", instruction.data.len());
    Ok(())
}

pub fn decode(program_id: Address, args: DecodeArgs) -> anyhow::Result<()> {
    let data = decode_hex(&args.data)?;
    let (action, parsed) = ParsedArgs::unpack(&data).context("Failed to decode the instruction")?;

    print_kv!("action", action, LogColor::Action, LogColor::Name);
    print_kv!("program", program_id);
    println!("{parsed:#?}");

    if args.accounts.is_empty() {
        return Ok(());
    }

    let metas = action
        .account_template()
        .iter()
        .zip(&args.accounts)
        .map(|(role, address)| role.meta(*address))
        .chain(
            args.accounts
                .iter()
                .skip(action.account_template().len())
                .map(|address| solana_instruction::AccountMeta::new_readonly(*address, false)),
        )
        .collect::<Vec<_>>();
    let (labelled, remaining) = label_accounts(action, &metas)?;

    for account in labelled {
        print_kv!(
            format!("  {}", account.role.name),
            account.meta.pubkey,
            LogColor::Account,
        );
    }
    for meta in remaining {
        print_kv!(
            "  (extra)",
            meta.pubkey,
            LogColor::Extra,
        );
    }
    Ok(())
}

fn decode_hex(data: &str) -> anyhow::Result<Vec<u8>> {
    hex::decode(data.trim_start_matches("0x")).context("Data must be hex")
}

pub fn decode_account(args: DecodeAccountArgs) -> anyhow::Result<()> {
    let data = decode_hex(&args.data)?;
    print_kv!("kind", format!("{:?}", args.kind), LogColor::Action, LogColor::Name);
    print_kv!("length", data.len());
    match args.kind {
        AccountKind::Pool => {
            let pool = Pool::from_account_data(&data).context("Failed to decode the pool")?;
            println!("{:#?}", pool.header);
            print_kv!("amm state (hex)", hex::encode(pool.amm), LogColor::Key, LogColor::Bytes);
        }
        AccountKind::LpPosition => {
            let position =
                LpPosition::from_account_data(&data).context("Failed to decode the LP position")?;
            println!("{position:#?}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use plasma_interface::program;

    use super::*;
    use crate::cli::{
        PoolArgs,
        SideArg,
        SwapMode,
    };

    fn addr(b: u8) -> Address {
        Address::new_from_array([b; 32])
    }

    fn pool_args() -> PoolArgs {
        PoolArgs {
            pool: addr(1),
            base_mint: addr(2),
            quote_mint: addr(3),
        }
    }

    #[test]
    fn encodes_a_swap() {
        let ix = encode(
            program::ID,
            EncodeArgs {
                pool: pool_args(),
                action: EncodeAction::Swap {
                    trader: addr(10),
                    base_account: addr(11),
                    quote_account: addr(12),
                    side: SideArg::Ask,
                    mode: SwapMode::ExactOut,
                    amount: 5,
                    limit: 6,
                },
            },
        )
        .unwrap();
        assert_eq!(&ix.data[..3], &[0, 1, 1]);
        assert_eq!(ix.accounts.len(), 9);
        print_instruction(&ix).unwrap();
    }

    #[test]
    fn too_many_fee_recipients_is_an_error() {
        let err = fee_recipient_slots(&[(addr(1), 1); 4]).unwrap_err();
        assert!(err.to_string().contains("At most 3"));

        let slots = fee_recipient_slots(&[(addr(1), 60)]).unwrap();
        assert_eq!(slots[0], ProtocolFeeRecipientParams::new(addr(1), 60));
        assert_eq!(slots[2], ProtocolFeeRecipientParams::empty());
    }

    #[test]
    fn decodes_account_data_by_kind() {
        let position = LpPosition {
            lp_shares: 5,
            ..Default::default()
        };
        let data = hex::encode(plasma_interface::Layout::to_bytes(&position).unwrap());

        decode_account(DecodeAccountArgs {
            kind: AccountKind::LpPosition,
            data: data.clone(),
        })
        .unwrap();
        let err = decode_account(DecodeAccountArgs {
            kind: AccountKind::Pool,
            data,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("`Pool` data must be 624 bytes, got 64"));
    }

    #[test]
    fn decodes_hex_and_rejects_short_account_lists() {
        let args = DecodeArgs {
            data: "0x0264000000000000000".into(),
            accounts: vec![],
        };
        assert!(decode(program::ID, args).is_err());

        let args = DecodeArgs {
            data: "026400000000000000".into(),
            accounts: vec![],
        };
        decode(program::ID, args).unwrap();

        let args = DecodeArgs {
            data: "026400000000000000".into(),
            accounts: vec![addr(1), addr(2)],
        };
        assert!(decode(program::ID, args).is_err());
    }
}
