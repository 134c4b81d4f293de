use std::str::FromStr;

use clap::{
    Args,
    Parser,
    Subcommand,
    ValueEnum,
};
use plasma_interface::{
    program,
    types::{
        Side,
        SwapType,
    },
};
use solana_address::Address;

#[derive(Parser, Debug)]
#[command(name = "plasma", about = "Encode and decode Plasma AMM instructions.")]
pub struct CliArgs {
    /// The program the instructions target.
    #[arg(long, global = true, env = "PLASMA_PROGRAM_ID")]
    pub program_id: Option<Address>,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    pub fn program_id(&self) -> Address {
        self.program_id.unwrap_or(program::ID)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every action's discriminator, account template and argument layout.
    Registry,
    /// Build an instruction and print its accounts and data.
    Encode(EncodeArgs),
    /// Decode instruction data, labelling accounts by role when given.
    Decode(DecodeArgs),
    /// Decode a pool or LP position account's data.
    DecodeAccount(DecodeAccountArgs),
}

#[derive(Args, Debug)]
pub struct PoolArgs {
    #[arg(long)]
    pub pool: Address,

    #[arg(long)]
    pub base_mint: Address,

    #[arg(long)]
    pub quote_mint: Address,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub pool: PoolArgs,

    #[command(subcommand)]
    pub action: EncodeAction,
}

#[derive(Subcommand, Debug)]
pub enum EncodeAction {
    Swap {
        #[arg(long)]
        trader: Address,
        #[arg(long)]
        base_account: Address,
        #[arg(long)]
        quote_account: Address,
        #[arg(long, value_enum)]
        side: SideArg,
        #[arg(long, value_enum, default_value_t = SwapMode::ExactIn)]
        mode: SwapMode,
        /// The exact side of the swap: the amount in for `exact-in`, out for `exact-out`.
        #[arg(long)]
        amount: u64,
        /// The slippage bound: minimum out for `exact-in`, maximum in for `exact-out`.
        #[arg(long)]
        limit: u64,
    },
    AddLiquidity {
        #[arg(long)]
        trader: Address,
        #[arg(long)]
        base_account: Address,
        #[arg(long)]
        quote_account: Address,
        #[arg(long)]
        base_amount: u64,
        #[arg(long)]
        quote_amount: u64,
        #[arg(long)]
        initial_lp_shares: Option<u64>,
    },
    RemoveLiquidity {
        #[arg(long)]
        trader: Address,
        #[arg(long)]
        base_account: Address,
        #[arg(long)]
        quote_account: Address,
        #[arg(long)]
        shares: u64,
    },
    RenounceLiquidity {
        #[arg(long)]
        trader: Address,
        #[arg(long)]
        allow_fee_withdrawal: bool,
    },
    WithdrawLpFees {
        #[arg(long)]
        trader: Address,
        /// Defaults to the trader.
        #[arg(long)]
        lp_position_owner: Option<Address>,
        #[arg(long)]
        quote_account: Address,
    },
    InitializeLpPosition {
        #[arg(long)]
        payer: Address,
        /// Defaults to the payer.
        #[arg(long)]
        lp_position_owner: Option<Address>,
    },
    InitializePool {
        #[arg(long)]
        pool_creator: Address,
        #[arg(long)]
        lp_fee_in_bps: u64,
        #[arg(long)]
        protocol_fee_allocation_in_pct: u64,
        /// Up to three `<address>:<shares>` pairs. Unused slots are zeroed.
        #[arg(long = "fee-recipient", value_parser = parse_fee_recipient)]
        fee_recipients: Vec<(Address, u64)>,
        #[arg(long)]
        num_slots_to_vest_lp_shares: Option<u64>,
    },
    WithdrawProtocolFees {
        #[arg(long)]
        protocol_fee_recipient: Address,
        #[arg(long)]
        quote_account: Address,
    },
    TransferLiquidity {
        #[arg(long)]
        src: Address,
        #[arg(long)]
        dst: Address,
    },
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded instruction data, discriminator included.
    #[arg(long)]
    pub data: String,

    /// Account addresses in instruction order.
    #[arg(long = "account")]
    pub accounts: Vec<Address>,
}

#[derive(Args, Debug)]
pub struct DecodeAccountArgs {
    #[arg(long, value_enum)]
    pub kind: AccountKind,

    /// Hex-encoded account data.
    #[arg(long)]
    pub data: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AccountKind {
    Pool,
    LpPosition,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SideArg {
    Bid,
    Ask,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Bid => Side::Bid,
            SideArg::Ask => Side::Ask,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SwapMode {
    ExactIn,
    ExactOut,
}

impl SwapMode {
    pub fn swap_type(self, amount: u64, limit: u64) -> SwapType {
        match self {
            SwapMode::ExactIn => SwapType::ExactIn {
                amount_in: amount,
                min_amount_out: limit,
            },
            SwapMode::ExactOut => SwapType::ExactOut {
                amount_out: amount,
                max_amount_in: limit,
            },
        }
    }
}

fn parse_fee_recipient(s: &str) -> Result<(Address, u64), String> {
    let (address, shares) = s
        .split_once(':')
        .ok_or_else(|| "expected `<address>:<shares>`".to_string())?;
    let address = Address::from_str(address).map_err(|e| format!("invalid address `{address}`: {e}"))?;
    let shares = shares
        .parse()
        .map_err(|e| format!("invalid shares `{shares}`: {e}"))?;
    Ok((address, shares))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn addresses_parse_as_base58() {
        let args = CliArgs::try_parse_from([
            "plasma",
            "--program-id",
            "srAMMzfVHVAtgSJc8iH6CfKzuWuUTzLHVCE81QU1rgi",
            "registry",
        ])
        .unwrap();
        assert_eq!(args.program_id(), program::ID);
        assert_eq!(program::ID.to_string(), "srAMMzfVHVAtgSJc8iH6CfKzuWuUTzLHVCE81QU1rgi");

        for bad in ["11111111", "0OIl"] {
            assert!(CliArgs::try_parse_from(["plasma", "--program-id", bad, "registry"]).is_err());
        }
    }

    #[test]
    fn fee_recipients_parse() {
        let (address, shares) = parse_fee_recipient("11111111111111111111111111111111:25").unwrap();
        assert_eq!(address, Address::new_from_array([0; 32]));
        assert_eq!(shares, 25);
        assert!(parse_fee_recipient("11111111111111111111111111111111").is_err());
        assert!(parse_fee_recipient("not-an-address:5").is_err());
    }

    #[test]
    fn parses_an_encode_command() {
        let args = CliArgs::try_parse_from([
            "plasma",
            "encode",
            "--pool",
            "11111111111111111111111111111111",
            "--base-mint",
            "11111111111111111111111111111111",
            "--quote-mint",
            "11111111111111111111111111111111",
            "remove-liquidity",
            "--trader",
            "11111111111111111111111111111111",
            "--base-account",
            "11111111111111111111111111111111",
            "--quote-account",
            "11111111111111111111111111111111",
            "--shares",
            "100",
        ])
        .unwrap();
        let Command::Encode(EncodeArgs { action, .. }) = args.command else {
            panic!("expected encode");
        };
        assert!(matches!(action, EncodeAction::RemoveLiquidity { shares: 100, .. }));
    }
}
