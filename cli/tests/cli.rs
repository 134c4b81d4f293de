use clap::Parser;
use plasma_cli::{
    cli::{
        CliArgs,
        Command,
    },
    commands,
};
use plasma_interface::program;
use transaction_parser::{
    parse_instruction_for,
    ParsedArgs,
};

const POOL: &str = "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R";
const MINT: &str = "So11111111111111111111111111111111111111112";
const USER: &str = "11111111111111111111111111111111";

#[test]
fn encode_honors_the_program_id_flag() {
    let other = solana_address::Address::new_from_array([7; 32]).to_string();
    let args = CliArgs::try_parse_from([
        "plasma",
        "--program-id",
        &other,
        "encode",
        "--pool",
        POOL,
        "--base-mint",
        MINT,
        "--quote-mint",
        POOL,
        "initialize-pool",
        "--pool-creator",
        USER,
        "--lp-fee-in-bps",
        "30",
        "--protocol-fee-allocation-in-pct",
        "20",
        "--fee-recipient",
        &format!("{USER}:100"),
    ])
    .unwrap();
    let program_id = args.program_id();
    assert_ne!(program_id, program::ID);

    let Command::Encode(encode_args) = args.command else {
        panic!("expected encode");
    };
    let ix = commands::encode(program_id, encode_args).unwrap();
    let parsed = parse_instruction_for(&program_id, &ix).unwrap();
    let ParsedArgs::InitializePool(data) = parsed.args else {
        panic!("expected InitializePool");
    };
    assert_eq!(data.lp_fee_in_bps, 30);
    assert_eq!(data.fee_recipients_params[0].shares, 100);
    assert_eq!(data.num_slots_to_vest_lp_shares, None);
}

#[test]
fn transfer_liquidity_defaults_to_the_canonical_program() {
    let args = CliArgs::try_parse_from([
        "plasma",
        "encode",
        "--pool",
        POOL,
        "--base-mint",
        MINT,
        "--quote-mint",
        POOL,
        "transfer-liquidity",
        "--src",
        USER,
        "--dst",
        POOL,
    ])
    .unwrap();
    let program_id = args.program_id.unwrap_or(program::ID);
    let Command::Encode(encode_args) = args.command else {
        panic!("expected encode");
    };
    let ix = commands::encode(program_id, encode_args).unwrap();
    assert_eq!(ix.data, [9]);
    assert!(ix.accounts[3].is_signer && ix.accounts[3].is_writable);
}

#[test]
fn rejects_malformed_addresses() {
    let err = CliArgs::try_parse_from([
        "plasma",
        "decode",
        "--data",
        "00",
        "--account",
        "not-base58",
    ])
    .unwrap_err();
    assert!(err.to_string().contains("invalid value 'not-base58'"));
}
