use instruction_macros::{
    Layout,
    ProgramInstruction,
};
use solana_address::Address;

#[derive(Layout, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

#[derive(Layout, Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub owner: Address,
    #[layout(max_len = 16)]
    pub memo: String,
}

#[repr(u8)]
#[derive(ProgramInstruction, Clone, Copy, Debug, PartialEq, Eq)]
#[program_id(crate::ID)]
#[rustfmt::skip]
pub enum FixtureInstruction {
    #[account(0, signer,   name = "authority", desc = "Anyone; the program only checks the signature.")]
    Ping = 0,

    #[account(0, signer,   name = "owner",        desc = "The order owner.")]
    #[account(1, writable, name = "market",       desc = "The market account.")]
    #[account(2, writable, name = "baseVault",    desc = "The market's base token vault.")]
    #[account(3, writable, name = "quoteVault",   desc = "The market's quote token vault.")]
    #[account(4,           name = "tokenProgram", desc = "The token program.")]
    #[args(price: u64, "Limit price in quote atoms per base lot.")]
    #[args(size: u64, "Order size in base lots.")]
    #[args(side: Side, "Which book the order rests on.")]
    PlaceOrder = 3,

    #[account(0, signer,   name = "owner",  desc = "The order owner.")]
    #[account(1, writable, name = "market", desc = "The market account.")]
    #[args(order_ids: Vec<u64>, max_len = 8, "Orders to cancel.")]
    #[args(memo: Option<String>, max_len = 32, "An optional note echoed in the logs.")]
    CancelOrders = 4,

    #[account(0, signer, writable, name = "payer", desc = "Funds every transfer.")]
    #[args(recipients: Vec<Recipient>, max_len = 4, "Who gets paid.")]
    Distribute = 7,

    #[args(blob: Vec<u8>, "Opaque bytes, unbounded.")]
    Blob = 9,
}
