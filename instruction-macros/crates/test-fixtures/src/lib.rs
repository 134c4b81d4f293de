//! A small fixture program exercising every shape `#[derive(ProgramInstruction)]` and
//! `#[derive(Layout)]` support: fixed records, tagged unions, bounded sequences, optional values and
//! non-contiguous discriminants.

mod program;

pub use program::*;
use solana_address::Address;

pub const ID: Address = Address::from_str_const("TESTnXwv2eHoftsSd5NEdpH4zEu7XRC8jviuoNPdB2Q");
