//! Runtime support for `instruction-macros`: the binary layout library, the account resolver and
//! the traits generated code implements.
//!
//! Generated code only refers to items through `::instruction_macros_traits::...`, so crates that
//! derive `ProgramInstruction` or `Layout` need this crate as a direct dependency.

pub mod accounts;
pub mod error;
pub mod instruction_data;
pub mod layout;
pub mod primitives;
pub mod schema;

pub use accounts::*;
pub use error::*;
pub use instruction_data::*;
pub use layout::*;
pub use schema::*;
pub use solana_address::Address;
pub use solana_instruction::{
    AccountMeta,
    Instruction,
};
