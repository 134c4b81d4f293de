//! Instruction schemas, account templates, PDA helpers, event records and account data layouts for
//! the Plasma AMM program, plus builders that assemble ready-to-send instructions from them.

pub mod builders;
pub mod events;
pub mod instructions;
pub mod seeds;
pub mod state;
pub mod types;

pub use instruction_macros_traits::{
    CodecError,
    InstructionSet,
    Layout,
    ProgramInstructionData,
};

pub mod program {
    use solana_address::Address;

    pub const ID: Address = Address::from_str_const("srAMMzfVHVAtgSJc8iH6CfKzuWuUTzLHVCE81QU1rgi");
}

pub mod token_program {
    use solana_address::Address;

    pub const ID: Address = Address::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
}

pub mod system_program {
    use solana_address::Address;

    pub const ID: Address = Address::new_from_array([0; 32]);
}
