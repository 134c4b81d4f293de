//! Off-chain decoding of Plasma instructions and of the events the program logs through its `Log`
//! self-invocation.

pub mod error;
pub mod events;
pub mod instruction;

pub use error::ParseError;
pub use events::{
    pack_log_events,
    parse_log_events,
};
pub use instruction::{
    parse_instruction,
    parse_instruction_for,
    LabelledAccount,
    ParsedArgs,
    ParsedInstruction,
};
