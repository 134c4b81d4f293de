//! Parses derive inputs and their helper attributes into validated in-memory models.

pub mod case;
pub mod error_type;
pub mod instruction_account;
pub mod instruction_argument;
pub mod instruction_variant;
pub mod layout_input;
pub mod parsed_enum;
pub mod program_id;
pub mod require_repr_u8;
