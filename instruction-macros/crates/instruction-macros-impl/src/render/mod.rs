//! Renders the parsed models into generated types, trait impls and conversions.

mod field_statements;
mod instruction_accounts;
mod instruction_data;
mod layout;
mod registry;
mod try_from_u8;

pub use instruction_accounts::render as render_instruction_accounts;
pub use instruction_data::render as render_instruction_data;
pub use layout::render as render_layout;
pub use registry::render as render_registry;
pub use try_from_u8::render as render_try_from_u8;
