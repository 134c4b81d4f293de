use instruction_macros_traits::DecodingError;
use plasma_interface::instructions::PlasmaInstruction;
use solana_address::Address;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("instruction targets {found:?}, not the Plasma program at {expected:?}")]
    WrongProgram { expected: Address, found: Address },
    #[error("instruction data is empty")]
    MissingDiscriminator,
    #[error("unknown instruction discriminator {0}")]
    UnknownDiscriminator(u8),
    #[error("{action} takes {expected} accounts but the instruction has {found}")]
    TooFewAccounts {
        action: PlasmaInstruction,
        expected: usize,
        found: usize,
    },
    #[error("couldn't decode {action} arguments: {source}")]
    Arguments {
        action: PlasmaInstruction,
        #[source]
        source: DecodingError,
    },
    #[error("expected a Log instruction but found {0}")]
    NotALog(PlasmaInstruction),
    #[error("couldn't decode logged event #{index}: {source}")]
    Event {
        index: usize,
        #[source]
        source: DecodingError,
    },
}
