//! Unpacks the events carried in a `Log` instruction's data.
//!
//! The data is the `Log` discriminator followed by any number of encoded [`PlasmaEvent`]s back to
//! back, with nothing after the last one.

use instruction_macros_traits::{
    EncodingError,
    InstructionSet,
    Layout,
};
use plasma_interface::{
    events::PlasmaEvent,
    instructions::PlasmaInstruction,
};

use crate::{
    error::ParseError,
    instruction::ParsedArgs,
};

/// Unpacks the events from a full `Log` instruction payload, discriminator included.
pub fn parse_log_events(data: &[u8]) -> Result<Vec<PlasmaEvent>, ParseError> {
    match ParsedArgs::unpack(data)? {
        (_, ParsedArgs::Log(events)) => Ok(events),
        (action, _) => Err(ParseError::NotALog(action)),
    }
}

/// Unpacks events from instruction data that starts *after* the `Log` tag.
pub(crate) fn unpack_events(mut data: &[u8]) -> Result<Vec<PlasmaEvent>, ParseError> {
    let mut events = vec![];
    while !data.is_empty() {
        let (event, read) = PlasmaEvent::decode_from(data, 0).map_err(|source| {
            ParseError::Event {
                index: events.len(),
                source,
            }
        })?;
        events.push(event);
        data = &data[read..];
    }
    Ok(events)
}

/// Encodes events the way the program logs them. Mostly useful to build fixtures.
pub fn pack_log_events(events: &[PlasmaEvent]) -> Result<Vec<u8>, EncodingError> {
    let mut data = vec![PlasmaInstruction::Log.tag()];
    for (i, event) in events.iter().enumerate() {
        data.extend(event.to_bytes().map_err(|e| e.within_index(i))?);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use plasma_interface::events::{
        PlasmaEventHeader,
        TransferLiquidityEvent,
        WithdrawLpFeesEvent,
    };
    use solana_address::Address;

    use super::*;

    fn header(sequence_number: u64) -> PlasmaEventHeader {
        PlasmaEventHeader {
            sequence_number,
            slot: 10,
            timestamp: 1_700_000_000,
            pool: Address::new_from_array([1; 32]),
            signer: Address::new_from_array([2; 32]),
            base_decimals: 9,
            quote_decimals: 6,
        }
    }

    fn events() -> Vec<PlasmaEvent> {
        vec![
            PlasmaEvent::from((header(0), WithdrawLpFeesEvent { fees_withdrawn: 5 })),
            PlasmaEvent::from((
                header(1),
                TransferLiquidityEvent {
                    src: Address::new_from_array([3; 32]),
                    dst: Address::new_from_array([4; 32]),
                    lp_shares_transferred: 1_000,
                },
            )),
        ]
    }

    #[test]
    fn unpacks_back_to_back_events() {
        let data = pack_log_events(&events()).unwrap();
        assert_eq!(data[0], 8);
        assert_eq!(parse_log_events(&data).unwrap(), events());
        assert_eq!(parse_log_events(&[8]).unwrap(), vec![]);
    }

    #[test]
    fn truncated_event_is_reported_by_index() {
        let data = pack_log_events(&events()).unwrap();
        let err = parse_log_events(&data[..data.len() - 3]).unwrap_err();
        assert!(matches!(err, ParseError::Event { index: 1, .. }));
    }

    #[test]
    fn other_actions_are_not_logs() {
        assert_eq!(
            parse_log_events(&[9]).unwrap_err(),
            ParseError::NotALog(PlasmaInstruction::TransferLiquidity)
        );
    }
}
