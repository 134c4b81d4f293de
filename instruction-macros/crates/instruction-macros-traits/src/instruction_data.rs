//! Traits implemented by `#[derive(ProgramInstruction)]` for each instruction enum and its data
//! structs.

use solana_address::Address;
use solana_instruction::Instruction;

use crate::{
    accounts::{
        resolve,
        AccountBinding,
        AccountRole,
    },
    error::{
        CodecError,
        DecodingError,
        DecodingErrorKind,
        EncodingError,
        EncodingErrorKind,
    },
    layout::Layout,
    schema::LayoutKind,
};

/// The largest instruction payload a transaction can carry: the 1232 byte packet limit.
pub const MAX_INSTRUCTION_DATA_LEN: usize = 1232;

/// One action's argument record, tagged with the action's discriminator when packed.
pub trait ProgramInstructionData: Layout {
    const TAG: u8;
    const NAME: &'static str;
    const ACCOUNTS: &'static [AccountRole];
    const PROGRAM_ID: Address;

    /// Length of the packed payload, discriminator included.
    fn packed_len(&self) -> usize {
        1 + self.encoded_len()
    }

    /// Returns `[TAG] ++ encode(self)`.
    fn pack(&self) -> Result<Vec<u8>, EncodingError> {
        let mut data = Vec::new();
        self.pack_into(&mut data)?;
        Ok(data)
    }

    /// Packs into a reused buffer. On success `data` holds exactly the payload, whatever it held
    /// before. On failure `data` is left empty.
    fn pack_into(&self, data: &mut Vec<u8>) -> Result<(), EncodingError> {
        data.clear();
        let len = self.packed_len();
        if len > MAX_INSTRUCTION_DATA_LEN {
            return Err(EncodingErrorKind::SizeLimitExceeded {
                len,
                max: MAX_INSTRUCTION_DATA_LEN,
            }
            .into());
        }
        data.resize(len, 0);
        data[0] = Self::TAG;
        let res = self.encode_into(data, 1).and_then(|written| {
            match written + 1 == len {
                true => Ok(()),
                false => Err(EncodingErrorKind::LengthMismatch {
                    written: written + 1,
                    measured: len,
                }
                .into()),
            }
        });
        if res.is_err() {
            data.clear();
        }
        res
    }

    /// Decodes the argument record that follows an already-consumed discriminator.
    fn unpack(instruction_data: &[u8]) -> Result<Self, DecodingError> {
        Self::from_bytes(instruction_data)
    }

    /// Checks the discriminator, then decodes the rest of the payload.
    fn unpack_with_tag(data: &[u8]) -> Result<Self, DecodingError> {
        match data.split_first() {
            Some((&tag, rest)) if tag == Self::TAG => Self::unpack(rest),
            Some((&found, _)) => Err(DecodingErrorKind::DiscriminatorMismatch {
                expected: Self::TAG,
                found,
            }
            .into()),
            None => Err(DecodingErrorKind::Truncated {
                needed: 1,
                available: 0,
            }
            .into()),
        }
    }

    /// Resolves `binding` against [`Self::ACCOUNTS`] and packs `self` for [`Self::PROGRAM_ID`].
    fn build(&self, binding: &AccountBinding) -> Result<Instruction, CodecError> {
        self.build_for(binding, Self::PROGRAM_ID)
    }

    fn build_for(
        &self,
        binding: &AccountBinding,
        program_id: Address,
    ) -> Result<Instruction, CodecError> {
        let accounts = resolve(Self::ACCOUNTS, binding)?;
        Ok(Instruction {
            program_id,
            accounts,
            data: self.pack()?,
        })
    }
}

/// The instruction enum itself: the discriminator registry of a program.
pub trait InstructionSet: Sized + Copy + Eq + 'static {
    /// Every action, in declaration order.
    const ALL: &'static [Self];

    fn tag(self) -> u8;

    fn name(self) -> &'static str;

    fn account_template(self) -> &'static [AccountRole];

    /// The argument record layout, without the discriminator.
    fn describe_args(self) -> LayoutKind;

    fn from_tag(tag: u8) -> Result<Self, DecodingError>;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|action| action.name() == name)
    }

    /// Splits the discriminator off a payload and returns the action it names with the rest.
    fn split_tag(data: &[u8]) -> Result<(Self, &[u8]), DecodingError> {
        let (&tag, rest) = data.split_first().ok_or(DecodingErrorKind::Truncated {
            needed: 1,
            available: 0,
        })?;
        Ok((Self::from_tag(tag)?, rest))
    }
}
