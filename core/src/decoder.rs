use crate::types::{Address, Opcode, Word};

/// Fields extracted from a fetched instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: Opcode,
    pub is_address_mode: bool,
    pub operand: Address,
}

/// Split a fetched word into opcode, addressing mode, and raw operand.
///
/// No validation happens here: an unrecognized opcode byte comes back as
/// `Opcode::Unknown` and is handled at execute time.
pub fn decode(word: Word) -> Decoded {
    let opcode = Opcode::from_bits(((word >> 24) & 0xFF) as u8);
    let is_address_mode = (word >> 23) & 1 == 1;
    let operand = word & 0x7FFFFF;
    Decoded {
        opcode,
        is_address_mode,
        operand,
    }
}
