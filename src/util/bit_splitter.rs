/// A structure for easily splitting an opcode into the operand
/// fields the instruction families use: four nibbles, `x`, `y`,
/// `n`, `kk` and `nnn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {
    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component
    /// in order to store the components in a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.x(), self.y(), self.n())
    }

    /// Bits 8-11.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// Bits 4-7.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    /// Bits 0-3.
    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    /// Bits 0-7.
    pub fn kk(&self) -> u8 {
        self.1
    }

    /// Bits 0-11.
    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}

impl From<u16> for BitSplitter {
    fn from(value: u16) -> Self {
        BitSplitter::from_u16(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nibbles_are_most_significant_first() {
        assert_eq!((0xA, 0xB, 0xC, 0xD), BitSplitter::from_u16(0xABCD).as_four_u8());
        assert_eq!((0x0, 0x0, 0xE, 0x0), BitSplitter::from_u16(0x00E0).as_four_u8());
    }

    #[test]
    fn operand_fields() {
        let opcode = BitSplitter::from_u16(0xD4A7);
        assert_eq!(opcode.x(), 0x4);
        assert_eq!(opcode.y(), 0xA);
        assert_eq!(opcode.n(), 0x7);
        assert_eq!(opcode.kk(), 0xA7);
        assert_eq!(opcode.nnn(), 0x4A7);
    }

    #[test]
    fn new_equals_from_u16() {
        assert_eq!(BitSplitter::new(0x12, 0x34), BitSplitter::from_u16(0x1234));
        assert_eq!(BitSplitter::new(0x12, 0x34).as_u16(), 0x1234);
        assert_eq!(BitSplitter::from(0xFFFF).as_u16(), 0xFFFF);
    }
}
