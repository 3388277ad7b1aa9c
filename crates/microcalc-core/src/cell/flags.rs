//! Cell status bits

bitflags::bitflags! {
    /// Independent facts about a cell.
    ///
    /// The bits are not mutually exclusive: an edit sets exactly one of
    /// `TEXT` or `CONSTANT` (+ `FORMULA`), while `LOCKED`, `OVERWRITTEN` and
    /// `CALCULATED` are set and cleared on their own.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CellFlags: u8 {
        /// Contents were accepted as an expression; the value is meaningful.
        const CONSTANT = 1 << 0;
        /// The expression references other cells and is re-evaluated on recalculation.
        const FORMULA = 1 << 1;
        /// Contents are literal display text.
        const TEXT = 1 << 2;
        /// Continuation slot for overflowing text from a cell to the left.
        const OVERWRITTEN = 1 << 3;
        /// Reserved for the previous column's wide numeric display.
        const LOCKED = 1 << 4;
        /// Re-evaluated successfully by the last recalculation sweep.
        const CALCULATED = 1 << 5;
    }
}

impl CellFlags {
    /// Text without an accepted expression
    pub fn is_text(self) -> bool {
        self.contains(Self::TEXT) && !self.contains(Self::CONSTANT)
    }

    /// Cells the cursor may land on
    pub fn is_selectable(self) -> bool {
        !self.intersects(Self::LOCKED | Self::OVERWRITTEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_independent() {
        let flags = CellFlags::TEXT | CellFlags::LOCKED;
        assert!(flags.is_text());
        assert!(!flags.is_selectable());

        let flags = CellFlags::CONSTANT | CellFlags::FORMULA | CellFlags::CALCULATED;
        assert!(!flags.is_text());
        assert!(flags.is_selectable());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(CellFlags::default().is_empty());
        assert!(!CellFlags::default().is_text());
    }

    #[test]
    fn test_bit_values_are_stable() {
        assert_eq!(CellFlags::CONSTANT.bits(), 1);
        assert_eq!(CellFlags::FORMULA.bits(), 2);
        assert_eq!(CellFlags::TEXT.bits(), 4);
        assert_eq!(CellFlags::OVERWRITTEN.bits(), 8);
        assert_eq!(CellFlags::LOCKED.bits(), 16);
        assert_eq!(CellFlags::CALCULATED.bits(), 32);
    }
}
