//! The four anchor points a clock can be pinned to.

/// A corner of a monitor's rectangle.
///
/// The discriminants double as the persisted byte code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Corner {
    BottomLeft = 0,
    #[default]
    BottomRight = 1,
    TopLeft = 2,
    TopRight = 3,
}

impl Corner {
    /// All corners in menu order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// True for corners on the left edge of the monitor.
    pub fn is_left(self) -> bool {
        matches!(self, Self::BottomLeft | Self::TopLeft)
    }

    /// True for corners on the right edge of the monitor.
    pub fn is_right(self) -> bool {
        !self.is_left()
    }

    /// True for corners on the top edge of the monitor.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    /// Human-readable name used by the tray menu.
    pub fn label(self) -> &'static str {
        match self {
            Self::BottomLeft => "Bottom Left",
            Self::BottomRight => "Bottom Right",
            Self::TopLeft => "Top Left",
            Self::TopRight => "Top Right",
        }
    }

    /// Byte code stored in the settings record.
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Decodes a stored byte. Only the low two bits are significant, so
    /// every byte maps to some corner.
    pub fn from_byte(byte: u8) -> Self {
        match byte & 0b11 {
            0 => Self::BottomLeft,
            1 => Self::BottomRight,
            2 => Self::TopLeft,
            _ => Self::TopRight,
        }
    }
}
