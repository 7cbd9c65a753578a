//! Physical buttons

/// Number of buttons on the clock
pub const BUTTON_COUNT: usize = 3;

/// Clock buttons, in input channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Reset,
    Player1,
    Player2,
}

impl Button {
    /// All buttons in channel order
    pub const ALL: [Button; BUTTON_COUNT] = [Button::Reset, Button::Player1, Button::Player2];

    /// Button for an input channel index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Input channel index of this button
    pub const fn index(self) -> usize {
        match self {
            Button::Reset => 0,
            Button::Player1 => 1,
            Button::Player2 => 2,
        }
    }
}
