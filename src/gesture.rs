//! Gesture vocabulary and the mapping from raw detection flags.
//!
//! The PAJ7620 reports detections as single bits across two registers:
//! flag0 carries the eight directional gestures, bit 0 of flag1 is wave.
//! [`Gesture`] values are those bits placed in a 16-bit word, flag1 in the
//! high byte.

use core::fmt;

/// A single recognised gesture.
///
/// Each variant is one bit of the combined `flag1 << 8 | flag0` word, so the
/// discriminant doubles as the raw detection value.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Nothing detected.
    #[default]
    None = 0x00,
    Right = 0x01,
    Left = 0x02,
    Up = 0x04,
    Down = 0x08,
    /// Hand moving towards the sensor.
    Forward = 0x10,
    /// Hand moving away from the sensor.
    Backward = 0x20,
    Clockwise = 0x40,
    AntiClockwise = 0x80,
    Wave = 0x100,
}

impl Gesture {
    /// Every gesture, in discriminant order.
    pub const ALL: [Gesture; 10] = [
        Gesture::None,
        Gesture::Right,
        Gesture::Left,
        Gesture::Up,
        Gesture::Down,
        Gesture::Forward,
        Gesture::Backward,
        Gesture::Clockwise,
        Gesture::AntiClockwise,
        Gesture::Wave,
    ];

    /// Raw detection value of this gesture.
    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// Look up the gesture whose detection value is exactly `bits`.
    ///
    /// Returns `None` (the `Option`, not [`Gesture::None`]) for combined or
    /// undefined values.
    pub fn from_bits(bits: u16) -> Option<Gesture> {
        Self::ALL.iter().copied().find(|g| g.bits() == bits)
    }

    /// Human-readable name, e.g. `"Anti-Clockwise"`.
    pub const fn name(self) -> &'static str {
        match self {
            Gesture::None => "None",
            Gesture::Right => "Right",
            Gesture::Left => "Left",
            Gesture::Up => "Up",
            Gesture::Down => "Down",
            Gesture::Forward => "Forward",
            Gesture::Backward => "Backward",
            Gesture::Clockwise => "Clockwise",
            Gesture::AntiClockwise => "Anti-Clockwise",
            Gesture::Wave => "Wave",
        }
    }

    /// `true` for gestures that need the extra depth settle delay.
    pub const fn is_depth(self) -> bool {
        matches!(self, Gesture::Forward | Gesture::Backward)
    }
}

impl From<Gesture> for u16 {
    fn from(gesture: Gesture) -> Self {
        gesture.bits()
    }
}

impl TryFrom<u16> for Gesture {
    type Error = u16;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Gesture::from_bits(bits).ok_or(bits)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Flag decoding
// ---------------------------------------------------------------------------

/// Outcome of decoding the flag0 register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Decoded {
    /// flag0 held zero or one bit.
    Single(Gesture),
    /// flag0 held several bits at once. Carries the raw byte.
    Ambiguous(u8),
}

/// First decoding stage: does flag1 signal a wave?
pub(crate) fn is_wave(flag1: u8) -> bool {
    (flag1 as u16) << 8 == Gesture::Wave.bits()
}

/// Second decoding stage: map flag0 to a directional gesture.
pub(crate) fn decode_flag0(flag0: u8) -> Decoded {
    match Gesture::from_bits(flag0 as u16) {
        Some(gesture) => Decoded::Single(gesture),
        None => Decoded::Ambiguous(flag0),
    }
}

/// Map a raw `(flag1, flag0)` register pair to a gesture.
///
/// Wave takes precedence and hides flag0 entirely. A flag0 byte with more
/// than one bit set does not name a gesture and decodes to
/// [`Gesture::None`].
pub fn decode_flags(flag1: u8, flag0: u8) -> Gesture {
    if is_wave(flag1) {
        return Gesture::Wave;
    }
    match decode_flag0(flag0) {
        Decoded::Single(gesture) => gesture,
        Decoded::Ambiguous(_) => Gesture::None,
    }
}

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

/// `true` iff `value` is exactly the detection value of `gesture`.
pub fn is_gesture(value: u16, gesture: Gesture) -> bool {
    value == gesture.bits()
}

/// Display name for any raw gesture value.
///
/// Known values render as their gesture name, anything else as
/// `Unknown <value>` in decimal.
pub fn gesture_name(value: u16) -> GestureName {
    GestureName(value)
}

/// Lazily formatted name returned by [`gesture_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureName(pub u16);

impl GestureName {
    /// The fixed name, if the value is a known gesture.
    pub fn known(&self) -> Option<&'static str> {
        Gesture::from_bits(self.0).map(Gesture::name)
    }
}

impl fmt::Display for GestureName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.known() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown {}", self.0),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for GestureName {
    fn format(&self, f: defmt::Formatter) {
        match self.known() {
            Some(name) => defmt::write!(f, "{=str}", name),
            None => defmt::write!(f, "Unknown {=u16}", self.0),
        }
    }
}
