//! Specification identifiers for GATT attributes.
//!
//! The Bluetooth SIG assigns every standardized attribute a 16-bit (or,
//! rarely, 32-bit) short identifier that expands into a full 128-bit UUID
//! over the Bluetooth base UUID. [`SpecId`] normalizes all of those forms
//! into the 128-bit representation so that equality and map lookups are
//! uniform regardless of how the caller spelled the identifier.

use core::fmt;

use uuid::Uuid;

/// The Bluetooth base UUID, `00000000-0000-1000-8000-00805f9b34fb`, as a
/// `u128`. Short 16/32-bit identifiers occupy the top 32 bits.
const SIG_BASE: u128 = 0x0000_0000_0000_1000_8000_0080_5f9b_34fb;

/// Mask covering everything except the short-identifier slot.
const SIG_BASE_MASK: u128 = !(0xFFFF_FFFFu128 << 96);

/// A normalized Bluetooth SIG specification identifier.
///
/// Internally this is always the full 128-bit UUID; equality, ordering and
/// hashing are defined on that form. Use [`SpecId::from_u16`] /
/// [`SpecId::from_u32`] for assigned short identifiers and
/// [`SpecId::parse`] for textual forms.
///
/// # Examples
///
/// ```
/// use btsig_types::SpecId;
///
/// let battery = SpecId::from_u16(0x2A19);
/// assert_eq!(SpecId::parse("2A19"), Some(battery));
/// assert_eq!(SpecId::parse("0x2a19"), Some(battery));
/// assert_eq!(SpecId::parse("00002a19-0000-1000-8000-00805f9b34fb"), Some(battery));
/// assert_eq!(battery.short(), Some(0x2A19));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecId(Uuid);

impl SpecId {
    /// Create an identifier from a SIG-assigned 16-bit short form.
    #[must_use]
    pub const fn from_u16(short: u16) -> Self {
        Self::from_u32(short as u32)
    }

    /// Create an identifier from a SIG-assigned 32-bit short form.
    #[must_use]
    pub const fn from_u32(short: u32) -> Self {
        Self(Uuid::from_u128(SIG_BASE | ((short as u128) << 96)))
    }

    /// Create an identifier from an arbitrary 128-bit UUID.
    ///
    /// Vendor-specific characteristics do not sit on the Bluetooth base
    /// UUID; this is the entry point for registering those.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The full 128-bit UUID backing this identifier.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Whether this identifier sits on the Bluetooth base UUID.
    #[must_use]
    pub fn is_sig_assigned(&self) -> bool {
        self.0.as_u128() & SIG_BASE_MASK == SIG_BASE
    }

    /// The 16-bit short form, if this is a SIG-assigned identifier that
    /// fits one.
    #[must_use]
    pub fn short(&self) -> Option<u16> {
        let long = self.long()?;
        u16::try_from(long).ok()
    }

    /// The 32-bit short form, if this is a SIG-assigned identifier.
    #[must_use]
    pub fn long(&self) -> Option<u32> {
        if self.is_sig_assigned() {
            Some((self.0.as_u128() >> 96) as u32)
        } else {
            None
        }
    }

    /// Parse an identifier from any accepted textual form.
    ///
    /// Accepted spellings:
    /// - 16-bit hex, with or without a `0x` prefix: `2A19`, `0x2a19`
    /// - 32-bit hex: `00002A19`, `0x00002A19`
    /// - full 128-bit UUID, with or without dashes
    ///
    /// Returns `None` when the string is none of these. Display-name
    /// resolution is a registry concern, not an identifier concern, so it
    /// does not happen here.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let stripped = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let compact: String = stripped.chars().filter(|c| *c != '-').collect();
        if compact.is_empty() || !compact.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match compact.len() {
            4 => u16::from_str_radix(&compact, 16).ok().map(Self::from_u16),
            8 => u32::from_str_radix(&compact, 16).ok().map(Self::from_u32),
            32 => u128::from_str_radix(&compact, 16)
                .ok()
                .map(|v| Self(Uuid::from_u128(v))),
            _ => None,
        }
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short() {
            Some(short) => write!(f, "0x{short:04X}"),
            None => match self.long() {
                Some(long) => write!(f, "0x{long:08X}"),
                None => write!(f, "{}", self.0),
            },
        }
    }
}

impl From<Uuid> for SpecId {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl From<SpecId> for Uuid {
    fn from(id: SpecId) -> Self {
        id.as_uuid()
    }
}
