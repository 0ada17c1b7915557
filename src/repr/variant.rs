use cfg_if::cfg_if;
use static_assertions::{const_assert, const_assert_eq};

/// Low bits of the flags byte that carry the variant tag.
pub(crate) const TAG_MASK: u8 = 0b0000_0111;
/// Number of tag bits; [`Variant::Tiny`] packs its length into the other five.
pub(crate) const TAG_BITS: u8 = 3;

const TAG_TINY: u8 = 0;
const TAG_SMALL: u8 = 1;
const TAG_MEDIUM: u8 = 2;
const TAG_LARGE: u8 = 3;
const TAG_HUGE: u8 = 4;

/// Largest payload length the Tiny encoding can pack into its flags byte.
pub(crate) const TINY_MAX: usize = (1 << (8 - TAG_BITS)) - 1;

const_assert_eq!(TINY_MAX, 31);
const_assert!(TAG_HUGE <= TAG_MASK);

/// One of the five header encodings a string block can use.
///
/// Every encoding ends with a flags byte immediately before the payload. The
/// non-Tiny variants prefix it with a length field and a capacity field of
/// equal width, stored packed (no padding) in native endianness:
///
/// ```text
/// Tiny:             [ flags ] [ payload... ] [ 0 ]
/// Small..=Huge: [ len ] [ alloc ] [ flags ] [ payload... ] [ 0 ]
/// ```
///
/// Variants are ordered by capacity, so `a < b` means `b` can represent every
/// length `a` can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Variant {
    /// Length lives in the 5 high bits of the flags byte; no capacity field.
    Tiny,
    /// `u8` length and capacity fields.
    Small,
    /// `u16` length and capacity fields.
    Medium,
    /// `u32` length and capacity fields.
    Large,
    /// `u64` length and capacity fields.
    Huge,
}

impl Variant {
    /// Decodes the variant from a flags byte.
    ///
    /// Panics on a tag value this crate never writes, since that means the
    /// block was corrupted.
    #[inline(always)]
    pub(crate) fn from_flags(flags: u8) -> Self {
        match flags & TAG_MASK {
            TAG_TINY => Variant::Tiny,
            TAG_SMALL => Variant::Small,
            TAG_MEDIUM => Variant::Medium,
            TAG_LARGE => Variant::Large,
            TAG_HUGE => Variant::Huge,
            tag => panic!("corrupt flags byte: unknown variant tag {tag}"),
        }
    }

    #[inline]
    pub(crate) const fn tag(self) -> u8 {
        match self {
            Variant::Tiny => TAG_TINY,
            Variant::Small => TAG_SMALL,
            Variant::Medium => TAG_MEDIUM,
            Variant::Large => TAG_LARGE,
            Variant::Huge => TAG_HUGE,
        }
    }

    /// Width in bytes of the length and capacity fields (zero for Tiny).
    #[inline]
    pub(crate) const fn field_width(self) -> usize {
        match self {
            Variant::Tiny => 0,
            Variant::Small => 1,
            Variant::Medium => 2,
            Variant::Large => 4,
            Variant::Huge => 8,
        }
    }

    /// Total header size in bytes: both fields plus the flags byte.
    #[inline]
    pub const fn header_size(self) -> usize {
        2 * self.field_width() + 1
    }

    /// Largest payload length this variant's length field can record,
    /// capped at what the address space can hold.
    #[inline]
    pub const fn max_len(self) -> usize {
        match self {
            Variant::Tiny => TINY_MAX,
            Variant::Small => u8::MAX as usize,
            Variant::Medium => u16::MAX as usize,
            Variant::Large => u32::MAX as usize,
            Variant::Huge => usize::MAX,
        }
    }

    /// Smallest variant able to hold `required` bytes of capacity, never
    /// Tiny. Used when growing: post-growth blocks always carry independent
    /// length and capacity fields.
    #[inline]
    pub(crate) fn for_growth(required: usize) -> Self {
        if required <= u8::MAX as usize {
            Variant::Small
        } else if required <= u16::MAX as usize {
            Variant::Medium
        } else {
            cfg_if! {
                if #[cfg(target_pointer_width = "64")] {
                    if required <= u32::MAX as usize {
                        Variant::Large
                    } else {
                        Variant::Huge
                    }
                } else {
                    // on 32-bit targets a usize always fits the u32 fields
                    let _ = required;
                    Variant::Large
                }
            }
        }
    }

    /// Smallest variant for a zero-slack block of exactly `len` bytes.
    /// This is the only path that selects Tiny.
    #[inline]
    pub(crate) fn for_exact(len: usize) -> Self {
        if len <= TINY_MAX {
            Variant::Tiny
        } else {
            Self::for_growth(len)
        }
    }
}

const_assert_eq!(Variant::Tiny.header_size(), 1);
const_assert_eq!(Variant::Small.header_size(), 3);
const_assert_eq!(Variant::Medium.header_size(), 5);
const_assert_eq!(Variant::Large.header_size(), 9);
const_assert_eq!(Variant::Huge.header_size(), 17);
