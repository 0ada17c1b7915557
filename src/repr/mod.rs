//! The raw block representation: one contiguous allocation of
//! `[header][payload][terminator]`, handled through a pointer to the payload.
//!
//! Everything in here dispatches off the flags byte at payload offset `-1`.
//! That byte is the load-bearing invariant: its low bits name the header
//! variant, which fixes the header size, which locates every other field.

use core::mem::{self, MaybeUninit};
use core::ptr::{self, NonNull};
use core::slice;
use std::alloc::{self, Layout};

use static_assertions::assert_eq_size;

use crate::error::Error;

mod variant;
pub use variant::Variant;
use variant::TAG_BITS;

/// Above this capacity growth switches from doubling to a flat increment, so
/// proportional slack cannot run away on very large strings.
pub(crate) const MAX_PREALLOC: usize = 1024 * 1024;

/// Largest payload length any block can hold once the widest header and the
/// terminator byte are accounted for.
pub(crate) const MAX_LENGTH: usize = (isize::MAX as usize) - Variant::Huge.header_size() - 1;

/// Owning handle to one string block. The pointer addresses the payload; the
/// header lives immediately before it.
///
/// Exactly one `Repr` refers to a block at any time, so any method taking
/// `&mut self` may reallocate and rebind the pointer without invalidating
/// aliases. There is no sharing and no interior mutability.
#[repr(transparent)]
pub(crate) struct Repr {
    ptr: NonNull<u8>,
}

// SAFETY: a Repr exclusively owns its block and has no interior mutability
unsafe impl Send for Repr {}
// SAFETY: same as above, &Repr only permits reads
unsafe impl Sync for Repr {}

assert_eq_size!(Repr, usize);
assert_eq_size!(Option<Repr>, Repr);

/// Computes the layout of a whole block: header, payload capacity, terminator.
#[inline]
fn block_layout(variant: Variant, alloc: usize) -> Layout {
    let size = variant.header_size() + alloc + 1;
    // infallible: callers never let `alloc` exceed MAX_LENGTH
    Layout::from_size_align(size, 1).expect("block size exceeds isize::MAX")
}

/// Allocates an uninitialized block able to hold `alloc` payload bytes under
/// the given variant's header.
fn alloc_block(variant: Variant, alloc: usize) -> Result<NonNull<u8>, Error> {
    let layout = block_layout(variant, alloc);
    // SAFETY: the layout is never zero-sized, every variant has at least a
    // flags byte plus the terminator
    let raw = unsafe { alloc::alloc(layout) };
    NonNull::new(raw).ok_or(Error::AllocationFailure {
        size: layout.size(),
    })
}

/// Reads one packed header field. `field` points at the first byte of the
/// field, which is unaligned by design.
///
/// # Safety
/// `field` must point at a live field of the width implied by `variant`,
/// which must not be `Tiny`.
#[inline(always)]
unsafe fn read_field(field: *const u8, variant: Variant) -> usize {
    match variant {
        Variant::Tiny => unreachable!("Tiny headers have no integer fields"),
        Variant::Small => *field as usize,
        Variant::Medium => field.cast::<u16>().read_unaligned() as usize,
        Variant::Large => field.cast::<u32>().read_unaligned() as usize,
        Variant::Huge => field.cast::<u64>().read_unaligned() as usize,
    }
}

/// Writes one packed header field; the counterpart of [`read_field`].
///
/// # Safety
/// Same contract as [`read_field`], and `value` must fit the field width.
#[inline(always)]
unsafe fn write_field(field: *mut u8, variant: Variant, value: usize) {
    match variant {
        Variant::Tiny => unreachable!("Tiny headers have no integer fields"),
        Variant::Small => *field = value as u8,
        Variant::Medium => field.cast::<u16>().write_unaligned(value as u16),
        Variant::Large => field.cast::<u32>().write_unaligned(value as u32),
        Variant::Huge => field.cast::<u64>().write_unaligned(value as u64),
    }
}

/// Writes a fresh header at the start of `block` and returns the payload
/// pointer.
///
/// # Safety
/// `block` must span at least `variant.header_size() + alloc + 1` bytes, and
/// `len <= alloc <= variant.max_len()`.
unsafe fn init_header(
    block: NonNull<u8>,
    variant: Variant,
    len: usize,
    alloc: usize,
) -> NonNull<u8> {
    debug_assert!(len <= alloc);
    debug_assert!(alloc <= variant.max_len());

    let block = block.as_ptr();
    match variant {
        Variant::Tiny => {
            *block = variant.tag() | ((len as u8) << TAG_BITS);
        }
        v => {
            let width = v.field_width();
            write_field(block, v, len);
            write_field(block.add(width), v, alloc);
            *block.add(2 * width) = v.tag();
        }
    }
    NonNull::new_unchecked(block.add(variant.header_size()))
}

impl Repr {
    /// Allocates an exact-fit block and copies `bytes` into it.
    pub(crate) fn new(bytes: &[u8]) -> Result<Self, Error> {
        // SAFETY: the payload is fully written before the handle escapes
        let repr = unsafe { Self::new_uninit(bytes.len())? };
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), repr.ptr.as_ptr(), bytes.len());
        }
        Ok(repr)
    }

    /// Allocates an exact-fit, zero-filled block of `len` bytes.
    pub(crate) fn new_zeroed(len: usize) -> Result<Self, Error> {
        // SAFETY: zero-filled right away
        let repr = unsafe { Self::new_uninit(len)? };
        unsafe {
            ptr::write_bytes(repr.ptr.as_ptr(), 0, len);
        }
        Ok(repr)
    }

    /// Allocates an exact-fit block (`len == alloc`, the smallest variant
    /// that fits, so Tiny for `len <= 31`) with an uninitialized payload.
    /// The terminator is already in place.
    ///
    /// # Safety
    /// The caller must initialize all `len` payload bytes before the payload
    /// is read, cloned, or dropped into caller hands.
    pub(crate) unsafe fn new_uninit(len: usize) -> Result<Self, Error> {
        if len > MAX_LENGTH {
            return Err(Error::CapacityOverflow { required: len });
        }
        let variant = Variant::for_exact(len);
        let block = alloc_block(variant, len)?;
        let payload = init_header(block, variant, len, len);
        *payload.as_ptr().add(len) = 0;
        Ok(Repr { ptr: payload })
    }

    /// The flags byte at payload offset `-1`.
    #[inline(always)]
    fn flags(&self) -> u8 {
        // SAFETY: every live block has its flags byte just before the payload
        unsafe { *self.ptr.as_ptr().sub(1) }
    }

    #[inline(always)]
    pub(crate) fn variant(&self) -> Variant {
        Variant::from_flags(self.flags())
    }

    /// Pointer to the start of the whole allocation.
    #[inline]
    fn block_ptr(&self) -> *mut u8 {
        // SAFETY: the header precedes the payload within the same allocation
        unsafe { self.ptr.as_ptr().sub(self.variant().header_size()) }
    }

    /// Pointer to the length field of a non-Tiny header.
    #[inline]
    fn len_field(&self, variant: Variant) -> *mut u8 {
        debug_assert!(variant != Variant::Tiny);
        // SAFETY: same allocation as block_ptr
        unsafe { self.ptr.as_ptr().sub(variant.header_size()) }
    }

    /// Payload bytes currently in use. O(1).
    #[inline]
    pub(crate) fn len(&self) -> usize {
        let flags = self.flags();
        match Variant::from_flags(flags) {
            Variant::Tiny => (flags >> TAG_BITS) as usize,
            v => unsafe { read_field(self.len_field(v), v) },
        }
    }

    /// Payload bytes the block can hold. Tiny tracks no capacity and reports
    /// its length. O(1).
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        match self.variant() {
            Variant::Tiny => self.len(),
            v => unsafe { read_field(self.len_field(v).add(v.field_width()), v) },
        }
    }

    /// Spare payload bytes: `capacity - len`. Always zero for Tiny, which
    /// must be promoted before any write. O(1).
    #[inline]
    pub(crate) fn available(&self) -> usize {
        match self.variant() {
            Variant::Tiny => 0,
            v => unsafe {
                let field = self.len_field(v);
                read_field(field.add(v.field_width()), v) - read_field(field, v)
            },
        }
    }

    /// Commits a new length and rewrites the terminator. O(1).
    ///
    /// # Safety
    /// `payload[0..new_len]` must be initialized and `new_len <= capacity()`.
    /// Tiny blocks are exact-fit, so for them `new_len` must equal `len()`;
    /// use [`Repr::crop`] to shorten one.
    pub(crate) unsafe fn set_len(&mut self, new_len: usize) {
        match self.variant() {
            Variant::Tiny => {
                debug_assert_eq!(new_len, self.len(), "Tiny blocks cannot change length in place");
                *self.ptr.as_ptr().sub(1) = Variant::Tiny.tag() | ((new_len as u8) << TAG_BITS);
            }
            v => {
                debug_assert!(new_len <= self.capacity());
                write_field(self.len_field(v), v, new_len);
            }
        }
        *self.ptr.as_ptr().add(new_len) = 0;
    }

    /// Commits `delta` bytes the caller already wrote into the spare region
    /// (the reserve-then-commit pattern). O(1).
    ///
    /// # Safety
    /// `payload[len..len + delta]` must have been written and
    /// `delta <= available()`.
    pub(crate) unsafe fn incr_len(&mut self, delta: usize) {
        debug_assert!(delta <= self.available());
        self.set_len(self.len() + delta);
    }

    /// Overwrites the recorded capacity. No-op for Tiny, which has no
    /// capacity field. O(1).
    ///
    /// # Safety
    /// The block must genuinely span `header + new_alloc + 1` bytes, since
    /// deallocation derives its layout from this field, and
    /// `len() <= new_alloc <= variant.max_len()`.
    pub(crate) unsafe fn set_allocated(&mut self, new_alloc: usize) {
        let v = self.variant();
        if v == Variant::Tiny {
            return;
        }
        debug_assert!(new_alloc >= self.len());
        debug_assert!(new_alloc <= v.max_len());
        write_field(self.len_field(v).add(v.field_width()), v, new_alloc);
    }

    /// Guarantees `available() >= additional`, reallocating or promoting the
    /// block as needed. The payload and length are unchanged; only the
    /// address may move.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        if self.available() >= additional {
            return Ok(());
        }
        let len = self.len();
        let required = len
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow { required: usize::MAX })?;
        if required > MAX_LENGTH {
            return Err(Error::CapacityOverflow { required });
        }

        // double small requests, grow big ones by a flat 1 MiB
        let new_alloc = if required < MAX_PREALLOC {
            required * 2
        } else {
            required.saturating_add(MAX_PREALLOC).min(MAX_LENGTH)
        };

        let old_variant = self.variant();
        let new_variant = Variant::for_growth(new_alloc);
        if new_variant == old_variant {
            // same header geometry, resize the block where it sits
            self.resize_in_place(old_variant, new_alloc)
        } else {
            // header layouts are not interconvertible in place
            self.rebuild(new_variant, new_alloc)
        }
    }

    /// Reallocates to exactly `capacity == len`, downgrading to the smallest
    /// variant that fits the current length (including Tiny). Idempotent.
    pub(crate) fn shrink_to_fit(&mut self) -> Result<(), Error> {
        let len = self.len();
        let current = self.variant();
        let target = Variant::for_exact(len);
        if target == current {
            if self.available() == 0 {
                return Ok(());
            }
            self.resize_in_place(current, len)
        } else {
            self.rebuild(target, len)
        }
    }

    /// Zero-extends the payload to `new_len` and commits it. No-op when
    /// `new_len <= len()`; never shrinks.
    pub(crate) fn grow_zeroed(&mut self, new_len: usize) -> Result<(), Error> {
        let len = self.len();
        if new_len <= len {
            return Ok(());
        }
        self.reserve(new_len - len)?;
        // SAFETY: reserve guaranteed room; fill before committing the length
        unsafe {
            ptr::write_bytes(self.ptr.as_ptr().add(len), 0, new_len - len);
            self.set_len(new_len);
        }
        Ok(())
    }

    /// Appends `bytes`, growing as needed.
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.reserve(bytes.len())?;
        let len = self.len();
        // SAFETY: reserve guaranteed room past `len`; commit after the copy
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.ptr.as_ptr().add(len), bytes.len());
            self.incr_len(bytes.len());
        }
        Ok(())
    }

    /// Drops the length to zero while keeping the capacity, so subsequent
    /// appends reuse the block. Tiny blocks track no capacity, so a non-empty
    /// one is swapped for the exact-fit empty block instead.
    pub(crate) fn clear(&mut self) {
        match self.variant() {
            Variant::Tiny => {
                if self.len() != 0 {
                    *self = Repr::new(&[]).unwrap_or_else(|err| err.escalate());
                }
            }
            // SAFETY: zero is always a valid committed length
            _ => unsafe { self.set_len(0) },
        }
    }

    /// Keeps only `payload[start..end]`, moving it to the front. O(kept
    /// length). Capacity is retained except for Tiny, which is rebuilt
    /// exact-fit.
    pub(crate) fn crop(&mut self, start: usize, end: usize) {
        let len = self.len();
        assert!(start <= end && end <= len, "crop range out of bounds");
        let kept = end - start;
        if kept == len {
            return;
        }
        match self.variant() {
            Variant::Tiny => {
                let repr =
                    Repr::new(&self.as_slice()[start..end]).unwrap_or_else(|err| err.escalate());
                *self = repr;
            }
            // SAFETY: both ranges lie inside the payload; ptr::copy handles
            // the overlap, and the shorter length is committed afterwards
            _ => unsafe {
                if start > 0 {
                    ptr::copy(self.ptr.as_ptr().add(start), self.ptr.as_ptr(), kept);
                }
                self.set_len(kept);
            },
        }
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: payload[0..len] is always initialized
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: payload[0..len] is always initialized and exclusively owned
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }

    /// The reserved-but-uncommitted region between `len` and `capacity`.
    #[inline]
    pub(crate) fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        let len = self.len();
        let spare = self.available();
        // SAFETY: the block spans capacity + 1 bytes past the payload start
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().add(len).cast(), spare) }
    }

    /// Reallocates the current block to hold `new_alloc` payload bytes
    /// without changing the header variant. The address may still move.
    fn resize_in_place(&mut self, variant: Variant, new_alloc: usize) -> Result<(), Error> {
        debug_assert_eq!(variant, self.variant());
        let old_layout = block_layout(variant, self.capacity());
        let new_size = variant.header_size() + new_alloc + 1;
        // SAFETY: old_layout is exactly the layout this block lives under
        let raw = unsafe { alloc::realloc(self.block_ptr(), old_layout, new_size) };
        // on failure the old block is untouched, so the handle stays valid
        let block = NonNull::new(raw).ok_or(Error::AllocationFailure { size: new_size })?;
        // SAFETY: the header sits at the start of the (possibly moved) block
        unsafe {
            self.ptr = NonNull::new_unchecked(block.as_ptr().add(variant.header_size()));
            self.set_allocated(new_alloc);
        }
        Ok(())
    }

    /// Moves the payload into a freshly allocated block with a different
    /// header variant and frees the old one. `new_alloc >= len()`.
    fn rebuild(&mut self, variant: Variant, new_alloc: usize) -> Result<(), Error> {
        let len = self.len();
        debug_assert!(len <= new_alloc);
        let block = alloc_block(variant, new_alloc)?;
        // SAFETY: the fresh block spans header + new_alloc + 1 bytes
        unsafe {
            let payload = init_header(block, variant, len, new_alloc);
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), payload.as_ptr(), len);
            *payload.as_ptr().add(len) = 0;
            // the old block is released by Drop
            let _old = mem::replace(self, Repr { ptr: payload });
        }
        Ok(())
    }
}

impl Clone for Repr {
    /// Deep copy, always trimmed to the exact length.
    fn clone(&self) -> Self {
        Repr::new(self.as_slice()).unwrap_or_else(|err| err.escalate())
    }
}

impl Drop for Repr {
    fn drop(&mut self) {
        let layout = block_layout(self.variant(), self.capacity());
        // SAFETY: this is exactly the layout the live block was allocated with
        unsafe { alloc::dealloc(self.block_ptr(), layout) };
    }
}
