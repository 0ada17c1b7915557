#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::MaybeUninit;
use core::ops::{Bound, Deref, DerefMut, RangeBounds};
use core::slice;

mod error;
mod features;
mod macros;
mod repr;

pub mod list;

pub use error::Error;
pub use list::List;
pub use repr::Variant;

use repr::Repr;

#[cfg(test)]
mod tests;

/// A binary-safe, null-terminated, resizable byte string with minimal
/// per-string memory overhead.
///
/// A [`DynBytes`] owns exactly one contiguous heap block laid out as
/// `[header][payload][terminator]` and picks the smallest of five header
/// encodings ([`Variant`]) that can describe its payload, so an empty string
/// costs two bytes and a short one little more. The payload may contain any
/// bytes, including zeros; a zero terminator always follows it for
/// interoperability with APIs that expect terminated strings.
///
/// ```
/// use dynbytes::DynBytes;
///
/// let mut s = DynBytes::new(b"hello").unwrap();
/// s.extend_from_slice(b" \0 world");
/// assert_eq!(s, b"hello \0 world"[..]);
/// assert!(s.capacity() >= s.len());
/// ```
///
/// # Growth
///
/// Operations that may need room ([`reserve`], [`push`],
/// [`extend_from_slice`], ...) grow the block with slack: requests below
/// 1 MiB double the required size, larger ones add a flat 1 MiB. A
/// reallocation can replace the underlying block; because every such
/// operation takes `&mut self`, no stale reference to the old block can
/// survive it.
///
/// [`reserve`]: DynBytes::reserve
/// [`push`]: DynBytes::push
/// [`extend_from_slice`]: DynBytes::extend_from_slice
///
/// # Ownership
///
/// There is no sharing and no reference counting: [`Clone`] performs a deep
/// copy, always trimmed to the exact length. A single instance must not be
/// mutated from two threads at once, which `&mut` already guarantees.
#[derive(Clone)]
pub struct DynBytes {
    repr: Repr,
}

static_assertions::assert_eq_size!(DynBytes, usize);
static_assertions::assert_eq_size!(Option<DynBytes>, DynBytes);

impl DynBytes {
    /// Creates a new string holding a copy of `bytes`, sized exactly: fresh
    /// strings carry no growth slack, and the smallest header variant that
    /// fits is chosen (Tiny for anything up to 31 bytes).
    ///
    /// # Examples
    /// ```
    /// use dynbytes::{DynBytes, Variant};
    ///
    /// let s = DynBytes::new(b"").unwrap();
    /// assert_eq!(s.variant(), Variant::Tiny);
    /// assert_eq!(s.len(), 0);
    /// assert_eq!(s.capacity(), 0);
    /// ```
    pub fn new<B: AsRef<[u8]>>(bytes: B) -> Result<Self, Error> {
        Ok(DynBytes {
            repr: Repr::new(bytes.as_ref())?,
        })
    }

    /// Creates a zero-filled string of `len` bytes, sized exactly.
    pub fn zeroed(len: usize) -> Result<Self, Error> {
        Ok(DynBytes {
            repr: Repr::new_zeroed(len)?,
        })
    }

    /// Renders a signed integer into a new string.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// assert_eq!(DynBytes::from_i64(-42), b"-42"[..]);
    /// ```
    pub fn from_i64(value: i64) -> Self {
        let mut buf = itoa::Buffer::new();
        DynBytes::from(buf.format(value).as_bytes())
    }

    /// Payload bytes currently in use. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.repr.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload bytes the underlying block can hold without reallocating.
    /// Tiny strings track no independent capacity and report their length.
    /// O(1).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.repr.capacity()
    }

    /// Spare bytes available for appends before a reallocation is needed:
    /// `capacity() - len()`. Always zero for Tiny. O(1).
    #[inline]
    pub fn available(&self) -> usize {
        self.repr.available()
    }

    /// The header encoding currently in effect.
    #[inline]
    pub fn variant(&self) -> Variant {
        self.repr.variant()
    }

    /// Address of the payload. The block is guaranteed to hold a zero byte
    /// at `len()`, so the pointer can be handed to terminator-expecting
    /// consumers. Invalidated by any operation that may reallocate.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.repr.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.repr.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.repr.as_mut_slice()
    }

    /// The reserved-but-unused region past the payload, for callers that
    /// fill the buffer themselves and commit with [`incr_len`].
    ///
    /// [`incr_len`]: DynBytes::incr_len
    #[inline]
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        self.repr.spare_capacity_mut()
    }

    /// Commits a new payload length and rewrites the terminator. O(1).
    ///
    /// # Safety
    /// `payload[0..new_len]` must be initialized and `new_len` must not
    /// exceed [`capacity`]. Tiny strings are exact-fit and cannot change
    /// length in place; use [`truncate`] or [`crop`] instead.
    ///
    /// [`capacity`]: DynBytes::capacity
    /// [`truncate`]: DynBytes::truncate
    /// [`crop`]: DynBytes::crop
    pub unsafe fn set_len(&mut self, new_len: usize) {
        self.repr.set_len(new_len)
    }

    /// Commits `delta` bytes previously written into
    /// [`spare_capacity_mut`], without rescanning the payload. O(1).
    ///
    /// # Safety
    /// The first `delta` bytes of the spare region must have been written
    /// and `delta` must not exceed [`available`].
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let mut s = DynBytes::new(b"ab").unwrap();
    /// s.reserve(2);
    /// s.spare_capacity_mut()[0].write(b'c');
    /// s.spare_capacity_mut()[1].write(b'd');
    /// unsafe { s.incr_len(2) };
    /// assert_eq!(s, b"abcd"[..]);
    /// ```
    ///
    /// [`spare_capacity_mut`]: DynBytes::spare_capacity_mut
    /// [`available`]: DynBytes::available
    pub unsafe fn incr_len(&mut self, delta: usize) {
        self.repr.incr_len(delta)
    }

    /// Overwrites the recorded capacity. No-op for Tiny, which has no
    /// capacity field. O(1).
    ///
    /// # Safety
    /// The underlying block must genuinely span `new_alloc` payload bytes
    /// plus header and terminator (deallocation derives the block layout
    /// from this field), and `len() <= new_alloc <= variant().max_len()`.
    pub unsafe fn set_allocated(&mut self, new_alloc: usize) {
        self.repr.set_allocated(new_alloc)
    }

    /// Guarantees `available() >= additional`, reallocating if needed.
    ///
    /// Requests below the 1 MiB preallocation threshold double the required
    /// size to amortize repeated small appends; larger ones add a flat 1 MiB
    /// to bound absolute waste. The length and payload are unchanged.
    ///
    /// Panics on capacity overflow and aborts on allocator exhaustion; see
    /// [`try_reserve`] for the fallible form.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let mut s = DynBytes::new(b"hello").unwrap();
    /// s.reserve(10);
    /// // required 15 bytes, doubled
    /// assert_eq!(s.capacity(), 30);
    /// assert_eq!(s, b"hello"[..]);
    /// ```
    ///
    /// [`try_reserve`]: DynBytes::try_reserve
    pub fn reserve(&mut self, additional: usize) {
        self.try_reserve(additional)
            .unwrap_or_else(|err| err.escalate());
    }

    /// Fallible form of [`reserve`]: surfaces [`Error::CapacityOverflow`]
    /// and [`Error::AllocationFailure`] instead of panicking. On error the
    /// string is untouched and all invariants hold.
    ///
    /// [`reserve`]: DynBytes::reserve
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.repr.reserve(additional)
    }

    /// Reallocates to `capacity() == len()`, releasing all slack and
    /// downgrading to the smallest header variant that fits the current
    /// length (Tiny included). Idempotent.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let mut s = DynBytes::new(b"payload").unwrap();
    /// s.reserve(5000);
    /// assert!(s.available() > 0);
    /// s.shrink_to_fit();
    /// assert_eq!(s.capacity(), s.len());
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.try_shrink_to_fit()
            .unwrap_or_else(|err| err.escalate());
    }

    /// Fallible form of [`shrink_to_fit`].
    ///
    /// [`shrink_to_fit`]: DynBytes::shrink_to_fit
    pub fn try_shrink_to_fit(&mut self) -> Result<(), Error> {
        self.repr.shrink_to_fit()
    }

    /// Zero-extends the payload to `new_len` bytes. No-op when
    /// `new_len <= len()`; this never shrinks.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let mut s = DynBytes::new(b"ab").unwrap();
    /// s.grow_zeroed(5);
    /// assert_eq!(s, b"ab\0\0\0"[..]);
    /// ```
    pub fn grow_zeroed(&mut self, new_len: usize) {
        self.try_grow_zeroed(new_len)
            .unwrap_or_else(|err| err.escalate());
    }

    /// Fallible form of [`grow_zeroed`].
    ///
    /// [`grow_zeroed`]: DynBytes::grow_zeroed
    pub fn try_grow_zeroed(&mut self, new_len: usize) -> Result<(), Error> {
        self.repr.grow_zeroed(new_len)
    }

    /// Sets the length to zero while keeping the capacity, so subsequent
    /// appends reuse the block until they outgrow it. O(1).
    pub fn clear(&mut self) {
        self.repr.clear();
    }

    /// Shortens the payload to `new_len` bytes; no-op if already shorter.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len < self.len() {
            self.repr.crop(0, new_len);
        }
    }

    /// Appends a single byte, growing if needed.
    pub fn push(&mut self, byte: u8) {
        self.extend_from_slice(&[byte]);
    }

    /// Appends `bytes`, growing if needed.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.try_extend_from_slice(bytes)
            .unwrap_or_else(|err| err.escalate());
    }

    /// Fallible form of [`extend_from_slice`].
    ///
    /// [`extend_from_slice`]: DynBytes::extend_from_slice
    pub fn try_extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.repr.extend_from_slice(bytes)
    }

    /// Replaces the whole payload with a copy of `bytes`, reusing the
    /// existing capacity where possible.
    pub fn copy_from(&mut self, bytes: &[u8]) {
        self.clear();
        self.extend_from_slice(bytes);
    }

    /// Keeps only the given subrange of the payload, moving it to the
    /// front. O(kept length). Capacity is retained, except for Tiny strings,
    /// which are rebuilt exact-fit.
    ///
    /// Panics if the range is out of bounds or decreasing.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let mut s = DynBytes::new(b"hello world").unwrap();
    /// s.crop(6..);
    /// assert_eq!(s, b"world"[..]);
    /// ```
    pub fn crop<R: RangeBounds<usize>>(&mut self, range: R) {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => n + 1,
            Bound::Excluded(&n) => n,
            Bound::Unbounded => len,
        };
        assert!(start <= end, "crop range starts at {start} but ends at {end}");
        assert!(end <= len, "crop range end {end} is out of bounds for length {len}");
        self.repr.crop(start, end);
    }

    /// Strips any leading and trailing bytes contained in `set`. O(n).
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let mut s = DynBytes::new(b"xy hello yx").unwrap();
    /// s.trim(b"xy ");
    /// assert_eq!(s, b"hello"[..]);
    /// ```
    pub fn trim(&mut self, set: &[u8]) {
        let bytes = self.as_slice();
        let start = bytes
            .iter()
            .position(|b| !set.contains(b))
            .unwrap_or(bytes.len());
        let end = bytes
            .iter()
            .rposition(|b| !set.contains(b))
            .map_or(start, |i| i + 1);
        self.repr.crop(start, end);
    }

    /// Appends a double-quoted, printable-escaped rendering of `bytes`:
    /// non-printable bytes become `\xHH`, the usual control characters use
    /// their mnemonic escapes.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let mut s = DynBytes::default();
    /// s.append_quoted(b"a\n\x01");
    /// assert_eq!(s, b"\"a\\n\\x01\""[..]);
    /// ```
    pub fn append_quoted(&mut self, bytes: &[u8]) {
        const HEX: &[u8; 16] = b"0123456789abcdef";

        self.push(b'"');
        for &b in bytes {
            match b {
                b'\\' | b'"' => {
                    self.push(b'\\');
                    self.push(b);
                }
                b'\n' => self.extend_from_slice(b"\\n"),
                b'\r' => self.extend_from_slice(b"\\r"),
                b'\t' => self.extend_from_slice(b"\\t"),
                0x07 => self.extend_from_slice(b"\\a"),
                0x08 => self.extend_from_slice(b"\\b"),
                0x20..=0x7e => self.push(b),
                _ => {
                    self.extend_from_slice(b"\\x");
                    self.push(HEX[(b >> 4) as usize]);
                    self.push(HEX[(b & 0xf) as usize]);
                }
            }
        }
        self.push(b'"');
    }

    /// Splits the payload on every occurrence of `sep`, returning the parts
    /// as owned strings. Adjacent separators produce empty parts.
    ///
    /// Panics if `sep` is empty.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let s = DynBytes::new(b"a--b--c").unwrap();
    /// let parts = s.split_on(b"--");
    /// assert_eq!(parts, [b"a", b"b", b"c"].map(|p| DynBytes::new(p).unwrap()));
    /// ```
    pub fn split_on(&self, sep: &[u8]) -> Vec<DynBytes> {
        assert!(!sep.is_empty(), "separator must be non-empty");
        let mut parts = Vec::new();
        let mut rest = self.as_slice();
        while let Some(pos) = find_sub(rest, sep) {
            parts.push(DynBytes::from(&rest[..pos]));
            rest = &rest[pos + sep.len()..];
        }
        parts.push(DynBytes::from(rest));
        parts
    }

    /// Tokenizes a command line into arguments: whitespace separates
    /// tokens, double quotes permit `\xHH` hex escapes and the usual
    /// mnemonic escapes, single quotes are literal except for `\'`.
    /// Returns `None` on unbalanced quotes or on a closing quote not
    /// followed by whitespace.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let args = DynBytes::split_args(b"set \"key one\" 'it\\'s'").unwrap();
    /// assert_eq!(args.len(), 3);
    /// assert_eq!(args[1], b"key one"[..]);
    /// assert_eq!(args[2], b"it's"[..]);
    ///
    /// assert!(DynBytes::split_args(b"unbalanced \"quote").is_none());
    /// ```
    pub fn split_args(line: &[u8]) -> Option<Vec<DynBytes>> {
        fn is_space(b: u8) -> bool {
            matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
        }
        fn hex_val(b: u8) -> Option<u8> {
            match b {
                b'0'..=b'9' => Some(b - b'0'),
                b'a'..=b'f' => Some(b - b'a' + 10),
                b'A'..=b'F' => Some(b - b'A' + 10),
                _ => None,
            }
        }

        let mut args = Vec::new();
        let mut i = 0;
        loop {
            while i < line.len() && is_space(line[i]) {
                i += 1;
            }
            if i == line.len() {
                return Some(args);
            }

            let mut current = DynBytes::default();
            let mut in_quotes = false;
            let mut in_single_quotes = false;
            let mut done = false;
            while !done {
                if in_quotes {
                    if i == line.len() {
                        return None; // unterminated quotes
                    }
                    let b = line[i];
                    if b == b'\\'
                        && i + 3 < line.len()
                        && line[i + 1] == b'x'
                        && hex_val(line[i + 2]).is_some()
                        && hex_val(line[i + 3]).is_some()
                    {
                        let hi = hex_val(line[i + 2]).unwrap_or(0);
                        let lo = hex_val(line[i + 3]).unwrap_or(0);
                        current.push((hi << 4) | lo);
                        i += 4;
                    } else if b == b'\\' && i + 1 < line.len() {
                        let c = match line[i + 1] {
                            b'n' => b'\n',
                            b'r' => b'\r',
                            b't' => b'\t',
                            b'b' => 0x08,
                            b'a' => 0x07,
                            other => other,
                        };
                        current.push(c);
                        i += 2;
                    } else if b == b'"' {
                        // closing quote must be followed by a separator
                        if i + 1 < line.len() && !is_space(line[i + 1]) {
                            return None;
                        }
                        done = true;
                        i += 1;
                    } else {
                        current.push(b);
                        i += 1;
                    }
                } else if in_single_quotes {
                    if i == line.len() {
                        return None;
                    }
                    let b = line[i];
                    if b == b'\\' && i + 1 < line.len() && line[i + 1] == b'\'' {
                        current.push(b'\'');
                        i += 2;
                    } else if b == b'\'' {
                        if i + 1 < line.len() && !is_space(line[i + 1]) {
                            return None;
                        }
                        done = true;
                        i += 1;
                    } else {
                        current.push(b);
                        i += 1;
                    }
                } else if i == line.len() {
                    done = true;
                } else {
                    match line[i] {
                        b'"' => {
                            in_quotes = true;
                            i += 1;
                        }
                        b'\'' => {
                            in_single_quotes = true;
                            i += 1;
                        }
                        b if is_space(b) => done = true,
                        b => {
                            current.push(b);
                            i += 1;
                        }
                    }
                }
            }
            args.push(current);
        }
    }

    /// Concatenates `parts` with `sep` between each pair.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let joined = DynBytes::join([b"a".as_slice(), b"b", b"c"], b", ");
    /// assert_eq!(joined, b"a, b, c"[..]);
    /// ```
    pub fn join<I, B>(parts: I, sep: &[u8]) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut out = DynBytes::default();
        let mut first = true;
        for part in parts {
            if !first {
                out.extend_from_slice(sep);
            }
            out.extend_from_slice(part.as_ref());
            first = false;
        }
        out
    }

    /// Replaces every occurrence of `from[i]` in the payload with `to[i]`,
    /// in place. Panics if the two sets differ in length.
    ///
    /// # Examples
    /// ```
    /// # use dynbytes::DynBytes;
    /// let mut s = DynBytes::new(b"hello").unwrap();
    /// s.map_bytes(b"lo", b"01");
    /// assert_eq!(s, b"he001"[..]);
    /// ```
    pub fn map_bytes(&mut self, from: &[u8], to: &[u8]) {
        assert_eq!(
            from.len(),
            to.len(),
            "map_bytes requires equal-length byte sets"
        );
        for b in self.as_mut_slice() {
            if let Some(pos) = from.iter().position(|f| f == b) {
                *b = to[pos];
            }
        }
    }
}

/// First occurrence of `needle` in `haystack`; `needle` must be non-empty.
fn find_sub(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl Default for DynBytes {
    fn default() -> Self {
        DynBytes::new(b"").unwrap_or_else(|err| err.escalate())
    }
}

impl Deref for DynBytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for DynBytes {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl AsRef<[u8]> for DynBytes {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for DynBytes {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl Borrow<[u8]> for DynBytes {
    #[inline]
    fn borrow(&self) -> &[u8] {
        self.as_slice()
    }
}

impl BorrowMut<[u8]> for DynBytes {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl fmt::Debug for DynBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynBytes(\"{}\")", self.as_slice().escape_ascii())
    }
}

/// Appends formatted text; the counterpart of the printf-style
/// concatenation of classic C string libraries.
///
/// ```
/// use core::fmt::Write;
/// use dynbytes::DynBytes;
///
/// let mut s = DynBytes::new(b"x = ").unwrap();
/// write!(s, "{:.1}", 2.5_f64).unwrap();
/// assert_eq!(s, b"x = 2.5"[..]);
/// ```
impl fmt::Write for DynBytes {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl PartialEq for DynBytes {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for DynBytes {}

impl PartialEq<[u8]> for DynBytes {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<&[u8]> for DynBytes {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for DynBytes {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<Vec<u8>> for DynBytes {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl PartialEq<str> for DynBytes {
    fn eq(&self, other: &str) -> bool {
        self.as_slice() == other.as_bytes()
    }
}

impl PartialEq<&str> for DynBytes {
    fn eq(&self, other: &&str) -> bool {
        self.as_slice() == other.as_bytes()
    }
}

impl PartialOrd for DynBytes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Byte-lexicographic ordering, binary safe: embedded zeros compare like any
/// other byte.
impl Ord for DynBytes {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl Hash for DynBytes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // must agree with [u8]'s Hash, since Borrow<[u8]> is implemented
        self.as_slice().hash(state)
    }
}

impl From<&[u8]> for DynBytes {
    fn from(bytes: &[u8]) -> Self {
        DynBytes::new(bytes).unwrap_or_else(|err| err.escalate())
    }
}

impl<const N: usize> From<&[u8; N]> for DynBytes {
    fn from(bytes: &[u8; N]) -> Self {
        DynBytes::from(bytes.as_slice())
    }
}

impl From<&str> for DynBytes {
    fn from(text: &str) -> Self {
        DynBytes::from(text.as_bytes())
    }
}

impl From<Vec<u8>> for DynBytes {
    fn from(bytes: Vec<u8>) -> Self {
        DynBytes::from(bytes.as_slice())
    }
}

impl From<String> for DynBytes {
    fn from(text: String) -> Self {
        DynBytes::from(text.as_bytes())
    }
}

impl FromIterator<u8> for DynBytes {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut out = DynBytes::default();
        out.extend(iter);
        out
    }
}

impl Extend<u8> for DynBytes {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.reserve(low);
        for byte in iter {
            self.push(byte);
        }
    }
}

impl<'a> Extend<&'a u8> for DynBytes {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a> IntoIterator for &'a DynBytes {
    type Item = &'a u8;
    type IntoIter = slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
