use proptest::prelude::*;
use test_case::test_case;

use crate::{DynBytes, Variant};

const MAX_PREALLOC: usize = crate::repr::MAX_PREALLOC;

/// Reads the terminator byte just past the payload.
fn terminator(s: &DynBytes) -> u8 {
    unsafe { *s.as_ptr().add(s.len()) }
}

// strategy biased toward variant boundaries, embedded zeros included
fn rand_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..=40),
        proptest::collection::vec(any::<u8>(), 250..=260),
        proptest::collection::vec(any::<u8>(), 0..=2048),
    ]
}

proptest! {
    #[test]
    fn construction_roundtrips_arbitrary_bytes(bytes in rand_bytes()) {
        let s = DynBytes::new(&bytes).unwrap();

        prop_assert_eq!(s.as_slice(), &bytes[..]);
        prop_assert_eq!(s.len(), bytes.len());
        prop_assert_eq!(s.capacity(), s.len());
        prop_assert_eq!(s.available(), 0);
        prop_assert_eq!(terminator(&s), 0);
    }

    #[test]
    fn exact_construction_picks_the_smallest_variant(len in 0usize..100_000) {
        let s = DynBytes::zeroed(len).unwrap();

        let expected = match len {
            0..=31 => Variant::Tiny,
            32..=255 => Variant::Small,
            256..=65_535 => Variant::Medium,
            _ => Variant::Large,
        };
        prop_assert_eq!(s.variant(), expected);
        prop_assert_eq!(s.len(), len);
    }

    #[test]
    fn growth_follows_the_preallocation_law(
        bytes in rand_bytes(),
        additional in 1usize..4 * MAX_PREALLOC,
    ) {
        let mut s = DynBytes::new(&bytes).unwrap();
        s.reserve(additional);

        let required = bytes.len() + additional;
        let expected = if required < MAX_PREALLOC {
            required * 2
        } else {
            required + MAX_PREALLOC
        };
        prop_assert_eq!(s.capacity(), expected);
        prop_assert_eq!(s.as_slice(), &bytes[..], "growth must not disturb the payload");
        prop_assert_eq!(terminator(&s), 0);
    }

    #[test]
    fn appends_accumulate_and_stay_terminated(
        first in rand_bytes(),
        second in rand_bytes(),
    ) {
        let mut s = DynBytes::new(&first).unwrap();
        s.extend_from_slice(&second);

        let mut expected = first.clone();
        expected.extend_from_slice(&second);
        prop_assert_eq!(s.as_slice(), &expected[..]);
        prop_assert!(s.len() <= s.capacity());
        prop_assert_eq!(terminator(&s), 0);
    }

    #[test]
    fn shrink_always_lands_exact_fit(bytes in rand_bytes(), slack in 0usize..5000) {
        let mut s = DynBytes::new(&bytes).unwrap();
        s.reserve(slack);
        s.shrink_to_fit();

        prop_assert_eq!(s.capacity(), s.len());
        prop_assert_eq!(s.variant(), Variant::for_exact(s.len()));
        prop_assert_eq!(s.as_slice(), &bytes[..]);
    }

    #[test]
    fn clone_detaches_completely(bytes in proptest::collection::vec(any::<u8>(), 1..512)) {
        let mut original = DynBytes::new(&bytes).unwrap();
        let copy = original.clone();

        let first = original.as_slice()[0];
        original.as_mut_slice()[0] = first.wrapping_add(1);
        original.extend_from_slice(b"tail");

        prop_assert_eq!(copy.as_slice(), &bytes[..]);
        prop_assert_eq!(copy.capacity(), copy.len(), "clones are trimmed");
    }

    #[test]
    fn split_on_then_join_roundtrips(
        parts in proptest::collection::vec(
            proptest::collection::vec(0u8..=9, 0..16),
            1..8,
        ),
    ) {
        // the separator byte cannot occur inside the parts
        let joined = DynBytes::join(&parts, b"\xff");
        let split = joined.split_on(b"\xff");

        prop_assert_eq!(split.len(), parts.len());
        for (got, want) in split.iter().zip(&parts) {
            prop_assert_eq!(got.as_slice(), &want[..]);
        }
    }

    #[test]
    fn quoting_then_tokenizing_roundtrips(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut quoted = DynBytes::default();
        quoted.append_quoted(&bytes);

        let args = DynBytes::split_args(quoted.as_slice()).unwrap();
        prop_assert_eq!(args.len(), 1);
        prop_assert_eq!(args[0].as_slice(), &bytes[..]);
    }

    #[test]
    fn ordering_agrees_with_slice_ordering(a in rand_bytes(), b in rand_bytes()) {
        let sa = DynBytes::new(&a).unwrap();
        let sb = DynBytes::new(&b).unwrap();
        prop_assert_eq!(sa.cmp(&sb), a.cmp(&b));
        prop_assert_eq!(sa == sb, a == b);
    }
}

#[test_case(0 => Variant::Tiny)]
#[test_case(31 => Variant::Tiny; "tiny upper bound")]
#[test_case(32 => Variant::Small; "first small length")]
#[test_case(255 => Variant::Small; "small upper bound")]
#[test_case(256 => Variant::Medium)]
#[test_case(65_535 => Variant::Medium; "medium upper bound")]
#[test_case(65_536 => Variant::Large)]
fn variant_by_exact_length(len: usize) -> Variant {
    DynBytes::zeroed(len).unwrap().variant()
}

/// A string kept exact-fit crosses Tiny into Small when the 32nd byte
/// arrives, and the payload survives every transition.
#[test]
fn exact_fit_growth_crosses_tiny_into_small() {
    let mut s = DynBytes::default();
    for i in 0..40u8 {
        s.push(b'a' + (i % 26));
        s.shrink_to_fit();

        let expected = if s.len() <= 31 {
            Variant::Tiny
        } else {
            Variant::Small
        };
        assert_eq!(s.variant(), expected, "wrong variant at length {}", s.len());
        assert_eq!(s.capacity(), s.len());
        assert_eq!(terminator(&s), 0);
    }
    assert_eq!(s.len(), 40);
    assert_eq!(&s[..5], b"abcde");
}

#[test]
fn append_grows_with_slack_for_amortization() {
    let mut s = DynBytes::new(b"0123456789").unwrap();
    s.extend_from_slice(b"0123456789");

    // required 20 bytes, doubled
    assert_eq!(s.len(), 20);
    assert_eq!(s.capacity(), 40);
    assert_eq!(s.available(), 20);
}

#[test]
fn clear_and_refill_reuses_the_block() {
    let mut s = DynBytes::new(b"some reusable buffer").unwrap();
    s.reserve(100);
    let cap = s.capacity();

    s.clear();
    assert!(s.is_empty());
    assert_eq!(s.capacity(), cap);
    let addr = s.as_ptr();

    s.extend_from_slice(&vec![b'z'; cap]);
    assert_eq!(s.as_ptr(), addr, "refill within capacity must not move");
    assert_eq!(s.len(), cap);
}

#[test]
fn truncate_shortens_and_keeps_capacity() {
    let mut s = DynBytes::new(b"hello world").unwrap();
    s.reserve(10);
    let cap = s.capacity();

    s.truncate(5);
    assert_eq!(s, b"hello"[..]);
    assert_eq!(s.capacity(), cap);
    assert_eq!(terminator(&s), 0);

    s.truncate(100);
    assert_eq!(s.len(), 5, "truncate never grows");
}

#[test]
fn crop_accepts_the_usual_range_forms() {
    let mut s = DynBytes::new(b"0123456789").unwrap();
    s.crop(2..=7);
    assert_eq!(s, b"234567"[..]);

    s.crop(..3);
    assert_eq!(s, b"234"[..]);

    s.crop(..);
    assert_eq!(s, b"234"[..]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn crop_rejects_an_out_of_range_end() {
    let mut s = DynBytes::new(b"abc").unwrap();
    s.crop(1..9);
}

#[test]
fn trim_strips_both_ends_only() {
    let mut s = DynBytes::new(b"  \t hello  world \t ").unwrap();
    s.trim(b" \t");
    assert_eq!(s, b"hello  world"[..]);

    // a payload made only of set bytes trims to empty
    let mut s = DynBytes::new(b"xxxx").unwrap();
    s.trim(b"x");
    assert!(s.is_empty());
}

#[test]
fn copy_from_replaces_the_payload() {
    let mut s = DynBytes::new(b"old contents").unwrap();
    s.reserve(50);
    let cap = s.capacity();

    s.copy_from(b"new");
    assert_eq!(s, b"new"[..]);
    assert_eq!(s.capacity(), cap, "replacement reuses the block");
}

#[test]
fn grow_zeroed_pads_with_zeros() {
    let mut s = DynBytes::new(b"abc").unwrap();
    s.grow_zeroed(8);
    assert_eq!(s, b"abc\0\0\0\0\0"[..]);

    s.grow_zeroed(4);
    assert_eq!(s.len(), 8, "never shrinks");
}

#[test_case(0 => b"0".to_vec())]
#[test_case(42 => b"42".to_vec())]
#[test_case(-7 => b"-7".to_vec())]
#[test_case(i64::MIN => b"-9223372036854775808".to_vec())]
#[test_case(i64::MAX => b"9223372036854775807".to_vec())]
fn from_i64_renders_decimal(value: i64) -> Vec<u8> {
    DynBytes::from_i64(value).as_slice().to_vec()
}

#[test]
fn split_on_keeps_empty_parts() {
    let s = DynBytes::new(b"--a--").unwrap();
    let parts = s.split_on(b"--");
    assert_eq!(parts.len(), 3);
    assert!(parts[0].is_empty());
    assert_eq!(parts[1], b"a"[..]);
    assert!(parts[2].is_empty());

    // no separator present: one part, the whole payload
    let s = DynBytes::new(b"plain").unwrap();
    assert_eq!(s.split_on(b","), [DynBytes::from(b"plain")]);
}

#[test]
fn split_args_handles_quotes_and_escapes() {
    let args = DynBytes::split_args(b"get \"a \\x41 b\" 'single \\' quote' bare").unwrap();
    assert_eq!(args.len(), 4);
    assert_eq!(args[0], b"get"[..]);
    assert_eq!(args[1], b"a A b"[..]);
    assert_eq!(args[2], b"single ' quote"[..]);
    assert_eq!(args[3], b"bare"[..]);
}

#[test]
fn split_args_rejects_malformed_lines() {
    assert!(DynBytes::split_args(b"\"unterminated").is_none());
    assert!(DynBytes::split_args(b"'unterminated").is_none());
    assert!(DynBytes::split_args(b"\"glued\"tail").is_none());
    assert!(DynBytes::split_args(b"   ").unwrap().is_empty());
}

#[test]
fn map_bytes_rewrites_in_place() {
    let mut s = DynBytes::new(b"abcabc").unwrap();
    let addr = s.as_ptr();
    s.map_bytes(b"ab", b"AB");
    assert_eq!(s, b"ABcABc"[..]);
    assert_eq!(s.as_ptr(), addr);
}

#[test]
fn slice_methods_apply_through_deref() {
    let mut s = DynBytes::new(b"Hello, World\x01").unwrap();
    s.make_ascii_lowercase();
    assert_eq!(s, b"hello, world\x01"[..]);

    s.make_ascii_uppercase();
    assert_eq!(s, b"HELLO, WORLD\x01"[..]);
    assert!(s.contains(&b','));
}

#[test]
fn works_as_a_hash_map_key_via_borrow() {
    use std::collections::HashMap;

    let mut map: HashMap<DynBytes, i32> = HashMap::new();
    map.insert(DynBytes::from(b"key\0with zero"), 7);

    // lookup by borrowed slice, no allocation
    assert_eq!(map.get(b"key\0with zero".as_slice()), Some(&7));
    assert_eq!(map.get(b"other".as_slice()), None);
}

#[test]
fn debug_output_escapes_non_printable_bytes() {
    let s = DynBytes::new(b"ab\0\n").unwrap();
    assert_eq!(format!("{s:?}"), "DynBytes(\"ab\\x00\\n\")");
}
