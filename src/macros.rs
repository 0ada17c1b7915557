/// Formats arguments into a new [`DynBytes`](crate::DynBytes), the way
/// [`format!`] builds a [`String`].
///
/// # Examples
/// ```
/// use dynbytes::format_bytes;
///
/// let greeting = format_bytes!("hello {}", "world");
/// assert_eq!(greeting, b"hello world"[..]);
/// ```
#[macro_export]
macro_rules! format_bytes {
    ($($arg:tt)*) => {{
        use ::core::fmt::Write;
        let mut buf = $crate::DynBytes::default();
        ::core::write!(&mut buf, $($arg)*)
            .expect("a formatting trait implementation returned an error");
        buf
    }};
}
