//! Optional integrations with third-party crates, each behind the feature
//! flag of the same name.

#[cfg(feature = "serde")]
mod serde;
