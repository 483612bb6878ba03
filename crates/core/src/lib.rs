//! Core value model, codecs and key descriptors for `prefkit`.
//!
//! ## Key Components
//!
//! - **`value`**: [`StorageValue`], the closed set of kinds a backend persists,
//!   and [`RawValue`], the untyped escape used for mixed containers.
//! - **`number`**: [`NumberBox`], a number that lost its original width.
//! - **`kind`**: [`StorageKind`], the bridge between Rust types and stored kinds.
//! - **`codec`**: the [`Codec`] trait, its composition and the built-in codecs.
//! - **`key`**: [`KeyDescriptor`] and its optional and defaulted forms.

pub mod codec;
pub mod errors;
pub mod key;
pub mod kind;
pub mod number;
pub mod value;

pub use self::{
    codec::{Atomic, Codec, FnCodec, Pipeline},
    errors::{Error, Result},
    key::{DefaultedKey, KeyDescriptor, OptionalKey, StoredOf, ValueOf},
    kind::StorageKind,
    number::{Number, NumberBox, NumberTag},
    value::{RawDict, RawValue, StorageValue, Timestamp, ValueKind},
};
