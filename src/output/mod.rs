//! Control over how fragments are written.
//!
//! [`xml::Parameters`] controls escaping, attribute handling and pretty
//! printing. [`Output`] tokens let you render a
//! [`Fragment`](crate::Fragment) yourself.
mod common;
#[cfg(feature = "icu")]
mod icu_normalization;
mod normalizer;
mod pretty;
mod serializer;
pub mod xml;
mod xml_serializer;

pub use common::Indentation;
#[cfg(feature = "icu")]
pub use icu_normalization::Nfc;
pub use normalizer::{NoopNormalizer, Normalizer};
pub(crate) use pretty::Pretty;
pub use pretty::PrettyOutputToken;
pub(crate) use serializer::gen_outputs;
pub use serializer::{Output, OutputToken};
pub(crate) use xml_serializer::XmlSerializer;
