//! Values paired with the spans they were read from.
//!
//! Equality and hashing look at `value` only. Two wrappers read from
//! different places in a document compare equal when their values do.

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use oas_span::SourceSpan;

/// A mapping key whose text carries meaning: an extension name, a path
/// template, a property name.
#[derive(Debug, Clone)]
pub struct KeySource<T> {
    pub value: T,
    pub span: SourceSpan,
}

/// A value without a distinguished key, such as a sequence item or the value
/// side of a patterned map entry.
#[derive(Debug, Clone)]
pub struct ValueSource<T> {
    pub value: T,
    pub span: SourceSpan,
}

/// A named field of an object.
///
/// `key_span` covers the key token and `value_span` the whole value. Built
/// once per field and never rewrapped.
#[derive(Debug, Clone)]
pub struct FieldSource<T> {
    pub value: T,
    pub key_span: SourceSpan,
    pub value_span: SourceSpan,
    pub field_name: &'static str,
}

impl<T> KeySource<T> {
    pub fn new(value: T, span: SourceSpan) -> Self {
        Self { value, span }
    }
}

impl<T> ValueSource<T> {
    pub fn new(value: T, span: SourceSpan) -> Self {
        Self { value, span }
    }
}

impl<T> FieldSource<T> {
    pub fn new(
        value: T,
        key_span: SourceSpan,
        value_span: SourceSpan,
        field_name: &'static str,
    ) -> Self {
        Self { value, key_span, value_span, field_name }
    }

    /// Span from the start of the key to the end of the value.
    pub fn span(&self) -> SourceSpan {
        self.key_span.cover(self.value_span)
    }
}

macro_rules! value_identity {
    ($($wrapper:ident),*) => {$(
        impl<T: PartialEq> PartialEq for $wrapper<T> {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl<T: Eq> Eq for $wrapper<T> {}

        impl<T: Hash> Hash for $wrapper<T> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.value.hash(state);
            }
        }
    )*};
}

value_identity!(KeySource, ValueSource, FieldSource);

impl Borrow<str> for KeySource<String> {
    fn borrow(&self) -> &str {
        &self.value
    }
}
