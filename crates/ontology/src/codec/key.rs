//! JSON-LD key space.
//!
//! Every record's keys are the three reserved graph keywords plus the
//! record's own attribute names. [`SemanticKey`] merges the two so a record
//! declares only its attributes.

use std::fmt;

/// Reserved keyword for the vocabulary context.
pub const CONTEXT_KEY: &str = "@context";
/// Reserved keyword for the type tag.
pub const TYPE_KEY: &str = "@type";
/// Reserved keyword for the node identifier.
pub const ID_KEY: &str = "@id";

/// A record's attribute names.
///
/// Implement with [`attribute_keys!`](crate::attribute_keys), which also
/// rejects names starting with `@` at compile time.
pub trait AttributeKey: Copy + Eq + fmt::Debug + 'static {
    /// The JSON member name.
    fn as_str(&self) -> &'static str;

    /// Parses a JSON member name.
    fn parse(name: &str) -> Option<Self>;
}

/// A key in a JSON-LD node: a reserved keyword or a record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticKey<K> {
    Context,
    Type,
    Id,
    Attribute(K),
}

impl<K: AttributeKey> SemanticKey<K> {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticKey::Context => CONTEXT_KEY,
            SemanticKey::Type => TYPE_KEY,
            SemanticKey::Id => ID_KEY,
            SemanticKey::Attribute(key) => key.as_str(),
        }
    }

    /// Parses a member name. Reserved keywords are matched first and
    /// case-sensitively; `None` means the name belongs to neither set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            CONTEXT_KEY => Some(SemanticKey::Context),
            TYPE_KEY => Some(SemanticKey::Type),
            ID_KEY => Some(SemanticKey::Id),
            _ => K::parse(name).map(SemanticKey::Attribute),
        }
    }
}

impl<K: AttributeKey> From<K> for SemanticKey<K> {
    fn from(key: K) -> Self {
        SemanticKey::Attribute(key)
    }
}

impl<K: AttributeKey> fmt::Display for SemanticKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[doc(hidden)]
pub const fn is_reserved_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    !bytes.is_empty() && bytes[0] == b'@'
}

/// Declares an attribute key enum and its [`AttributeKey`] impl.
///
/// ```
/// ontology::attribute_keys! {
///     pub enum AddressKey {
///         Street = "streetAddress",
///         Locality = "addressLocality",
///     }
/// }
/// ```
#[macro_export]
macro_rules! attribute_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant ),+
        }

        const _: () = {
            $( assert!(
                !$crate::codec::key::is_reserved_name($text),
                "attribute names must not start with '@'"
            ); )+
        };

        impl $crate::codec::AttributeKey for $name {
            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            fn parse(name: &str) -> Option<Self> {
                match name {
                    $( $text => Some($name::$variant), )+
                    _ => None,
                }
            }
        }
    };
}
