//! JSON-LD encoding and decoding.
//!
//! [`Record`] is the protocol every node type implements; [`encode`] and
//! [`decode`] are the document entry points. Reserved keywords are handled by
//! [`SemanticKey`], field access by [`NodeReader`] and [`NodeWriter`].

pub mod datetime;
pub mod key;
pub mod primitives;
pub mod quantity;
pub mod record;

pub use datetime::DateTimeKey;
pub use key::{AttributeKey, SemanticKey, CONTEXT_KEY, ID_KEY, TYPE_KEY};
pub use primitives::{NodeReader, NodeWriter};
pub use quantity::{Measured, QuantitativeValueKey};
pub use record::{
    decode, decode_embedded, decode_node, encode, encode_embedded, encode_node, from_json_str,
    to_json_string, Embedded, EncodingContext, Record, ROOT_PATH, SCHEMA_ORG_CONTEXT,
};
