//! Node-level reading and writing of JSON-LD objects.
//!
//! [`NodeWriter`] and [`NodeReader`] wrap one JSON object and expose typed
//! accessors keyed by a record's attribute enum, tracking the JSON path and
//! nesting depth so nested records are written and reported correctly.

use std::marker::PhantomData;

use log::{debug, warn};
use serde_json::{Map, Number, Value};

use crate::codec::key::{AttributeKey, SemanticKey, ID_KEY, TYPE_KEY};
use crate::codec::record::{
    decode_embedded, encode_embedded, Embedded, EncodingContext, Record, SCHEMA_ORG_CONTEXT,
};
use crate::error::{json_kind, DecodeError, EncodeError};
use crate::model::{QuantitativeValue, Timestamp};

// =============================================================================
// DECODING
// =============================================================================

/// Reader over one JSON-LD node.
///
/// Members that are neither reserved keywords nor attributes of `K` are
/// ignored. A `null` member reads the same as an absent one.
#[derive(Debug, Clone)]
pub struct NodeReader<'a, K> {
    map: &'a Map<String, Value>,
    path: String,
    _key: PhantomData<K>,
}

impl<'a, K: AttributeKey> NodeReader<'a, K> {
    /// Creates a reader for the object at `path`.
    pub fn new(value: &'a Value, path: &str) -> Result<Self, DecodeError> {
        let map = value.as_object().ok_or_else(|| DecodeError::NotAnObject {
            found: json_kind(value),
            path: path.to_string(),
        })?;
        for name in map.keys() {
            if SemanticKey::<K>::parse(name).is_none() {
                debug!("ignoring unrecognized key {:?} at {}", name, path);
            }
        }
        Ok(Self {
            map,
            path: path.to_string(),
            _key: PhantomData,
        })
    }

    /// Returns the JSON path of this node.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn member_path(&self, name: &str) -> String {
        format!("{}.{}", self.path, name)
    }

    fn get(&self, key: SemanticKey<K>) -> Option<&'a Value> {
        self.map.get(key.as_str()).filter(|v| !v.is_null())
    }

    fn require(&self, key: K) -> Result<&'a Value, DecodeError> {
        self.get(SemanticKey::Attribute(key))
            .ok_or_else(|| DecodeError::MissingField {
                key: key.as_str(),
                path: self.path.clone(),
            })
    }

    /// Returns true if the attribute is present and not `null`.
    pub fn has(&self, key: K) -> bool {
        self.get(SemanticKey::Attribute(key)).is_some()
    }

    /// Reads `@type`.
    pub fn type_tag(&self) -> Result<&'a str, DecodeError> {
        let value = self
            .get(SemanticKey::Type)
            .ok_or_else(|| DecodeError::MissingField {
                key: TYPE_KEY,
                path: self.path.clone(),
            })?;
        value.as_str().ok_or_else(|| DecodeError::InvalidField {
            expected: "a string",
            found: json_kind(value),
            path: self.member_path(TYPE_KEY),
        })
    }

    /// Fails unless `@type` is exactly `expected`.
    pub fn expect_type(&self, expected: &str) -> Result<(), DecodeError> {
        let found = self.type_tag()?;
        if found != expected {
            return Err(DecodeError::TypeTagMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    /// Reads `@id`.
    pub fn read_id(&self) -> Result<Option<String>, DecodeError> {
        self.get(SemanticKey::Id)
            .map(|v| as_string(v, self.member_path(ID_KEY)))
            .transpose()
    }

    pub fn read_string(&self, key: K) -> Result<String, DecodeError> {
        as_string(self.require(key)?, self.member_path(key.as_str()))
    }

    pub fn read_opt_string(&self, key: K) -> Result<Option<String>, DecodeError> {
        self.opt(key, as_string)
    }

    /// Reads an array of strings. A single string reads as a one-element
    /// array.
    pub fn read_opt_strings(&self, key: K) -> Result<Option<Vec<String>>, DecodeError> {
        self.list(key, as_string)
    }

    pub fn read_f64(&self, key: K) -> Result<f64, DecodeError> {
        as_f64(self.require(key)?, self.member_path(key.as_str()))
    }

    pub fn read_opt_f64(&self, key: K) -> Result<Option<f64>, DecodeError> {
        self.opt(key, as_f64)
    }

    pub fn read_i64(&self, key: K) -> Result<i64, DecodeError> {
        as_i64(self.require(key)?, self.member_path(key.as_str()))
    }

    pub fn read_opt_i64(&self, key: K) -> Result<Option<i64>, DecodeError> {
        self.opt(key, as_i64)
    }

    pub fn read_bool(&self, key: K) -> Result<bool, DecodeError> {
        as_bool(self.require(key)?, self.member_path(key.as_str()))
    }

    /// Returns the raw member and its path, for shapes with no typed reader.
    pub fn read_value(&self, key: K) -> Result<(&'a Value, String), DecodeError> {
        Ok((self.require(key)?, self.member_path(key.as_str())))
    }

    /// Reads a timestamp in either the object or the bare string shape.
    pub fn read_timestamp(&self, key: K) -> Result<Timestamp, DecodeError> {
        self.read_record(key)
    }

    pub fn read_opt_timestamp(&self, key: K) -> Result<Option<Timestamp>, DecodeError> {
        self.read_opt_record(key)
    }

    /// Reads a nested record, checking its type tag.
    pub fn read_record<R: Record>(&self, key: K) -> Result<R, DecodeError> {
        R::from_value(self.require(key)?, &self.member_path(key.as_str()))
    }

    pub fn read_opt_record<R: Record>(&self, key: K) -> Result<Option<R>, DecodeError> {
        self.opt(key, |v, path| R::from_value(v, &path))
    }

    /// Reads an array of nested records. A single object reads as a
    /// one-element array.
    pub fn read_opt_records<R: Record>(&self, key: K) -> Result<Option<Vec<R>>, DecodeError> {
        self.list(key, |v, path| R::from_value(v, &path))
    }

    /// Reads an untyped nested object.
    pub fn read_embedded<E: Embedded>(&self, key: K) -> Result<E, DecodeError> {
        decode_embedded(self.require(key)?, &self.member_path(key.as_str()))
    }

    pub fn read_opt_embedded<E: Embedded>(&self, key: K) -> Result<Option<E>, DecodeError> {
        self.opt(key, |v, path| decode_embedded(v, &path))
    }

    /// Reads an array of untyped nested objects. A missing member is an
    /// error; a single object reads as a one-element array.
    pub fn read_embedded_list<E: Embedded>(&self, key: K) -> Result<Vec<E>, DecodeError> {
        self.require(key)?;
        Ok(self
            .list(key, |v, path| decode_embedded(v, &path))?
            .unwrap_or_default())
    }

    /// Reads a percentage as a ratio.
    ///
    /// A quantitative value with a unit code other than percent reads as
    /// absent.
    pub fn read_opt_percentage(&self, key: K) -> Result<Option<f64>, DecodeError> {
        let Some(value) = self.read_opt_record::<QuantitativeValue>(key)? else {
            return Ok(None);
        };
        let ratio = value.ratio();
        if ratio.is_none() {
            warn!(
                "expected a percentage at {}, found unit code {:?}",
                self.member_path(key.as_str()),
                value.unit_code
            );
        }
        Ok(ratio)
    }

    fn opt<T>(
        &self,
        key: K,
        read: impl Fn(&'a Value, String) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        self.get(SemanticKey::Attribute(key))
            .map(|v| read(v, self.member_path(key.as_str())))
            .transpose()
    }

    fn list<T>(
        &self,
        key: K,
        read: impl Fn(&'a Value, String) -> Result<T, DecodeError>,
    ) -> Result<Option<Vec<T>>, DecodeError> {
        let path = self.member_path(key.as_str());
        match self.get(SemanticKey::Attribute(key)) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| read(item, format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(single) => Ok(Some(vec![read(single, path)?])),
        }
    }
}

fn as_string(value: &Value, path: String) -> Result<String, DecodeError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DecodeError::InvalidField {
            expected: "a string",
            found: json_kind(value),
            path,
        })
}

fn as_f64(value: &Value, path: String) -> Result<f64, DecodeError> {
    value.as_f64().ok_or_else(|| DecodeError::InvalidField {
        expected: "a number",
        found: json_kind(value),
        path,
    })
}

fn as_bool(value: &Value, path: String) -> Result<bool, DecodeError> {
    value.as_bool().ok_or_else(|| DecodeError::InvalidField {
        expected: "a boolean",
        found: json_kind(value),
        path,
    })
}

fn as_i64(value: &Value, path: String) -> Result<i64, DecodeError> {
    value.as_i64().ok_or_else(|| DecodeError::InvalidField {
        expected: "an integer",
        found: json_kind(value),
        path,
    })
}

// =============================================================================
// ENCODING
// =============================================================================

fn schema_org_context() -> Value {
    Value::String(SCHEMA_ORG_CONTEXT.to_string())
}

/// Writer for one JSON-LD node.
///
/// `@context` is written only at depth zero, followed by `@type`; attributes
/// follow in the order they are written. Nested records are written one
/// level deeper.
#[derive(Debug)]
pub struct NodeWriter<'c, K> {
    map: Map<String, Value>,
    ctx: &'c EncodingContext,
    depth: usize,
    path: String,
    _key: PhantomData<K>,
}

impl<'c, K: AttributeKey> NodeWriter<'c, K> {
    /// Starts a node with the given type tag and the schema.org context.
    pub fn new(ctx: &'c EncodingContext, depth: usize, path: &str, type_tag: &str) -> Self {
        Self::with_context(ctx, depth, path, type_tag, schema_org_context)
    }

    /// Starts a node with the given type tag. `context` is only called at
    /// depth zero.
    pub fn with_context(
        ctx: &'c EncodingContext,
        depth: usize,
        path: &str,
        type_tag: &str,
        context: fn() -> Value,
    ) -> Self {
        let mut node = Self::untyped(ctx, depth, path);
        if depth == 0 {
            node.put(SemanticKey::Context, context());
        }
        node.put(SemanticKey::Type, Value::String(type_tag.to_string()));
        node
    }

    /// Starts a node with neither `@context` nor `@type`.
    pub fn untyped(ctx: &'c EncodingContext, depth: usize, path: &str) -> Self {
        Self {
            map: Map::new(),
            ctx,
            depth,
            path: path.to_string(),
            _key: PhantomData,
        }
    }

    pub fn context(&self) -> &'c EncodingContext {
        self.ctx
    }

    /// Nesting depth; zero for the document root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn member_path(&self, key: K) -> String {
        format!("{}.{}", self.path, key.as_str())
    }

    fn put(&mut self, key: SemanticKey<K>, value: Value) {
        self.map.insert(key.as_str().to_string(), value);
    }

    pub fn write_id(&mut self, id: &str) {
        self.put(SemanticKey::Id, Value::String(id.to_string()));
    }

    pub fn write_string(&mut self, key: K, value: &str) {
        self.put(key.into(), Value::String(value.to_string()));
    }

    pub fn write_opt_string(&mut self, key: K, value: Option<&str>) {
        if let Some(value) = value {
            self.write_string(key, value);
        }
    }

    pub fn write_strings(&mut self, key: K, values: &[String]) {
        let items = values.iter().cloned().map(Value::String).collect();
        self.put(key.into(), Value::Array(items));
    }

    pub fn write_opt_strings(&mut self, key: K, values: Option<&[String]>) {
        if let Some(values) = values {
            self.write_strings(key, values);
        }
    }

    /// Writes a number. NaN and infinities have no JSON form.
    pub fn write_f64(&mut self, key: K, value: f64) -> Result<(), EncodeError> {
        let number = Number::from_f64(value).ok_or_else(|| EncodeError::NonFiniteNumber {
            value,
            path: self.member_path(key),
        })?;
        self.put(key.into(), Value::Number(number));
        Ok(())
    }

    pub fn write_opt_f64(&mut self, key: K, value: Option<f64>) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.write_f64(key, value),
            None => Ok(()),
        }
    }

    pub fn write_i64(&mut self, key: K, value: i64) {
        self.put(key.into(), Value::Number(value.into()));
    }

    pub fn write_opt_i64(&mut self, key: K, value: Option<i64>) {
        if let Some(value) = value {
            self.write_i64(key, value);
        }
    }

    pub fn write_bool(&mut self, key: K, value: bool) {
        self.put(key.into(), Value::Bool(value));
    }

    /// Writes a raw member, for shapes with no typed writer.
    pub fn write_value(&mut self, key: K, value: Value) {
        self.put(key.into(), value);
    }

    /// Writes a timestamp as a bare ISO 8601 string.
    pub fn write_timestamp(&mut self, key: K, value: &Timestamp) {
        self.put(key.into(), Value::String(value.format(self.ctx)));
    }

    pub fn write_opt_timestamp(&mut self, key: K, value: Option<&Timestamp>) {
        if let Some(value) = value {
            self.write_timestamp(key, value);
        }
    }

    /// Writes a nested record without `@context`.
    pub fn write_record<R: Record>(&mut self, key: K, value: &R) -> Result<(), EncodeError> {
        let node = value.to_value(self.ctx, self.depth + 1, &self.member_path(key))?;
        self.put(key.into(), node);
        Ok(())
    }

    pub fn write_opt_record<R: Record>(
        &mut self,
        key: K,
        value: Option<&R>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.write_record(key, value),
            None => Ok(()),
        }
    }

    pub fn write_records<R: Record>(&mut self, key: K, values: &[R]) -> Result<(), EncodeError> {
        let path = self.member_path(key);
        let items = values
            .iter()
            .enumerate()
            .map(|(i, v)| v.to_value(self.ctx, self.depth + 1, &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>, _>>()?;
        self.put(key.into(), Value::Array(items));
        Ok(())
    }

    pub fn write_opt_records<R: Record>(
        &mut self,
        key: K,
        values: Option<&[R]>,
    ) -> Result<(), EncodeError> {
        match values {
            Some(values) => self.write_records(key, values),
            None => Ok(()),
        }
    }

    /// Writes an untyped nested object.
    pub fn write_embedded<E: Embedded>(&mut self, key: K, value: &E) -> Result<(), EncodeError> {
        let node = encode_embedded(value, self.ctx, self.depth + 1, &self.member_path(key))?;
        self.put(key.into(), node);
        Ok(())
    }

    pub fn write_opt_embedded<E: Embedded>(
        &mut self,
        key: K,
        value: Option<&E>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.write_embedded(key, value),
            None => Ok(()),
        }
    }

    pub fn write_embedded_list<E: Embedded>(
        &mut self,
        key: K,
        values: &[E],
    ) -> Result<(), EncodeError> {
        let path = self.member_path(key);
        let items = values
            .iter()
            .enumerate()
            .map(|(i, v)| encode_embedded(v, self.ctx, self.depth + 1, &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>, _>>()?;
        self.put(key.into(), Value::Array(items));
        Ok(())
    }

    /// Writes a ratio as a percent `QuantitativeValue`.
    pub fn write_percentage(&mut self, key: K, ratio: f64) -> Result<(), EncodeError> {
        self.write_record(key, &QuantitativeValue::percentage(ratio))
    }

    pub fn write_opt_percentage(&mut self, key: K, ratio: Option<f64>) -> Result<(), EncodeError> {
        match ratio {
            Some(ratio) => self.write_percentage(key, ratio),
            None => Ok(()),
        }
    }

    /// Consumes the writer and returns the node.
    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}
