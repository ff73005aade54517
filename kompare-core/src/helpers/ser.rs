//! Serialize Rust values into a [`Value`] tree.
//!
//! Structs become records named after the struct, so two different struct
//! types never compare equal even when their fields match. Tuples and tuple
//! structs become tuples, sequences become lists, maps become maps.

use serde::ser::{self, Impossible, Serialize};

use crate::types::{Key, KompareError, Record, Value};

/// Serialize any value into a comparable [`Value`].
///
/// Fails only for map keys that are not strings, integers, booleans or unit
/// enum variants, and for 128-bit integers that do not fit in 64 bits.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, KompareError> {
    value.serialize(ValueSerializer)
}

/// Serializer producing a [`Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer;

fn variant_name(name: &str, variant: &str) -> String {
    format!("{}::{}", name, variant)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = KompareError;

    type SerializeSeq = SerializeItems;
    type SerializeTuple = SerializeItems;
    type SerializeTupleStruct = SerializeItems;
    type SerializeTupleVariant = SerializeFields;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeFields;
    type SerializeStructVariant = SerializeFields;

    fn serialize_bool(self, v: bool) -> Result<Value, KompareError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, KompareError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, KompareError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, KompareError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, KompareError> {
        Ok(Value::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, KompareError> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| KompareError::serialize(format!("integer {} does not fit in i64", v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, KompareError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, KompareError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, KompareError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, KompareError> {
        Ok(Value::UInt(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, KompareError> {
        u64::try_from(v)
            .map(Value::UInt)
            .map_err(|_| KompareError::serialize(format!("integer {} does not fit in u64", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, KompareError> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, KompareError> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, KompareError> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, KompareError> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, KompareError> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value, KompareError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, KompareError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, KompareError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, KompareError> {
        Ok(Value::Record(Record::new(name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, KompareError> {
        Ok(Value::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, KompareError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, KompareError> {
        let record = Record::new(variant_name(name, variant)).field("0", to_value(value)?);
        Ok(Value::Record(record))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeItems, KompareError> {
        Ok(SerializeItems::new(len, false))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeItems, KompareError> {
        Ok(SerializeItems::new(Some(len), true))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeItems, KompareError> {
        Ok(SerializeItems::new(Some(len), true))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeFields, KompareError> {
        Ok(SerializeFields::new(variant_name(name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap, KompareError> {
        Ok(SerializeMap::default())
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<SerializeFields, KompareError> {
        Ok(SerializeFields::new(name.to_string()))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeFields, KompareError> {
        Ok(SerializeFields::new(variant_name(name, variant)))
    }
}

/// Collects sequence and tuple elements.
pub struct SerializeItems {
    items: Vec<Value>,
    tuple: bool,
}

impl SerializeItems {
    fn new(len: Option<usize>, tuple: bool) -> Self {
        Self {
            items: Vec::with_capacity(len.unwrap_or(0)),
            tuple,
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), KompareError> {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        if self.tuple {
            Value::Tuple(self.items)
        } else {
            Value::List(self.items)
        }
    }
}

impl ser::SerializeSeq for SerializeItems {
    type Ok = Value;
    type Error = KompareError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), KompareError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, KompareError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeItems {
    type Ok = Value;
    type Error = KompareError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), KompareError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, KompareError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeItems {
    type Ok = Value;
    type Error = KompareError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), KompareError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, KompareError> {
        Ok(self.finish())
    }
}

/// Collects named fields into a record. Tuple variants use positional names.
pub struct SerializeFields {
    record: Record,
}

impl SerializeFields {
    fn new(name: String) -> Self {
        Self {
            record: Record::new(name),
        }
    }
}

impl ser::SerializeStruct for SerializeFields {
    type Ok = Value;
    type Error = KompareError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), KompareError> {
        self.record.push(key, to_value(value)?);
        Ok(())
    }

    fn skip_field(&mut self, _key: &'static str) -> Result<(), KompareError> {
        Ok(())
    }

    fn end(self) -> Result<Value, KompareError> {
        Ok(Value::Record(self.record))
    }
}

impl ser::SerializeStructVariant for SerializeFields {
    type Ok = Value;
    type Error = KompareError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), KompareError> {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Value, KompareError> {
        Ok(Value::Record(self.record))
    }
}

impl ser::SerializeTupleVariant for SerializeFields {
    type Ok = Value;
    type Error = KompareError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), KompareError> {
        let position = self.record.len().to_string();
        self.record.push(position, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, KompareError> {
        Ok(Value::Record(self.record))
    }
}

/// Collects map entries.
#[derive(Default)]
pub struct SerializeMap {
    entries: std::collections::BTreeMap<Key, Value>,
    pending: Option<Key>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = KompareError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), KompareError> {
        self.pending = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), KompareError> {
        let key = self
            .pending
            .take()
            .ok_or_else(|| KompareError::serialize("map value serialized before its key"))?;
        self.entries.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, KompareError> {
        Ok(Value::Map(self.entries))
    }
}

/// Serializer for map keys.
struct KeySerializer;

fn unsupported(found: &str) -> KompareError {
    KompareError::unsupported_key(found)
}

impl ser::Serializer for KeySerializer {
    type Ok = Key;
    type Error = KompareError;

    type SerializeSeq = Impossible<Key, KompareError>;
    type SerializeTuple = Impossible<Key, KompareError>;
    type SerializeTupleStruct = Impossible<Key, KompareError>;
    type SerializeTupleVariant = Impossible<Key, KompareError>;
    type SerializeMap = Impossible<Key, KompareError>;
    type SerializeStruct = Impossible<Key, KompareError>;
    type SerializeStructVariant = Impossible<Key, KompareError>;

    fn serialize_bool(self, v: bool) -> Result<Key, KompareError> {
        Ok(Key::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Key, KompareError> {
        Ok(Key::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Key, KompareError> {
        Ok(Key::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Key, KompareError> {
        Ok(Key::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Key, KompareError> {
        Ok(Key::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Key, KompareError> {
        Ok(Key::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Key, KompareError> {
        Ok(Key::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Key, KompareError> {
        Ok(Key::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Key, KompareError> {
        i64::try_from(v)
            .map(Key::Int)
            .map_err(|_| unsupported("integer larger than i64"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Key, KompareError> {
        Err(unsupported("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Key, KompareError> {
        Err(unsupported("float"))
    }

    fn serialize_char(self, v: char) -> Result<Key, KompareError> {
        Ok(Key::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Key, KompareError> {
        Ok(Key::Str(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Key, KompareError> {
        Err(unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<Key, KompareError> {
        Err(unsupported("none"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Key, KompareError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Key, KompareError> {
        Err(unsupported("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Key, KompareError> {
        Err(unsupported(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Key, KompareError> {
        Ok(Key::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Key, KompareError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Key, KompareError> {
        Err(unsupported(&variant_name(name, variant)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, KompareError> {
        Err(unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, KompareError> {
        Err(unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, KompareError> {
        Err(unsupported(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, KompareError> {
        Err(unsupported(&variant_name(name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, KompareError> {
        Err(unsupported("map"))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, KompareError> {
        Err(unsupported(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, KompareError> {
        Err(unsupported(&variant_name(name, variant)))
    }
}
