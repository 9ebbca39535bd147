//! # Serde module for HyperLogLog
//!
//! `HyperLogLog` is serialized as a tuple `(b, registers)`, where `registers` holds
//! `2^b` register ranks in index order.
//!
//! During deserialization the tuple is validated by `HyperLogLog::from_registers`, so
//! malformed input (unsupported precision, wrong register count, out of range rank)
//! is rejected instead of producing an estimator with broken invariants.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::hyperloglog::HyperLogLog;

impl Serialize for HyperLogLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.b())?;
        tup.serialize_element(self.registers())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for HyperLogLog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (b, registers): (u8, Vec<u8>) = Deserialize::deserialize(deserializer)?;
        HyperLogLog::from_registers(b, registers).map_err(Error::custom)
    }
}
