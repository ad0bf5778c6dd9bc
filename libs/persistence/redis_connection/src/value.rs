use std::ops::{Deref, DerefMut};

use deadpool_redis::redis::{
    ErrorKind, FromRedisValue, RedisError, RedisResult, RedisWrite,
    ToRedisArgs, Value,
};
use serde::{Deserialize, Serialize};

/// Wrapper marking a value that travels through Redis as a JSON bulk
/// string. Serialization happens on write, deserialization on read; a
/// payload that fails to deserialize surfaces as a [`RedisError`] of kind
/// `TypeError`, which read-through callers fold into a cache miss.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn new(value: T) -> Self { Self(value) }

    pub fn inner(self) -> T { self.0 }

    pub fn as_inner(&self) -> &T { &self.0 }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self { Json(value) }
}

impl<T> ToRedisArgs for Json<T>
where
    T: Serialize,
{
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => out.write_arg(&bytes),
            Err(_) => out.write_arg(b""),
        }
    }
}

impl<T> FromRedisValue for Json<T>
where
    T: for<'de> Deserialize<'de>,
{
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        let Value::BulkString(data) = v
        else {
            return Err(RedisError::from((
                ErrorKind::TypeError,
                "Expected bulk string for JSON",
            )));
        };
        let payload = serde_json::from_slice(data).map_err(|err| {
            RedisError::from((
                ErrorKind::TypeError,
                "Cannot deserialize JSON payload",
                err.to_string(),
            ))
        })?;

        Ok(Self(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(
        Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize,
    )]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_json_round_trip() {
        let value = Json(Sample {
            name: "hello".into(),
            count: 7,
        });

        let mut args = Vec::new();
        value.write_redis_args(&mut args);
        assert_eq!(args.len(), 1);

        let raw = Value::BulkString(args.into_iter().next().unwrap());
        let decoded: Json<Sample> = Json::from_redis_value(&raw).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_json_rejects_non_bulk_string() {
        let decoded = Json::<Sample>::from_redis_value(&Value::Nil);
        assert!(decoded.is_err());
    }
}
