use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Write};

pub trait Packable {
    /// Serialize the object body, without the `<type> <size>\0` header
    fn serialize_body(&self) -> Result<Bytes>;

    /// Serialize the full loose-object form, header included
    fn serialize(&self) -> Result<Bytes>
    where
        Self: Object,
    {
        let body = self.serialize_body()?;

        let mut object_bytes = Vec::with_capacity(body.len() + 32);
        write!(object_bytes, "{} {}\0", self.object_type().as_str(), body.len())?;
        object_bytes.write_all(&body)?;

        Ok(Bytes::from(object_bytes))
    }
}

pub trait Unpackable {
    /// Parse an object body; the header has already been consumed
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId>
    where
        Self: Sized,
    {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}
