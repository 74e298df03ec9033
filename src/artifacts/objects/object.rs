use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    // the header only feeds the digest, it is never written to disk
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let header = format!("{} {}\0", self.object_type().as_str(), content.len());

        let mut hasher = Sha1::new();
        hasher.update(header.as_bytes());
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}
