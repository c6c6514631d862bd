use crate::artifacts::log::HistoryError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::trace;

/// Annotated tags pointing at tags are followed at most this many times
const MAX_TAG_CHAIN: usize = 16;

/// Loose-object store under `.git/objects`
///
/// Inflated objects are cached by id; objects are immutable so the cache never needs
/// invalidating.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    cache: RwLock<HashMap<ObjectId, Bytes>>,
}

// TODO: read pack files so repositories fresh from `git clone` or `git gc` work
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Inflated object bytes, header included
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        if let Ok(cache) = self.cache.read()
            && let Some(content) = cache.get(object_id)
        {
            return Ok(content.clone());
        }

        let object_path = self.path.join(object_id.to_path());
        if !object_path.exists() {
            return Err(HistoryError::ObjectNotFound(object_id.clone()).into());
        }

        trace!(object = %object_id, "reading loose object");
        let content = self
            .read_object(object_path)
            .with_context(|| format!("Unable to load object {object_id}"))?;

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(object_id.clone(), content.clone());
        }

        Ok(content)
    }

    pub fn store(&self, object: impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());
        let object_content = object.serialize()?;

        // write the object to disk unless it already exists
        // otherwise, create the object directory
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object_content)?;
        }

        Ok(object_id)
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => Tree::deserialize(object_reader)
                .with_context(|| format!("Invalid tree object {object_id}")),
            actual => Err(HistoryError::UnexpectedObjectType {
                oid: object_id.clone(),
                expected: ObjectType::Tree,
                actual,
            }
            .into()),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader)
                .with_context(|| format!("Invalid commit object {object_id}")),
            actual => Err(HistoryError::UnexpectedObjectType {
                oid: object_id.clone(),
                expected: ObjectType::Commit,
                actual,
            }
            .into()),
        }
    }

    /// Follow annotated tags until a non-tag object is reached
    pub fn peel(&self, object_id: &ObjectId) -> anyhow::Result<ObjectId> {
        let mut current = object_id.clone();

        for _ in 0..MAX_TAG_CHAIN {
            let (object_type, object_reader) = self.parse_object_as_bytes(&current)?;
            if object_type != ObjectType::Tag {
                return Ok(current);
            }

            current = Self::tag_target(object_reader)
                .with_context(|| format!("Invalid tag object {current}"))?;
        }

        Err(anyhow::anyhow!("tag chain starting at {object_id} is too long"))
    }

    fn tag_target(reader: impl BufRead) -> anyhow::Result<ObjectId> {
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                break;
            }
            if let Some(target) = line.strip_prefix("object ") {
                return ObjectId::try_parse(target.to_string());
            }
        }

        Err(anyhow::anyhow!("missing object line"))
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead + use<>)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, _) = ObjectType::parse_header(&mut object_reader)
            .with_context(|| format!("Invalid object header in {object_id}"))?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        // read the object file
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose id starts with `prefix`
    ///
    /// Used to expand abbreviated ids. More than one match means the prefix is
    /// ambiguous; the caller decides how to report that.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        let dirs = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255u8).map(|i| format!("{i:02x}")).collect()
        };

        for dir_name in dirs {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let full_oid = format!("{}{}", dir_name, entry.file_name().to_string_lossy());

                if full_oid.starts_with(&prefix)
                    && let Ok(oid) = ObjectId::try_parse(full_oid)
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }
}
