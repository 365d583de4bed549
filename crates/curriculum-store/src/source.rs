//! Curriculum sources: where raw documents come from.
//!
//! The pipeline only talks to the [`CurriculumSource`] trait. The bulk reads
//! issue every request at once and stop at the first failure; nothing is
//! aggregated and no partial result is returned.

use crate::raw::{RawBlock, RawCurriculum, RawSuperblock, SourceFile};
use async_trait::async_trait;
use curriculum_core::util::absolutize;
use curriculum_types::{BlockId, ErrorKind, LoadResult, SuperblockId, ValidationError};
use futures::future::try_join_all;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Loaded superblock documents keyed by id, in request order.
pub type SuperblockFiles = IndexMap<SuperblockId, SourceFile<RawSuperblock>>;

/// Loaded block documents keyed by id, in request order.
pub type BlockFiles = IndexMap<BlockId, SourceFile<RawBlock>>;

/// Trait for curriculum data sources.
#[async_trait]
pub trait CurriculumSource: Send + Sync {
    /// Read the curriculum manifest.
    async fn read_curriculum(&self) -> LoadResult<SourceFile<RawCurriculum>>;

    /// Read one superblock document.
    async fn read_superblock(&self, id: &SuperblockId) -> LoadResult<SourceFile<RawSuperblock>>;

    /// Read one block document.
    async fn read_block(&self, id: &BlockId) -> LoadResult<SourceFile<RawBlock>>;

    /// Whether a block document exists. Sources that cannot tell cheaply
    /// answer `true` and let [`read_block`](Self::read_block) report the
    /// failure.
    async fn has_block(&self, _id: &BlockId) -> bool {
        true
    }

    /// Read many superblocks concurrently, failing on the first error.
    async fn read_superblocks(&self, ids: &[SuperblockId]) -> LoadResult<SuperblockFiles> {
        let reads = ids.iter().map(|id| async move {
            let file = self.read_superblock(id).await?;
            Ok::<_, ValidationError>((id.clone(), file))
        });
        Ok(try_join_all(reads).await?.into_iter().collect())
    }

    /// Read many blocks concurrently, failing on the first error.
    async fn read_blocks(&self, ids: &[BlockId]) -> LoadResult<BlockFiles> {
        let reads = ids.iter().map(|id| async move {
            let file = self.read_block(id).await?;
            Ok::<_, ValidationError>((id.clone(), file))
        });
        Ok(try_join_all(reads).await?.into_iter().collect())
    }

    /// Every block the source could serve, referenced or not.
    ///
    /// Sources that cannot enumerate their contents return an empty list.
    async fn available_blocks(&self) -> LoadResult<Vec<BlockId>> {
        Ok(Vec::new())
    }
}

/// Reads curriculum documents from a directory tree:
///
/// ```text
/// <root>/curriculum.json
/// <root>/superblocks/<id>.json
/// <root>/blocks/<id>.json
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Manifest file name.
    pub const CURRICULUM_FILE: &'static str = "curriculum.json";
    /// Superblock document directory.
    pub const SUPERBLOCKS_DIR: &'static str = "superblocks";
    /// Block document directory.
    pub const BLOCKS_DIR: &'static str = "blocks";

    /// Create a source rooted at `root`. Relative paths are resolved against
    /// the current directory so every reported path is absolute.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: absolutize(root),
        }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the manifest.
    pub fn curriculum_path(&self) -> PathBuf {
        self.root.join(Self::CURRICULUM_FILE)
    }

    /// Path of a superblock document.
    pub fn superblock_path(&self, id: &SuperblockId) -> PathBuf {
        self.root
            .join(Self::SUPERBLOCKS_DIR)
            .join(format!("{}.json", id))
    }

    /// Path of a block document.
    pub fn block_path(&self, id: &BlockId) -> PathBuf {
        self.root.join(Self::BLOCKS_DIR).join(format!("{}.json", id))
    }

    async fn read_json<T: DeserializeOwned>(path: PathBuf) -> LoadResult<SourceFile<T>> {
        trace!("Reading {}", path.display());

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ValidationError::io(&path, &e))?;

        let document =
            serde_json::from_str(&content).map_err(|e| ValidationError::parse(&path, &e))?;

        Ok(SourceFile::new(path, document))
    }
}

#[async_trait]
impl CurriculumSource for DirectorySource {
    async fn read_curriculum(&self) -> LoadResult<SourceFile<RawCurriculum>> {
        Self::read_json(self.curriculum_path()).await
    }

    async fn read_superblock(&self, id: &SuperblockId) -> LoadResult<SourceFile<RawSuperblock>> {
        Self::read_json(self.superblock_path(id)).await
    }

    async fn read_block(&self, id: &BlockId) -> LoadResult<SourceFile<RawBlock>> {
        Self::read_json(self.block_path(id)).await
    }

    async fn has_block(&self, id: &BlockId) -> bool {
        tokio::fs::metadata(self.block_path(id))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn available_blocks(&self) -> LoadResult<Vec<BlockId>> {
        let dir = self.root.join(Self::BLOCKS_DIR);
        let scan_dir = dir.clone();

        tokio::task::spawn_blocking(move || scan_block_files(&scan_dir))
            .await
            .map_err(|e| {
                ValidationError::new(
                    ErrorKind::Io,
                    format!("Scanning {} did not complete: {}", dir.display(), e),
                    &dir,
                )
            })?
    }
}

fn scan_block_files(dir: &Path) -> LoadResult<Vec<BlockId>> {
    let mut ids = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ValidationError::io(&path, &std::io::Error::from(e))
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        if let Some(id) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| BlockId::new(s).ok())
        {
            ids.push(id);
        }
    }

    debug!("Found {} block files under {}", ids.len(), dir.display());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn block_json(name: &str) -> String {
        format!(
            r#"{{"name": "{}", "helpCategory": "HTML-CSS", "blockLayout": "challenge-list",
                "challengeOrder": [{{"id": "abc", "title": "Step 1"}}]}}"#,
            name
        )
    }

    #[tokio::test]
    async fn test_reads_manifest() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "curriculum.json",
            r#"{"superblocks": ["responsive-web-design"], "certifications": ["legacy-front-end"]}"#,
        );

        let source = DirectorySource::new(dir.path());
        let manifest = source.read_curriculum().await.unwrap();
        assert_eq!(
            manifest.document.superblocks,
            vec![SuperblockId::new("responsive-web-design").unwrap()]
        );
        assert_eq!(manifest.path, dir.path().join("curriculum.json"));
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path());
        let id: BlockId = "ghost-block".parse().unwrap();

        let err = source.read_block(&id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert_eq!(err.path, dir.path().join("blocks").join("ghost-block.json"));
        assert!(err.path.is_absolute());
        assert_eq!(err.field, None);
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "curriculum.json", "{ not json");

        let err = DirectorySource::new(dir.path()).read_curriculum().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert!(err.message.contains("curriculum.json"));
    }

    #[tokio::test]
    async fn test_bulk_read_keeps_request_order() {
        let dir = TempDir::new().unwrap();
        for name in ["c", "a", "b"] {
            write(dir.path(), &format!("blocks/{}.json", name), &block_json(name));
        }

        let ids: Vec<BlockId> = ["c", "a", "b"].iter().map(|s| s.parse().unwrap()).collect();
        let blocks = DirectorySource::new(dir.path()).read_blocks(&ids).await.unwrap();
        let order: Vec<&str> = blocks.keys().map(|k| k.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_bulk_read_fails_when_any_item_fails() {
        let dir = TempDir::new().unwrap();
        for name in ["one", "two", "four", "five"] {
            write(dir.path(), &format!("blocks/{}.json", name), &block_json(name));
        }

        let ids: Vec<BlockId> = ["one", "two", "three", "four", "five"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let err = DirectorySource::new(dir.path()).read_blocks(&ids).await.unwrap_err();
        assert!(err.path.ends_with("blocks/three.json"));
    }

    #[tokio::test]
    async fn test_has_block() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blocks/present.json", &block_json("present"));

        let source = DirectorySource::new(dir.path());
        assert!(source.has_block(&BlockId::new("present").unwrap()).await);
        assert!(!source.has_block(&BlockId::new("absent").unwrap()).await);
    }

    #[tokio::test]
    async fn test_available_blocks_lists_json_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blocks/b.json", &block_json("b"));
        write(dir.path(), "blocks/a.json", &block_json("a"));
        write(dir.path(), "blocks/notes.txt", "ignored");

        let ids = DirectorySource::new(dir.path()).available_blocks().await.unwrap();
        let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
