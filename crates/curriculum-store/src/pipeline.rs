//! Load pipeline: read, validate, normalize, and assemble the store.

use crate::model::Superblock;
use crate::normalize::{
    build_parent_index, normalize_block, normalize_curriculum, normalize_superblock,
};
use crate::provider::StoreProvider;
use crate::source::{CurriculumSource, DirectorySource, SuperblockFiles};
use crate::store::{CurriculumStore, StoreBuilder};
use crate::validate::validate_all;
use curriculum_types::{BlockId, LoadResult, SuperblockId};
use futures::future::join_all;
use indexmap::IndexSet;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Runs every load phase in order and stops at the first error.
pub struct LoadPipeline {
    source: Box<dyn CurriculumSource>,
}

impl LoadPipeline {
    /// Create a pipeline over a source.
    pub fn new(source: impl CurriculumSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Load everything and build the store.
    pub async fn execute(&self) -> LoadResult<CurriculumStore> {
        info!("Starting curriculum load");

        debug!("Step 1: Read curriculum manifest");
        let curriculum = self.source.read_curriculum().await?;

        debug!(
            "Step 2: Read {} superblocks",
            curriculum.document.superblocks.len()
        );
        let superblocks = self
            .source
            .read_superblocks(&curriculum.document.superblocks)
            .await?;

        debug!("Step 3: Collect referenced blocks");
        let referenced = referenced_blocks(&superblocks);
        let present = self.existing_blocks(referenced).await;

        debug!("Step 4: Read {} blocks", present.len());
        let blocks = self.source.read_blocks(&present).await?;

        debug!("Step 5: Validate references, enums, and challenges");
        let checked = validate_all(&curriculum, &superblocks, &blocks)?;

        debug!("Step 6: Normalize curriculum and superblocks");
        let curriculum = normalize_curriculum(&curriculum.document);
        let certifications: HashSet<SuperblockId> =
            curriculum.certifications.iter().cloned().collect();
        let superblocks: Vec<Superblock> = superblocks
            .iter()
            .map(|(id, file)| normalize_superblock(id, &file.document, &certifications))
            .collect();

        debug!("Step 7: Build block parent index");
        let parents = build_parent_index(&superblocks);

        debug!("Step 8: Normalize blocks");
        let blocks: Vec<_> = blocks
            .iter()
            .zip(checked.into_values())
            .map(|((id, file), checked)| {
                let block_parents = parents.get(id).map(Vec::as_slice).unwrap_or_default();
                normalize_block(id, file, checked, block_parents)
            })
            .collect();

        debug!("Step 9: Assemble store");
        let store = StoreBuilder::new(curriculum)
            .superblocks(superblocks)
            .blocks(blocks)
            .build();

        for id in self.unreferenced_blocks(&store).await {
            warn!("Block file {} is not referenced by any superblock", id);
        }

        info!("Curriculum loaded: {}", store.stats());
        Ok(store)
    }

    /// Keep only the blocks the source holds. Missing ones are left for the
    /// reference check, which can name the superblock that wants them.
    async fn existing_blocks(&self, ids: Vec<BlockId>) -> Vec<BlockId> {
        let checks = ids.into_iter().map(|id| async move {
            let exists = self.source.has_block(&id).await;
            if !exists {
                debug!("Block {} has no document", id);
            }
            exists.then_some(id)
        });

        join_all(checks).await.into_iter().flatten().collect()
    }

    /// Block documents in the source that did not make it into `store`
    /// because no superblock lists them.
    pub async fn unreferenced_blocks(&self, store: &CurriculumStore) -> Vec<BlockId> {
        match self.source.available_blocks().await {
            Ok(available) => available
                .into_iter()
                .filter(|id| store.block(id.as_str()).is_none())
                .collect(),
            Err(e) => {
                debug!("Skipping unreferenced block scan: {}", e);
                Vec::new()
            }
        }
    }
}

/// Every block referenced by any superblock, first occurrence order.
fn referenced_blocks(superblocks: &SuperblockFiles) -> Vec<BlockId> {
    let unique: IndexSet<&BlockId> = superblocks
        .values()
        .flat_map(|file| file.document.shape.block_refs())
        .collect();
    unique.into_iter().cloned().collect()
}

/// Load the curriculum under `root` and wrap it in a provider.
pub async fn load_from_dir(root: impl AsRef<Path>) -> LoadResult<StoreProvider> {
    let store = LoadPipeline::new(DirectorySource::new(root)).execute().await?;
    Ok(StoreProvider::new(store))
}
