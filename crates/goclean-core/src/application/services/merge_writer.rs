//! Read-modify-write of shared files.
//!
//! One call reads the whole file, asks the pure merge state machine for the
//! next state, and writes the whole file back. Nothing is locked, so two
//! writers racing on the same file can lose an update; callers run
//! generations sequentially.

use tracing::{debug, instrument, warn};

use crate::{
    application::{ports::ArtifactStore, services::report::WriteOutcome},
    domain::{ArtifactPath, MergeBlock, MergeDecision, merge},
    error::GocleanResult,
};

pub struct MergeWriter<'a> {
    store: &'a dyn ArtifactStore,
}

impl<'a> MergeWriter<'a> {
    pub fn new(store: &'a dyn ArtifactStore) -> Self {
        Self { store }
    }

    /// Merge `block` into the shared file at `path`.
    ///
    /// With `dry_run` the decision is computed but nothing is written.
    #[instrument(skip(self, block), fields(path = %path, marker = %block.marker))]
    pub fn write(
        &self,
        path: &ArtifactPath,
        block: &MergeBlock,
        dry_run: bool,
    ) -> GocleanResult<WriteOutcome> {
        let existing = self.store.read(path)?;
        let decision = merge::reconcile(existing.as_deref(), block);

        let outcome = match &decision {
            MergeDecision::WriteFresh(_) => WriteOutcome::Created,
            MergeDecision::Append(_) => WriteOutcome::Appended,
            MergeDecision::Extend(_) => WriteOutcome::Extended,
            MergeDecision::Skip => WriteOutcome::Skipped,
            MergeDecision::FallbackAppend(_) => {
                warn!(
                    path = %path,
                    "Shared file has an unexpected structure; appending declarations at end of file"
                );
                WriteOutcome::FallbackAppended
            }
        };

        if let Some(content) = decision.content() {
            if !dry_run {
                self.store.write(path, content)?;
            }
        }

        debug!(outcome = %outcome, "Merge complete");
        Ok(outcome)
    }
}
