//! Save-state reconciliation between a local snapshot and a remote copy
//! (another device, a sync service). Whole-snapshot last-writer-wins on the
//! `updated_at_ms` stamp; the adopted side is normalized by the save layer.

use crate::data::save::SaveGame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncDecision {
    /// No snapshot on either side; start a new character.
    StartFresh,
    /// Local is authoritative; `push` asks the caller to upload it.
    KeepLocal { push: bool },
    /// Remote is strictly newer; adopt it.
    TakeRemote,
}

pub fn reconcile(local: Option<&SaveGame>, remote: Option<&SaveGame>) -> SyncDecision {
    match (local, remote) {
        (None, None) => SyncDecision::StartFresh,
        (Some(_), None) => SyncDecision::KeepLocal { push: true },
        (None, Some(_)) => SyncDecision::TakeRemote,
        (Some(local), Some(remote)) => {
            if remote.updated_at_ms > local.updated_at_ms {
                SyncDecision::TakeRemote
            } else {
                SyncDecision::KeepLocal {
                    push: local.updated_at_ms > remote.updated_at_ms,
                }
            }
        }
    }
}
