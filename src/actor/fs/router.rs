use super::types::DebouncedEvents;
use crate::actor::messages::SyncMsg;

pub(super) fn log_events(events: &DebouncedEvents) {
    for (path, kind) in &events.0 {
        crate::debug!("watch"; "{}: {}", kind.label(), path.display());
    }
}

/// Convert one window of events into messages for the sync actor.
///
/// Removals go first so a rename releases the old URL before the new
/// file is added.
pub(super) fn events_to_messages(events: DebouncedEvents) -> Vec<SyncMsg> {
    let split = events.split();
    let mut messages = Vec::new();

    if !split.removed.is_empty() {
        messages.push(SyncMsg::Removed(split.removed));
    }
    if !split.created.is_empty() {
        messages.push(SyncMsg::Created(split.created));
    }
    if !split.modified.is_empty() {
        messages.push(SyncMsg::Modified(split.modified));
    }

    messages
}
