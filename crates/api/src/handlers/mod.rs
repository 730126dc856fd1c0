pub mod history;
pub mod sync;

use sketchrelay_core::error::CoreError;
use sketchrelay_core::types::RoomId;

use crate::error::AppResult;

/// Reject non-positive room ids before any collaborator is invoked.
///
/// Non-numeric path segments are already rejected by the `Path<RoomId>`
/// extractor with a 400 before the handler runs.
pub(crate) fn validate_room_id(room_id: RoomId) -> AppResult<()> {
    if room_id < 1 {
        return Err(CoreError::Validation("roomId must be a positive integer".into()).into());
    }
    Ok(())
}
