//! Request review: the administrator's PENDING → REJECTED exit.

use organmatch_store::{Directory, DirectoryMut, Store};
use organmatch_types::{OrganRequest, OrganmatchError, RequestId, Result, constants};

/// Reject a PENDING request with an admin note. A blank note is replaced
/// by [`constants::DEFAULT_REJECT_NOTE`].
///
/// # Errors
/// - [`OrganmatchError::RequestNotFound`] if the id does not resolve
/// - [`OrganmatchError::RequestNotPending`] if it was already approved or
///   rejected
/// - [`OrganmatchError::InvalidField`] if the note is too long
pub fn reject_request<S: Store>(
    store: &S,
    request_id: RequestId,
    note: Option<&str>,
) -> Result<OrganRequest> {
    let note = match note.map(str::trim) {
        None | Some("") => constants::DEFAULT_REJECT_NOTE,
        Some(note) => note,
    };
    if note.chars().count() > constants::MAX_ADMIN_NOTE_LEN {
        return Err(OrganmatchError::invalid_field(
            "admin_note",
            format!("exceeds {} characters", constants::MAX_ADMIN_NOTE_LEN),
        ));
    }

    let request = store.transaction(|t| {
        let mut request = t.get_request(request_id)?;
        request.reject(note)?;
        t.save_request(&request)?;
        Ok(request)
    })?;

    tracing::info!(
        request = %request.id,
        recipient = %request.recipient_id,
        note = %note,
        "Request rejected"
    );
    Ok(request)
}
