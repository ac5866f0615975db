/// What is known about a node's type before, or after, a remote fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStatus {
    /// No hint; the first fetch treats the node as a file.
    Unresolved,
    /// Caller believes this is a directory; not yet proven.
    DirectoryAssumed,
    /// A remote call proved this path is a directory.
    DirectoryConfirmed,
    /// A remote call, or a parent listing, proved this path is a single file.
    NonDirectoryConfirmed,
}

impl ResolutionStatus {
    /// Initial status for a speculative child.
    pub fn from_hint(assume_is_directory: bool) -> Self {
        if assume_is_directory {
            ResolutionStatus::DirectoryAssumed
        } else {
            ResolutionStatus::Unresolved
        }
    }

    /// Whether the first fetch for this status is a directory listing.
    pub fn expects_directory(&self) -> bool {
        matches!(self, ResolutionStatus::DirectoryAssumed | ResolutionStatus::DirectoryConfirmed)
    }

    /// Whether moving to `next` keeps the status moving forward.
    ///
    /// Confirmed statuses never change kind; staying put is always allowed.
    pub fn can_advance_to(&self, next: ResolutionStatus) -> bool {
        use ResolutionStatus::*;

        *self == next
            || matches!(
                (self, next),
                (Unresolved, DirectoryConfirmed)
                    | (Unresolved, NonDirectoryConfirmed)
                    | (DirectoryAssumed, DirectoryConfirmed)
            )
    }
}
