use crate::dom::DomError;
use thiserror::Error;

/// Why a controller operation did nothing
///
/// Public lifecycle operations never return these; they are logged and the operation
/// becomes a no-op.
#[derive(Error, Debug)]
pub enum ModalError {
    #[error("{0}: it is not a modal container, none of its ancestors is one, and no modal is shown")]
    ContainerNotFound(String),
    #[error(transparent)]
    Dom(#[from] DomError),
}
