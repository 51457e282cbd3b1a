//! Runtime errors

use fos_dom::DomError;

use crate::ComponentId;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Runtime errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Render produced no node
    #[error("can not render component {0:?}: render function returned no node")]
    Render(ComponentId),

    /// Render produced more than one top-level node
    #[error("can not render component {0:?}: render produced {1} root nodes")]
    MultipleRoots(ComponentId, usize),

    #[error("component {0:?} is already built")]
    AlreadyBuilt(ComponentId),

    #[error("component {0:?} is already bound")]
    AlreadyBound(ComponentId),

    /// Self-binding or DOM placement needs a root
    #[error("component {0:?} has not been rendered")]
    NotRendered(ComponentId),

    #[error("component {0:?} has been destroyed")]
    Destroyed(ComponentId),

    /// Binding would make a component its own ancestor
    #[error("binding {child:?} under {parent:?} would create a cycle")]
    Cycle {
        child: ComponentId,
        parent: ComponentId,
    },

    /// A slot reached the DOM without being extracted
    #[error("slot \"{0}\" was not extracted before rendering")]
    UnextractedSlot(String),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
