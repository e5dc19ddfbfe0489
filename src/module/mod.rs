use crate::di::Container;
use crate::error::Result;

/// A feature module that wires its providers and controllers into the container
///
/// Registration order: trait bindings, then providers, then controllers, so that
/// each provider can resolve the ones registered before it.
pub trait Module {
    fn register(container: &mut Container) -> Result<()>;
}
