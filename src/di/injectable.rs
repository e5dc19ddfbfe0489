use crate::di::Container;
use crate::error::Result;

/// Types that can build themselves from the DI container
///
/// Fields held as `Arc<T>` come from [`Container::resolve`], fields held as
/// `Arc<dyn Trait>` from [`Container::resolve_trait`].
pub trait Injectable: Sized + Send + Sync + 'static {
    /// # Errors
    /// Returns an error if any required dependency is not registered.
    fn inject(container: &Container) -> Result<Self>;
}
