pub use futures::future::LocalBoxFuture;

/// Detaches background work from the caller.
///
/// The UI runtime supplies the implementation; the provider uses it for reload
/// cycles and for the profile write that must not hold up navigation.
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
