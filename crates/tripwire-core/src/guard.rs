//! Single-instance enforcement
//!
//! A [`Singleton`] is a lazily initialised static slot. Types stored in one
//! implement [`SingleInstance`] so that copies are refused, and use
//! [`forbid_serde!`](crate::forbid_serde) so that no serialized snapshot of
//! the instance can ever be produced or restored.

use once_cell::sync::OnceCell;

use crate::error::LifecycleViolation;

/// Process-wide slot holding at most one instance of `T`
#[derive(Debug)]
pub struct Singleton<T> {
    cell: OnceCell<T>,
    ready: OnceCell<()>,
}

impl<T> Singleton<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            ready: OnceCell::new(),
        }
    }

    /// The instance, once it has been created and set up
    pub fn get(&'static self) -> Option<&'static T> {
        self.ready.get()?;
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.ready.get().is_some()
    }

    /// Return the stored instance, creating it with `create` on first use.
    ///
    /// `on_created` runs exactly once, after the instance has been stored.
    /// No caller gets the instance back before `on_created` has finished;
    /// concurrent first callers block until then.
    pub fn get_or_init<C, F>(&'static self, create: C, on_created: F) -> &'static T
    where
        C: FnOnce() -> T,
        F: FnOnce(&'static T),
    {
        let instance = self.cell.get_or_init(create);
        self.ready.get_or_init(|| on_created(instance));
        instance
    }
}

impl<T> Default for Singleton<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A type with at most one live instance.
///
/// The type must not implement `Clone`; `try_clone` is the only copy path
/// and it always fails.
pub trait SingleInstance: Sized + 'static {
    /// Always fails with [`LifecycleViolation::Clone`]
    fn try_clone(&self) -> Result<Self, LifecycleViolation> {
        Err(LifecycleViolation::Clone {
            type_name: std::any::type_name::<Self>(),
        })
    }
}

/// Implement `Serialize` and `Deserialize` so that both always fail with a
/// [`LifecycleViolation`](crate::error::LifecycleViolation).
#[macro_export]
macro_rules! forbid_serde {
    ($ty:ty) => {
        impl $crate::__private::serde::Serialize for $ty {
            fn serialize<S: $crate::__private::serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
                Err(<S::Error as $crate::__private::serde::ser::Error>::custom(
                    $crate::error::LifecycleViolation::Serialize {
                        type_name: std::any::type_name::<$ty>(),
                    },
                ))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<D: $crate::__private::serde::Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
                Err(<D::Error as $crate::__private::serde::de::Error>::custom(
                    $crate::error::LifecycleViolation::Deserialize {
                        type_name: std::any::type_name::<$ty>(),
                    },
                ))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug)]
    struct Registry {
        id: usize,
    }

    impl SingleInstance for Registry {}
    crate::forbid_serde!(Registry);

    static REGISTRY: Singleton<Registry> = Singleton::new();
    static CREATED: AtomicUsize = AtomicUsize::new(0);
    static NOTIFIED: AtomicUsize = AtomicUsize::new(0);

    fn instance() -> &'static Registry {
        REGISTRY.get_or_init(
            || Registry {
                id: CREATED.fetch_add(1, Ordering::SeqCst) + 1,
            },
            |_| {
                NOTIFIED.fetch_add(1, Ordering::SeqCst);
            },
        )
    }

    #[test]
    fn test_same_instance_from_many_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| instance() as *const Registry as usize))
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert!(std::ptr::eq(instance(), instance()));
        assert_eq!(CREATED.load(Ordering::SeqCst), 1);
        assert_eq!(NOTIFIED.load(Ordering::SeqCst), 1);
        assert_eq!(instance().id, 1);
        assert!(REGISTRY.is_initialized());
    }

    #[test]
    fn test_clone_is_refused() {
        let err = instance().try_clone().unwrap_err();
        assert!(matches!(err, LifecycleViolation::Clone { .. }));
    }

    #[test]
    fn test_serialization_is_refused() {
        let err = serde_json::to_string(instance()).unwrap_err();
        assert!(err.to_string().contains("Serializing instances of"));

        let err = serde_json::from_str::<Registry>("{}").unwrap_err();
        assert!(err.to_string().contains("Deserializing instances of"));
    }

    #[derive(Debug)]
    struct Slow;

    static SLOW: Singleton<Slow> = Singleton::new();
    static SLOW_READY: AtomicBool = AtomicBool::new(false);

    #[test]
    fn test_callers_wait_for_setup() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    SLOW.get_or_init(
                        || Slow,
                        |_| {
                            std::thread::sleep(Duration::from_millis(50));
                            SLOW_READY.store(true, Ordering::SeqCst);
                        },
                    );
                    SLOW_READY.load(Ordering::SeqCst)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert!(SLOW.get().is_some());
    }
}
