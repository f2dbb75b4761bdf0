// File: crates/chart-core/src/namespace.rs
// Summary: Namespaced typed storage for protected state and public API, plus the capability registry.

use std::any::{Any, TypeId};

use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};

/// A value that lives under a fixed namespace key.
///
/// Protected state uses `_`-prefixed keys (`_font`), public API values use
/// bare keys (`font`).
pub trait Namespace: Any {
    const KEY: &'static str;
}

/// Ordered, string-keyed map of typed values.
///
/// Top-level keys are replaced wholesale: a later contribution under an
/// existing key wins and nothing is merged.
#[derive(Default)]
pub struct Namespaces {
    slots: IndexMap<String, Box<dyn Any>>,
}

impl Namespaces {
    pub fn new() -> Self { Self::default() }

    /// Contribute `value` under `key`. Returns whether an earlier value was
    /// replaced; such collisions are logged since they are usually accidental.
    /// Use [`Namespaces::override_with`] for intentional replacement.
    pub fn insert<T: Any>(&mut self, key: impl Into<String>, value: T) -> bool {
        let key = key.into();
        let replaced = self.slots.insert(key.clone(), Box::new(value)).is_some();
        if replaced {
            tracing::warn!(namespace = %key, "namespace collision; the later contribution wins");
        }
        replaced
    }

    pub fn contribute<T: Namespace>(&mut self, value: T) -> bool {
        self.insert(T::KEY, value)
    }

    /// Replace the value under an existing `key`.
    pub fn override_with<T: Any>(&mut self, key: &str, value: T) -> ChartResult<()> {
        let slot = self.slots.get_mut(key).ok_or_else(|| ChartError::nothing_to_override(key))?;
        *slot = Box::new(value);
        tracing::debug!(namespace = key, "namespace overridden");
        Ok(())
    }

    pub fn override_ns<T: Namespace>(&mut self, value: T) -> ChartResult<()> {
        self.override_with(T::KEY, value)
    }

    pub fn get_as<T: Any>(&self, key: &str) -> ChartResult<&T> {
        self.slots
            .get(key)
            .ok_or_else(|| ChartError::missing_namespace(key))?
            .downcast_ref::<T>()
            .ok_or_else(|| ChartError::namespace_type::<T>(key))
    }

    pub fn get_as_mut<T: Any>(&mut self, key: &str) -> ChartResult<&mut T> {
        self.slots
            .get_mut(key)
            .ok_or_else(|| ChartError::missing_namespace(key))?
            .downcast_mut::<T>()
            .ok_or_else(|| ChartError::namespace_type::<T>(key))
    }

    pub fn get<T: Namespace>(&self) -> ChartResult<&T> {
        self.get_as(T::KEY)
    }

    pub fn get_mut<T: Namespace>(&mut self) -> ChartResult<&mut T> {
        self.get_as_mut(T::KEY)
    }

    pub fn raw(&self, key: &str) -> Option<&dyn Any> {
        self.slots.get(key).map(|b| &**b)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.slots.shift_remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool { self.slots.contains_key(key) }
    pub fn keys(&self) -> impl Iterator<Item = &str> { self.slots.keys().map(String::as_str) }
    pub fn len(&self) -> usize { self.slots.len() }
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }
}

trait Resolve<C: ?Sized> {
    fn resolve<'a>(&self, value: &'a dyn Any) -> Option<&'a C>;
}

struct Cast<T, C: ?Sized> {
    cast: fn(&T) -> &C,
}

impl<T: Any, C: ?Sized> Resolve<C> for Cast<T, C> {
    fn resolve<'a>(&self, value: &'a dyn Any) -> Option<&'a C> {
        value.downcast_ref::<T>().map(self.cast)
    }
}

struct Provider {
    key: String,
    // Box<dyn Resolve<C>> for the capability type this entry is registered under.
    resolver: Box<dyn Any>,
}

/// Which protected namespace implements which capability trait.
///
/// Capabilities are keyed by trait object type (`dyn ColorMapper`); each
/// points at a namespace and a cast from its concrete type.
#[derive(Default)]
pub struct Capabilities {
    providers: IndexMap<TypeId, Provider>,
}

impl Capabilities {
    pub fn new() -> Self { Self::default() }

    /// Declare that the namespace `T::KEY` provides `C`. Returns whether an
    /// earlier provider was replaced.
    pub fn provide<T: Namespace, C: ?Sized + 'static>(&mut self, cast: fn(&T) -> &C) -> bool {
        self.provide_at(T::KEY, cast)
    }

    pub fn provide_at<T: Any, C: ?Sized + 'static>(&mut self, key: impl Into<String>, cast: fn(&T) -> &C) -> bool {
        let provider = Self::provider(key.into(), cast);
        let replaced = self.providers.insert(TypeId::of::<C>(), provider).is_some();
        if replaced {
            tracing::warn!(capability = std::any::type_name::<C>(), "capability collision; the later provider wins");
        }
        replaced
    }

    /// Replace an existing provider of `C`.
    pub fn override_capability<T: Namespace, C: ?Sized + 'static>(&mut self, cast: fn(&T) -> &C) -> ChartResult<()> {
        let name = std::any::type_name::<C>();
        let slot = self
            .providers
            .get_mut(&TypeId::of::<C>())
            .ok_or_else(|| ChartError::nothing_to_override(name))?;
        *slot = Self::provider(T::KEY.to_string(), cast);
        tracing::debug!(capability = name, provider = T::KEY, "capability overridden");
        Ok(())
    }

    pub fn has<C: ?Sized + 'static>(&self) -> bool {
        self.providers.contains_key(&TypeId::of::<C>())
    }

    /// Namespace key currently providing `C`.
    pub fn provider_key<C: ?Sized + 'static>(&self) -> Option<&str> {
        self.providers.get(&TypeId::of::<C>()).map(|p| p.key.as_str())
    }

    /// Resolve `C` against `namespaces`.
    pub fn resolve<'a, C: ?Sized + 'static>(&self, namespaces: &'a Namespaces) -> ChartResult<&'a C> {
        let missing = ChartError::missing_capability::<C>;
        let provider = self.providers.get(&TypeId::of::<C>()).ok_or_else(missing)?;
        let resolver = provider.resolver.downcast_ref::<Box<dyn Resolve<C>>>().ok_or_else(missing)?;
        let value = namespaces.raw(&provider.key).ok_or_else(missing)?;
        resolver.resolve(value).ok_or_else(missing)
    }

    fn provider<T: Any, C: ?Sized + 'static>(key: String, cast: fn(&T) -> &C) -> Provider {
        let resolver: Box<dyn Resolve<C>> = Box::new(Cast { cast });
        Provider { key, resolver: Box::new(resolver) }
    }
}
