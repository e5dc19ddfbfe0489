use crate::error::{AppError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

type Instance = Arc<dyn Any + Send + Sync>;

/// Turns the stored concrete instance into an `Arc<Arc<dyn Trait>>` behind `dyn Any`.
/// Returns `None` when the instance is not of the bound implementation type.
type CasterFn = Arc<dyn Fn(Instance) -> Option<Instance> + Send + Sync>;

/// Thread-safe dependency injection container.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, ServiceEntry>,
    trait_mappings: DashMap<TypeId, TypeId>,
    casters: DashMap<TypeId, CasterFn>,
}

#[derive(Clone)]
struct ServiceEntry {
    instance: Instance,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        let entry = ServiceEntry {
            instance: Arc::new(instance),
        };
        self.services.insert(TypeId::of::<T>(), entry);
        self
    }

    pub fn register_trait<Trait, Impl, F>(&mut self, caster_fn: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        let trait_id = TypeId::of::<Trait>();
        self.trait_mappings.insert(trait_id, TypeId::of::<Impl>());

        let caster: CasterFn = Arc::new(move |instance: Instance| {
            let concrete = instance.downcast::<Impl>().ok()?;
            let trait_obj: Arc<Trait> = caster_fn(concrete);
            Some(Arc::new(trait_obj) as Instance)
        });

        self.casters.insert(trait_id, caster);
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(&TypeId::of::<T>())
            .ok_or_else(|| AppError::DependencyNotFound {
                type_name: std::any::type_name::<T>().to_string(),
            })?;
        entry
            .instance
            .clone()
            .downcast::<T>()
            .map_err(|_| AppError::DowncastFailed {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    pub fn resolve_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let requested_type_id = TypeId::of::<T>();
        let trait_name = std::any::type_name::<T>();

        let caster = self.casters.get(&requested_type_id).ok_or_else(|| {
            AppError::DependencyNotFound {
                type_name: trait_name.to_string(),
            }
        })?;

        let impl_type_id = *self.trait_mappings.get(&requested_type_id).ok_or_else(|| {
            AppError::DependencyNotFound {
                type_name: format!("No implementation mapping found for trait '{}'", trait_name),
            }
        })?;

        let entry = self
            .services
            .get(&impl_type_id)
            .ok_or_else(|| AppError::DependencyNotFound {
                type_name: format!("Implementation for trait '{}' not registered", trait_name),
            })?;

        let downcast_failed = || AppError::DowncastFailed {
            type_name: trait_name.to_string(),
        };

        // The caster hands back an Arc<Arc<T>>; clone the inner handle out.
        let wrapper = (caster.value())(entry.instance.clone())
            .ok_or_else(downcast_failed)?
            .downcast::<Arc<T>>()
            .map_err(|_| downcast_failed())?;
        Ok(wrapper.as_ref().clone())
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.services.contains_key(&type_id) || self.trait_mappings.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
