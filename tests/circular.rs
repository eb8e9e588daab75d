use std::sync::Arc;

use tenure_di::{key_of_named, key_of_type, Container, ContainerConfig, DiError, Lifetime, Resolver};

struct A;
struct B;
struct C;

#[test]
fn two_node_cycle_names_both_services() {
    let container = Container::new();
    container
        .register_factory::<A, _>(Lifetime::Transient, |ctx| {
            ctx.get::<B>()?;
            Ok(A)
        })
        .unwrap();
    container
        .register_factory::<B, _>(Lifetime::Transient, |ctx| {
            ctx.get::<A>()?;
            Ok(B)
        })
        .unwrap();

    match container.resolve::<A>(None) {
        Err(DiError::CircularDependency(path)) => {
            assert_eq!(path, vec![key_of_type::<A>(), key_of_type::<B>(), key_of_type::<A>()]);
        }
        other => panic!("expected CircularDependency, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn cycle_through_singletons_leaves_slots_empty() {
    let container = Container::new();
    container
        .register_factory::<A, _>(Lifetime::Singleton, |ctx| {
            ctx.get::<B>()?;
            Ok(A)
        })
        .unwrap();
    container
        .register_factory::<B, _>(Lifetime::Singleton, |ctx| {
            ctx.get::<C>()?;
            Ok(B)
        })
        .unwrap();
    container
        .register_factory::<C, _>(Lifetime::Singleton, |ctx| {
            ctx.get::<A>()?;
            Ok(C)
        })
        .unwrap();

    let err = container.resolve::<A>(None).err().unwrap();
    let message = err.to_string();
    assert!(message.starts_with("Circular dependency: "));
    assert!(message.contains(" -> "));
    assert_eq!(message.matches(std::any::type_name::<A>()).count(), 2);

    // the failure is repeatable: nothing was cached half-built
    assert!(matches!(
        container.resolve::<B>(None),
        Err(DiError::CircularDependency(path)) if path.first() == Some(&key_of_type::<B>())
    ));
    assert!(container.descriptors().iter().all(|d| !d.materialized));
}

#[test]
fn self_dependency_is_a_cycle() {
    let container = Container::new();
    container
        .register_factory::<A, _>(Lifetime::Scoped, |ctx| {
            ctx.get::<A>()?;
            Ok(A)
        })
        .unwrap();

    let scope = container.create_scope().unwrap();
    assert!(matches!(
        container.resolve::<A>(Some(scope)),
        Err(DiError::CircularDependency(path)) if path.len() == 2
    ));
}

#[test]
fn diamond_is_not_a_cycle() {
    struct Top(Arc<B>, Arc<C>);

    let container = Container::new();
    container.register_factory::<A, _>(Lifetime::Transient, |_| Ok(A)).unwrap();
    container
        .register_factory::<B, _>(Lifetime::Transient, |ctx| {
            ctx.get::<A>()?;
            Ok(B)
        })
        .unwrap();
    container
        .register_factory::<C, _>(Lifetime::Transient, |ctx| {
            ctx.get::<A>()?;
            Ok(C)
        })
        .unwrap();
    container
        .register_factory::<Top, _>(Lifetime::Transient, |ctx| Ok(Top(ctx.get::<B>()?, ctx.get::<C>()?)))
        .unwrap();

    assert!(container.resolve::<Top>(None).is_ok());
}

#[test]
fn named_registrations_of_one_type_can_depend_on_each_other() {
    struct Layer(usize);

    let container = Container::new();
    container
        .register_named_factory::<Layer, _>("base", Lifetime::Transient, |_| Ok(Layer(1)))
        .unwrap();
    container
        .register_named_factory::<Layer, _>("cached", Lifetime::Transient, |ctx| {
            Ok(Layer(ctx.get_named::<Layer>("base")?.0 + 1))
        })
        .unwrap();

    assert_eq!(container.resolve_named::<Layer>("cached", None).unwrap().0, 2);

    container
        .register_named_factory::<Layer, _>("loop", Lifetime::Transient, |ctx| {
            ctx.get_named::<Layer>("loop")
                .map(|inner| Layer(inner.0))
        })
        .unwrap();
    match container.resolve_named::<Layer>("loop", None) {
        Err(DiError::CircularDependency(path)) => {
            assert_eq!(path, vec![key_of_named::<Layer>("loop"), key_of_named::<Layer>("loop")]);
        }
        other => panic!("expected CircularDependency, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn deep_chains_hit_the_depth_limit_instead_of_the_stack() {
    struct Level<const N: usize>;

    let container = Container::with_config(ContainerConfig::default().with_max_depth(2));
    container.register_factory::<Level<0>, _>(Lifetime::Transient, |_| Ok(Level::<0>)).unwrap();
    container
        .register_factory::<Level<1>, _>(Lifetime::Transient, |ctx| {
            ctx.get::<Level<0>>()?;
            Ok(Level::<1>)
        })
        .unwrap();
    container
        .register_factory::<Level<2>, _>(Lifetime::Transient, |ctx| {
            ctx.get::<Level<1>>()?;
            Ok(Level::<2>)
        })
        .unwrap();

    assert!(container.resolve::<Level<1>>(None).is_ok());
    assert!(matches!(
        container.resolve::<Level<2>>(None),
        Err(DiError::DepthExceeded(2))
    ));
}

#[test]
fn singleton_resolving_itself_through_the_container_handle_fails() {
    struct Registry;

    let container = Container::new();
    let handle = container.clone();
    container
        .register_factory::<Registry, _>(Lifetime::Singleton, move |_| {
            // a fresh top-level resolve, bypassing the factory context
            handle.resolve::<Registry>(None)?;
            Ok(Registry)
        })
        .unwrap();

    match container.resolve::<Registry>(None) {
        Err(DiError::CircularDependency(path)) => {
            assert_eq!(path, vec![key_of_type::<Registry>(), key_of_type::<Registry>()]);
        }
        other => panic!("expected CircularDependency, got {:?}", other.map(|_| ())),
    }
    // clears the registry, releasing the factory's handle
    container.shutdown();
}
