use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tenure_di::{Container, DiError, Lifetime, Resolver};

struct Database {
    url: String,
}

struct Repository {
    db: Arc<Database>,
}

struct Handler {
    repo: Arc<Repository>,
}

fn app_container(db_builds: Arc<AtomicUsize>) -> Container {
    let container = Container::new();
    container
        .register_factory::<Database, _>(Lifetime::Singleton, move |_| {
            db_builds.fetch_add(1, Ordering::SeqCst);
            Ok(Database {
                url: "postgres://localhost/app".to_string(),
            })
        })
        .unwrap();
    container
        .register_factory::<Repository, _>(Lifetime::Scoped, |ctx| {
            Ok(Repository {
                db: ctx.get::<Database>()?,
            })
        })
        .unwrap();
    container
        .register_factory::<Handler, _>(Lifetime::Transient, |ctx| {
            Ok(Handler {
                repo: ctx.get::<Repository>()?,
            })
        })
        .unwrap();
    container
}

#[test]
fn singleton_is_shared_everywhere() {
    let builds = Arc::new(AtomicUsize::new(0));
    let container = app_container(builds.clone());

    let root = container.resolve::<Database>(None).unwrap();
    let scope = container.create_scope().unwrap();
    let scoped = container.resolve::<Database>(Some(scope)).unwrap();

    assert!(Arc::ptr_eq(&root, &scoped));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn transient_is_fresh_every_time() {
    let container = app_container(Arc::new(AtomicUsize::new(0)));
    let scope = container.create_scope().unwrap();

    let a = container.resolve::<Handler>(Some(scope)).unwrap();
    let b = container.resolve::<Handler>(Some(scope)).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    // the scoped dependency is still shared within the scope
    assert!(Arc::ptr_eq(&a.repo, &b.repo));
}

#[test]
fn database_repository_scenario() {
    let builds = Arc::new(AtomicUsize::new(0));
    let container = app_container(builds.clone());

    let s1 = container.create_scope().unwrap();
    let s2 = container.create_scope().unwrap();

    let r1a = container.resolve::<Repository>(Some(s1)).unwrap();
    let r1b = container.resolve::<Repository>(Some(s1)).unwrap();
    let r2 = container.resolve::<Repository>(Some(s2)).unwrap();

    assert!(Arc::ptr_eq(&r1a, &r1b));
    assert!(!Arc::ptr_eq(&r1a, &r2));
    assert!(Arc::ptr_eq(&r1a.db, &r2.db));
    assert_eq!(r1a.db.url, "postgres://localhost/app");
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn resolver_trait_works_on_container_and_guard() {
    let container = app_container(Arc::new(AtomicUsize::new(0)));

    let db = container.get::<Database>().unwrap();
    let scope = container.scope().unwrap();
    let handler = scope.get::<Handler>().unwrap();

    assert!(Arc::ptr_eq(&db, &handler.repo.db));
}

#[test]
fn factory_errors_propagate_and_nothing_is_cached() {
    struct Flaky;

    let attempts = Arc::new(AtomicUsize::new(0));
    let container = Container::new();
    let counter = attempts.clone();
    container
        .register_factory::<Flaky, _>(Lifetime::Singleton, move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DiError::factory(
                    tenure_di::key_of_type::<Flaky>(),
                    "upstream unavailable",
                ))
            } else {
                Ok(Flaky)
            }
        })
        .unwrap();

    match container.resolve::<Flaky>(None) {
        Err(err @ DiError::Factory { .. }) => {
            assert!(err.to_string().contains("upstream unavailable"));
            assert!(std::error::Error::source(&err).is_some());
        }
        other => panic!("expected Factory error, got {:?}", other.map(|_| ())),
    }

    let first = container.resolve::<Flaky>(None).unwrap();
    let second = container.resolve::<Flaky>(None).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn nested_errors_surface_unmodified() {
    struct Outer;
    struct Missing;

    let container = Container::new();
    container
        .register_factory::<Outer, _>(Lifetime::Transient, |ctx| {
            ctx.get::<Missing>()?;
            Ok(Outer)
        })
        .unwrap();

    match container.resolve::<Outer>(None) {
        Err(DiError::ServiceNotFound { service, registered }) => {
            assert_eq!(service, tenure_di::key_of_type::<Missing>());
            assert_eq!(registered, vec![tenure_di::key_of_type::<Outer>()]);
        }
        other => panic!("expected ServiceNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn clones_share_state() {
    let container = Container::new();
    let clone = container.clone();
    clone.register_singleton(7u32).unwrap();

    assert_eq!(*container.resolve::<u32>(None).unwrap(), 7);
    let scope = clone.create_scope().unwrap();
    assert_eq!(container.active_scopes(), vec![scope]);
}

#[test]
fn resolve_key_returns_the_erased_instance() {
    let container = Container::new();
    container.register_singleton(7u16).unwrap();

    let any = container.resolve_key(&tenure_di::key_of_type::<u16>(), None).unwrap();
    assert_eq!(any.downcast_ref::<u16>(), Some(&7));

    let scope = container.create_scope().unwrap();
    container.dispose_scope(scope);
    assert!(matches!(
        container.resolve_key(&tenure_di::key_of_type::<u16>(), Some(scope)),
        Err(DiError::ScopeNotFound(_))
    ));
}
