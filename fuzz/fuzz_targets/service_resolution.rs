#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use tenure_di::{Container, DiError, Lifetime, Resolver};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let pattern = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let register_service = pattern % 2 == 0;

    let container = Container::new();
    if register_service {
        container.register_singleton(TestService { id: 42 }).unwrap();
        container
            .register_singleton_trait(Arc::new(TestServiceImpl { value: 100 }) as Arc<dyn TestTrait>)
            .unwrap();
        container
            .register_factory::<ScopedService, _>(Lifetime::Scoped, |_| {
                Ok(ScopedService { data: "scoped".to_string() })
            })
            .unwrap();
    }

    let mut scopes = Vec::new();

    // Remaining bytes drive a sequence of scope and resolution operations
    for &op in &data[4..] {
        match op % 6 {
            0 => scopes.push(container.create_scope().unwrap()),
            1 => {
                if let Some(scope) = scopes.pop() {
                    assert!(container.dispose_scope(scope).is_some());
                    assert!(container.dispose_scope(scope).is_none());
                    assert!(matches!(
                        container.resolve::<TestService>(Some(scope)),
                        Err(DiError::ScopeNotFound(_))
                    ));
                }
            }
            2 => {
                let service = container.resolve::<TestService>(None);
                if register_service {
                    assert_eq!(service.unwrap().id, 42);
                } else {
                    assert!(matches!(service, Err(DiError::ServiceNotFound { .. })));
                }
            }
            3 => {
                let trait_obj = container.get_trait::<dyn TestTrait>();
                assert_eq!(trait_obj.is_ok(), register_service);
                if let Ok(obj) = trait_obj {
                    assert_eq!(obj.get_value(), 100);
                }
            }
            4 => {
                let unscoped = container.resolve::<ScopedService>(None);
                if register_service {
                    assert!(matches!(unscoped, Err(DiError::MissingScope(_))));
                }
                if let (true, Some(&scope)) = (register_service, scopes.last()) {
                    let a = container.resolve::<ScopedService>(Some(scope)).unwrap();
                    let b = container.resolve::<ScopedService>(Some(scope)).unwrap();
                    assert!(Arc::ptr_eq(&a, &b));
                    assert_eq!(a.data, "scoped");
                }
            }
            _ => {
                if let (true, [.., first, second]) = (register_service, scopes.as_slice()) {
                    let a = container.resolve::<ScopedService>(Some(*first)).unwrap();
                    let b = container.resolve::<ScopedService>(Some(*second)).unwrap();
                    assert!(!Arc::ptr_eq(&a, &b));
                }
            }
        }
    }

    assert_eq!(container.scope_count(), scopes.len());
    let report = container.shutdown();
    assert_eq!(report.scopes.len(), scopes.len());
    assert!(matches!(container.create_scope(), Err(DiError::ShutDown)));
});

#[derive(Debug)]
struct TestService {
    id: u32,
}

#[derive(Debug)]
struct ScopedService {
    data: String,
}

trait TestTrait: Send + Sync {
    fn get_value(&self) -> i32;
}

#[derive(Debug)]
struct TestServiceImpl {
    value: i32,
}

impl TestTrait for TestServiceImpl {
    fn get_value(&self) -> i32 {
        self.value
    }
}
