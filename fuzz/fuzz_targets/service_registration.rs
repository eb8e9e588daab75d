#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;
use tenure_di::{key_of_named, Container, DiError, Lifetime};

const NAMES: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

fuzz_target!(|data: &[u8]| {
    let container = Container::new();
    let mut model: HashMap<usize, i32> = HashMap::new();

    // Each byte pair is one operation: opcode then argument
    for chunk in data.chunks_exact(2) {
        let name = chunk[1] as usize % NAMES.len();
        let value = chunk[1] as i32;

        match chunk[0] % 4 {
            0 => {
                let result = container.register_named_singleton(NAMES[name], TestService { value });
                match result {
                    Ok(()) => assert!(model.insert(name, value).is_none()),
                    Err(DiError::AlreadyRegistered(_)) => assert!(model.contains_key(&name)),
                    Err(e) => panic!("unexpected registration error: {e}"),
                }
            }
            1 => {
                let lifetime = match chunk[1] % 3 {
                    0 => Lifetime::Singleton,
                    1 => Lifetime::Scoped,
                    _ => Lifetime::Transient,
                };
                let result = container.register_named_factory::<TestService, _>(
                    NAMES[name],
                    lifetime,
                    move |_| Ok(TestService { value }),
                );
                if result.is_ok() {
                    assert!(model.insert(name, value).is_none());
                    assert_eq!(container.get_lifetime(&key_of_named::<TestService>(NAMES[name])), Some(lifetime));
                }
            }
            2 => {
                let removed = container.unregister(&key_of_named::<TestService>(NAMES[name]));
                assert_eq!(removed, model.remove(&name).is_some());
            }
            _ => {
                // Scoped registrations need a scope; the guard covers every lifetime
                let scope = container.scope().unwrap();
                let resolved = container.resolve_named::<TestService>(NAMES[name], Some(scope.id()));
                match model.get(&name) {
                    Some(expected) => assert_eq!(resolved.unwrap().value, *expected),
                    None => assert!(matches!(resolved, Err(DiError::ServiceNotFound { .. }))),
                }
            }
        }
    }

    assert_eq!(container.descriptors().len(), model.len());
    let report = container.shutdown();
    assert!(report.is_clean());
});

#[derive(Debug)]
struct TestService {
    value: i32,
}
