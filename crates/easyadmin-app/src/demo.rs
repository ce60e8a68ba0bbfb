//! Built-in host operations backed by mock data.
//!
//! Each operation sleeps for a fixed latency first, standing in for the
//! backend request a real host would make.

use std::time::Duration;

use easyadmin_common::api::{CREATE_USER, GET_CURRENT_USER, LIST_USERS};
use easyadmin_common::{Role, User};
use easyadmin_host::{Args, OperationError, OperationRegistry};
use serde_json::{Map, Value};

const CURRENT_USER_LATENCY: Duration = Duration::from_millis(500);
const LIST_USERS_LATENCY: Duration = Duration::from_millis(800);
const CREATE_USER_LATENCY: Duration = Duration::from_millis(1000);

/// Registry holding `getCurrentUser`, `listUsers` and `createUser`.
pub fn registry(simulate_latency: bool) -> OperationRegistry {
    let latency = |d: Duration| if simulate_latency { d } else { Duration::ZERO };
    let mut registry = OperationRegistry::new();

    let delay = latency(CURRENT_USER_LATENCY);
    registry.register_typed(GET_CURRENT_USER, move |_args: Args| async move {
        tokio::time::sleep(delay).await;
        Ok::<_, OperationError>(current_user())
    });

    let delay = latency(LIST_USERS_LATENCY);
    registry.register_typed(LIST_USERS, move |_args: Args| async move {
        tokio::time::sleep(delay).await;
        Ok::<_, OperationError>(users())
    });

    let delay = latency(CREATE_USER_LATENCY);
    registry.register(CREATE_USER, move |args: Args| async move {
        tokio::time::sleep(delay).await;
        create_user(args.get(0)?)
    });

    registry
}

fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: None,
    }
}

fn current_user() -> User {
    User {
        avatar: Some("https://via.placeholder.com/40".to_string()),
        ..user("user-123", "Taro Tanaka", "tanaka@example.com", Role::Admin)
    }
}

fn users() -> Vec<User> {
    vec![
        user("user-123", "Taro Tanaka", "tanaka@example.com", Role::Admin),
        user("user-456", "Hanako Suzuki", "suzuki@example.com", Role::User),
        user("user-789", "Jiro Sato", "sato@example.com", Role::User),
    ]
}

/// Echo `user_data` back with a generated `user-<millis>` id. Fields in
/// `user_data`, including an `id`, are kept as given.
fn create_user(user_data: Map<String, Value>) -> Result<Value, OperationError> {
    let mut user = Map::new();
    user.insert(
        "id".to_string(),
        Value::String(format!("user-{}", chrono::Utc::now().timestamp_millis())),
    );
    user.extend(user_data);
    Ok(Value::Object(user))
}
