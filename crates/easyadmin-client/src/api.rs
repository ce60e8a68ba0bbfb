//! Typed wrappers over the host's built-in operations.

use async_trait::async_trait;
use easyadmin_common::api::{CREATE_USER, GET_CURRENT_USER, LIST_USERS};
use easyadmin_common::{NewUser, RpcError, User};

use crate::proxy::CallProxy;

/// The operations every EasyAdmin host provides.
#[async_trait]
pub trait EasyAdminApi {
    async fn get_current_user(&self) -> Result<User, RpcError>;

    async fn list_users(&self) -> Result<Vec<User>, RpcError>;

    /// Create a user; the host assigns its id.
    async fn create_user(&self, user: NewUser) -> Result<User, RpcError>;
}

#[async_trait]
impl EasyAdminApi for CallProxy {
    async fn get_current_user(&self) -> Result<User, RpcError> {
        self.invoke_typed(GET_CURRENT_USER, Vec::new()).await
    }

    async fn list_users(&self) -> Result<Vec<User>, RpcError> {
        self.invoke_typed(LIST_USERS, Vec::new()).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, RpcError> {
        let arg = serde_json::to_value(&user).map_err(|e| RpcError::Decode(e.to_string()))?;
        self.invoke_typed(CREATE_USER, vec![arg]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyadmin_bridge::Window;
    use easyadmin_common::{Origin, Role};
    use easyadmin_config::{ClientConfig, HostConfig};
    use easyadmin_host::{Args, Dispatcher, OperationError, OperationRegistry};

    fn connect(registry: OperationRegistry) -> CallProxy {
        let host = Window::new("http://localhost:8080");
        let (frame, client) = host.embed("http://localhost:3000");
        let host_config = HostConfig {
            origin: Origin::new("http://localhost:8080"),
            ..HostConfig::default()
        };
        let client_config = ClientConfig {
            host_origin: Origin::new("http://localhost:8080"),
            ..ClientConfig::default()
        };
        Dispatcher::new(&host_config, frame, registry).spawn(host);
        CallProxy::connect(&client_config, client).unwrap()
    }

    #[tokio::test]
    async fn create_user_sends_record_as_first_argument() {
        let mut registry = OperationRegistry::new();
        registry.register(CREATE_USER, |args: Args| async move {
            let new_user: NewUser = args.get(0)?;
            Ok::<_, OperationError>(serde_json::to_value(new_user.with_id("user-1"))?)
        });
        let proxy = connect(registry);

        let user = proxy
            .create_user(NewUser::new("Jiro Sato", "sato@example.com", Role::User))
            .await
            .unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "sato@example.com");
    }

    #[tokio::test]
    async fn get_current_user_decodes_record() {
        let mut registry = OperationRegistry::new();
        registry.register_typed(GET_CURRENT_USER, |_args: Args| async {
            Ok::<_, OperationError>(
                NewUser::new("Taro Tanaka", "tanaka@example.com", Role::Admin).with_id("user-123"),
            )
        });
        let proxy = connect(registry);

        let user = proxy.get_current_user().await.unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn malformed_record_is_a_decode_error() {
        let mut registry = OperationRegistry::new();
        registry.register(LIST_USERS, |_args: Args| async {
            Ok::<_, OperationError>(serde_json::json!([{"id": "user-1"}]))
        });
        let proxy = connect(registry);

        assert!(matches!(proxy.list_users().await, Err(RpcError::Decode(_))));
    }
}
