use async_trait::async_trait;
use contracts::system::administrators::{
    Administrator, AdministratorsResponse, CreateAdministratorDto, DeleteAdministratorDto,
};
use contracts::system::auth::NoBody;
use std::cell::RefCell;
use std::rc::Rc;

use crate::shared::error::ApiError;
use crate::shared::row_editor::Editable;
use crate::shared::sync::ListSource;
use crate::system::auth::client::AuthClient;
use crate::system::auth::transport::Method;

pub const CREATE_FAILED: &str = "Ошибка при создании администратора";

impl Editable for Administrator {
    type Id = String;

    fn id(&self) -> String {
        self.login.clone()
    }
}

pub async fn fetch_administrators(client: &AuthClient) -> Result<AdministratorsResponse, ApiError> {
    let response: AdministratorsResponse = client
        .call(Method::Post, "fetch_administrators", &NoBody {})
        .await?;
    if response.success && response.administrators.is_some() {
        Ok(response)
    } else {
        log::error!("fetch_administrators: success={}, no administrators", response.success);
        Err(ApiError::Rejected("Не удалось загрузить администраторов".to_string()))
    }
}

pub async fn create_administrator(
    client: &AuthClient,
    dto: &CreateAdministratorDto,
) -> Result<(), ApiError> {
    client.command(Method::Post, "signup_admin", dto).await
}

pub async fn delete_administrator(client: &AuthClient, login: &str) -> Result<(), ApiError> {
    client
        .command(
            Method::Delete,
            "delete_administrator",
            &DeleteAdministratorDto {
                login: login.to_string(),
            },
        )
        .await
}

/// Список администраторов; запоминает логин владельца сессии
#[derive(Clone)]
pub struct AdministratorsSource {
    client: AuthClient,
    current_login: Rc<RefCell<Option<String>>>,
}

impl AdministratorsSource {
    pub fn new(client: AuthClient) -> Self {
        Self {
            client,
            current_login: Rc::new(RefCell::new(None)),
        }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }

    /// Login of the signed-in admin as of the last successful fetch
    pub fn current_login(&self) -> Option<String> {
        self.current_login.borrow().clone()
    }

    pub fn is_current(&self, login: &str) -> bool {
        self.current_login.borrow().as_deref() == Some(login)
    }
}

#[async_trait(?Send)]
impl ListSource for AdministratorsSource {
    type Record = Administrator;

    async fn fetch(&self) -> Result<Vec<Administrator>, ApiError> {
        let response = fetch_administrators(&self.client).await?;
        *self.current_login.borrow_mut() = response.current_login_admin;
        Ok(response.administrators.unwrap_or_default())
    }
}
