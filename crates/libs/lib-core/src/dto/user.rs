//! # User Data Transfer Objects
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /users`, `POST /register` - [`RegisterForm`] -> [`UserView`]
//! - `PUT /users/{id}` - [`UpdateForm`] -> [`UserView`]
//! - `GET /users`, `GET /users/{id}`, `GET /users/{role}/role`, `DELETE /users/{id}` -> [`UserView`]
//! - `POST /login` - [`LoginForm`] -> [`LoginResponse`]
//! - any failure -> [`ErrorResponse`]
//!
//! ## Wire Format
//!
//! Requests are `application/x-www-form-urlencoded`. Every form field defaults
//! to an empty string so a missing field reaches validation instead of being
//! rejected by the extractor. Responses are JSON.
//!
//! ```text
//! POST /register
//! Content-Type: application/x-www-form-urlencoded
//!
//! name=A&address=Jl.+Merdeka&telp=555&email=a%40x.com&password=pw
//! ```
//!
//! Response:
//! ```text
//! { "id": 1, "name": "A", "address": "Jl. Merdeka", "telp": 555, "email": "a@x.com", "role": "3" }
//! ```

use crate::model::store::User;
use serde::{Deserialize, Serialize};

/// Public projection of a [`User`]. The password hash and legacy token never leave the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub telp: i64,
    pub email: String,
    pub role: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            address: user.address,
            telp: user.telp,
            email: user.email,
            role: user.role,
        }
    }
}

/// Registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub address: String,
    /// Phone number; must parse as an integer
    pub telp: String,
    pub email: String,
    pub password: String,
}

/// Full overwrite of a user's mutable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateForm {
    pub name: String,
    pub address: String,
    pub telp: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Error body produced by `AppError`'s `IntoResponse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
