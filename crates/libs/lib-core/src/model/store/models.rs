use sqlx::FromRow;

/// Role assigned to every newly registered user.
pub const DEFAULT_ROLE: &str = "3";

/// User entity representing a complete row of the `user` table.
///
/// `password` always holds a bcrypt hash. `token` is a legacy opaque value
/// written at creation and never used for authorization. `User` is
/// not `Serialize`; responses go through `dto::UserView`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub telp: i64,
    pub email: String,
    pub password: String,
    pub role: String,
    pub token: String,
}

/// Data structure for creating a new user.
///
/// Password must be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub name: String,
    pub address: String,
    pub telp: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub token: String,
}

impl UserForCreate {
    /// Create a registration payload with the default role and a fresh legacy token.
    pub fn new(
        name: String,
        address: String,
        telp: i64,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            name,
            address,
            telp,
            email,
            password_hash,
            role: DEFAULT_ROLE.to_string(),
            token: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// The row this payload becomes once the store has assigned `id`.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            address: self.address,
            telp: self.telp,
            email: self.email,
            password: self.password_hash,
            role: self.role,
            token: self.token,
        }
    }
}
