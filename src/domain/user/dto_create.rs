use super::UserRole;

/// Everything a new user record needs except the generated id and
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub email_verified: bool,
    pub email_verification_token: Option<String>,
    pub two_factor_enabled: bool,
    pub two_factor_secret: Option<String>,
}

impl CreateUserDto {
    /// Active, unverified `user`-role account without a second factor.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password_hash: password_hash.into(),
            role: UserRole::User,
            is_active: true,
            email_verified: false,
            email_verification_token: None,
            two_factor_enabled: false,
            two_factor_secret: None,
        }
    }
}
