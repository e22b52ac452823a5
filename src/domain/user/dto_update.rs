/// Display fields a user may change on their own profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileDto {
    pub first_name: String,
    pub last_name: String,
}
