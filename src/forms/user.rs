use serde::Deserialize;
use serde_valid::Validate;

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(min_length = 3)]
    #[validate(max_length = 64)]
    #[validate(pattern = r"^[A-Za-z0-9_.\-]+$")]
    pub username: String,
    #[validate(min_length = 8)]
    #[validate(max_length = 128)]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 64)]
    pub username: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 128)]
    pub password: String,
}

// passwords stay out of logs and instrument spans
impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
