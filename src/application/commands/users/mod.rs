mod login;
mod password;
mod register;
mod service;

pub use login::{LoginResult, LoginUserCommand};
pub use password::MIN_PASSWORD_LENGTH;
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
