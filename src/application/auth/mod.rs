//! Authentication use cases

mod bootstrap_admin;
mod get_current_user;
mod login_user;
mod logout_user;
mod register_user;

pub use bootstrap_admin::{BootstrapAdminCommand, BootstrapAdminUseCase};
pub use get_current_user::GetCurrentUserUseCase;
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use register_user::{ContactMethod, RegisterUserCommand, RegisterUserUseCase};
