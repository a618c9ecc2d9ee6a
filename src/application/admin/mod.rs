//! Admin-only account management use cases

mod approve_user;
mod list_users;
mod suspend_user;

pub use approve_user::ApproveUserUseCase;
pub use list_users::ListUsersUseCase;
pub use suspend_user::SuspendUserUseCase;
