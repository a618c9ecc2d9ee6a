pub mod approval;
pub mod auth;
pub mod notification;
