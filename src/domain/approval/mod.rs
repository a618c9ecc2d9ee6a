//! Admin-only approval and suspension of accounts

pub mod services;

pub use services::ApprovalService;
