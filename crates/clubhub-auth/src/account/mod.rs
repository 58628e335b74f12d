//! Account provisioning and login.

mod service;

pub use service::AccountService;
