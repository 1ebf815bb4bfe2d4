pub mod add_account;
pub mod attempt;
pub mod grade;
pub mod import;
pub mod init;
pub mod list;
pub mod show;
pub mod validate;
