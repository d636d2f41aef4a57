pub mod admin;
pub mod approve;
pub mod create;
pub mod execute;
pub mod propose;
pub mod show;
