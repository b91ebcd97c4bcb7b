//! Role changes and removal of note members.

pub mod service;

pub use service::{MEMBER_NOT_FOUND, MemberService};
