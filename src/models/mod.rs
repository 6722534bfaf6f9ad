mod activity;
mod audit_event;
mod exam;
mod member;
mod news_item;
mod photo;
mod poll;
mod tag;

pub use activity::Activity;
pub use audit_event::AuditEvent;
pub use exam::Exam;
pub use member::Member;
pub use news_item::NewsItem;
pub use photo::Photo;
pub use poll::{Poll, PollOption};
pub use tag::Tag;
