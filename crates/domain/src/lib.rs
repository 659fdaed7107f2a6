mod approval;
mod calendar_event;
mod command;
mod post;
mod schedule;
mod shared;

pub mod calendar;
pub mod date;

pub use approval::{ApprovalOutcome, PostPreview};
pub use calendar::{CalendarDay, CalendarGrid, CalendarMonth, CalendarView, CalendarWeek, DateRange};
pub use calendar_event::{CalendarEvent, EventColor};
pub use command::Command;
pub use post::{Post, PostContent, PostStatus, SocialPlatform};
pub use schedule::{Schedule, ScheduleStatus};
pub use shared::entity::{Entity, ID};
