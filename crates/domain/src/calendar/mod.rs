pub mod engine;
mod grid;

pub use grid::{CalendarDay, CalendarGrid, CalendarMonth, CalendarView, CalendarWeek, DateRange};
