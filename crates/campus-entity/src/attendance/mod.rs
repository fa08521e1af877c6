//! Attendance entity: per-class records and aggregate statistics.

pub mod model;
pub mod status;

pub use model::{
    AttendanceDetail, AttendanceFilter, AttendanceRecord, AttendanceStats, AttendanceUpdate,
    NewAttendance, StatsFilter,
};
pub use status::AttendanceStatus;
