pub mod category;
pub mod date;
pub mod days;
pub mod error;
pub mod goals;
pub mod habit;
pub mod service;

pub use crate::service::{HabitBoard, HabitBoardBuilder};
