pub mod auth;
pub mod uploads;
pub mod workouts;
