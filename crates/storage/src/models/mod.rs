mod user;
mod workout_record;

pub use user::User;
pub use workout_record::WorkoutRecord;
