pub mod user;
pub mod workout;

pub use user::UserRepository;
pub use workout::WorkoutRepository;
