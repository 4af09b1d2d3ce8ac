pub mod achievement;
pub mod organization;
pub mod profile;
pub mod stat;
pub mod video;

pub use achievement::Achievement;
pub use organization::{Organization, School};
pub use profile::{Athlete, Person, Profile};
pub use stat::Stat;
pub use video::Video;
