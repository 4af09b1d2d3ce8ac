pub mod children;
pub mod organizations;
pub mod profiles;

pub use children::{AchievementRepository, StatRepository, VideoRepository};
pub use organizations::OrganizationRepository;
pub use profiles::ProfileRepository;
