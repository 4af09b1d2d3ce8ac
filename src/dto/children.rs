use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::policy::OwnedChild;
use crate::validation::{validate_absolute_url, validate_emoji};

/// One row of a batch achievement edit. `id` present means update, absent
/// means insert. Any submitted `profile_id` is overwritten by policy.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AchievementInput {
    pub id: Option<Uuid>,
    pub profile_id: Option<Uuid>,

    #[validate(
        length(min = 1, max = 10, message = "Emoji must be between 1 and 10 characters"),
        custom(function = "validate_emoji")
    )]
    pub emoji: String,

    pub achievement: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatInput {
    pub id: Option<Uuid>,
    pub profile_id: Option<Uuid>,

    pub date: NaiveDate,

    #[validate(length(max = 100, message = "Event must be at most 100 characters"))]
    pub event: String,

    #[validate(length(max = 100, message = "Performance must be at most 100 characters"))]
    pub performance: String,

    #[validate(length(max = 100, message = "Highlight must be at most 100 characters"))]
    pub highlight: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VideoInput {
    pub id: Option<Uuid>,
    pub profile_id: Option<Uuid>,

    #[validate(
        length(max = 500, message = "URL must be at most 500 characters"),
        custom(function = "validate_absolute_url")
    )]
    pub url: String,
}

/// Batch replace-or-upsert payloads for the nested child editors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveAchievementsRequest {
    #[validate(nested)]
    pub items: Vec<AchievementInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveStatsRequest {
    #[validate(nested)]
    pub items: Vec<StatInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveVideosRequest {
    #[validate(nested)]
    pub items: Vec<VideoInput>,
}

impl OwnedChild for AchievementInput {
    fn set_profile_id(&mut self, profile_id: Uuid) {
        self.profile_id = Some(profile_id);
    }
}

impl OwnedChild for StatInput {
    fn set_profile_id(&mut self, profile_id: Uuid) {
        self.profile_id = Some(profile_id);
    }
}

impl OwnedChild for VideoInput {
    fn set_profile_id(&mut self, profile_id: Uuid) {
        self.profile_id = Some(profile_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_text_fails_emoji_validation() {
        let input = AchievementInput {
            id: None,
            profile_id: None,
            emoji: "GOAL".to_string(),
            achievement: Some("Scored the winner".to_string()),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("emoji"));
    }

    #[test]
    fn trophy_emoji_passes_validation() {
        let input = AchievementInput {
            id: None,
            profile_id: None,
            emoji: "🏆".to_string(),
            achievement: None,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn batch_validation_reports_nested_errors() {
        let req = SaveAchievementsRequest {
            items: vec![
                AchievementInput {
                    id: None,
                    profile_id: None,
                    emoji: "🎯".to_string(),
                    achievement: None,
                },
                AchievementInput {
                    id: None,
                    profile_id: None,
                    emoji: "first place".to_string(),
                    achievement: None,
                },
            ],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn video_url_must_be_absolute() {
        let input = VideoInput {
            id: None,
            profile_id: None,
            url: "watch?v=abc".to_string(),
        };
        assert!(input.validate().is_err());

        let input = VideoInput {
            id: None,
            profile_id: None,
            url: "https://youtube.com/watch?v=abc".to_string(),
        };
        assert!(input.validate().is_ok());
    }
}
