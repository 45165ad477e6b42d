use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AccountSettings {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            name: "Demo User".to_string(),
            email: "user@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            company: "Acme Inc.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplaySettings {
    pub theme: String,
    pub density: String,
    pub language: String,
    pub timezone: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            density: "comfortable".to_string(),
            language: "en".to_string(),
            timezone: "utc-7".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NotificationSettings {
    pub email_new_lead: bool,
    pub email_deal_update: bool,
    pub email_task_reminder: bool,
    pub app_mentions: bool,
    pub app_comments: bool,
    pub app_system: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_new_lead: true,
            email_deal_update: true,
            email_task_reminder: true,
            app_mentions: true,
            app_comments: true,
            app_system: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssistantSettings {
    pub enabled: bool,
    pub proactive_suggestions: bool,
    pub data_usage_for_training: bool,
    pub model: String,
    pub language: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            proactive_suggestions: true,
            data_usage_for_training: false,
            model: "default".to_string(),
            language: "auto".to_string(),
        }
    }
}

/// Everything the settings panel edits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Preferences {
    #[serde(default)]
    pub account: AccountSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub assistant: AssistantSettings,
}

/// Response for settings endpoint
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettingsResponse {
    pub config_file_path: String,
    pub email_provider_configured: bool,
    pub preferences: Preferences,
}
