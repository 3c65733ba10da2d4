//! Tabs mode state machine
//!
//! ```text
//! Inactive --viewport >= breakpoint--> Active (setup)
//! Active   --viewport <  breakpoint--> Inactive (teardown)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabsMode {
    /// Enhanced: roles applied, one panel visible
    Active,
    /// Plain stacked markup
    #[default]
    Inactive,
}

impl TabsMode {
    pub fn for_breakpoint(matches: bool) -> Self {
        if matches {
            TabsMode::Active
        } else {
            TabsMode::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TabsMode::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabsMode::Active => "active",
            TabsMode::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for TabsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TabsMode::Active),
            "inactive" => Ok(TabsMode::Inactive),
            _ => Err(format!("Unknown tabs mode: {}", s)),
        }
    }
}
