//! Greeting banner
//!
//! ```text
//! 220 dict.dict.org dictd 1.12.1/rf on Linux 4.19.0 <auth.mime> <27613.1699999999@dict.dict.org>
//!     └──────────────── text ─────────────────────┘ └capabilities┘ └────── message id ─────────┘
//! ```

use crate::error::Result;
use super::status::{Status, GREETING};

/// The server's 220 banner, split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Greeting {
    text: String,
    capabilities: Vec<String>,
    message_id: Option<String>,
}

impl Greeting {
    /// Validate the first status of a session and decode its banner.
    ///
    /// Any code other than 220 is returned as a protocol error carrying
    /// that code.
    pub fn from_status(status: Status) -> Result<Self> {
        let status = status.expect_code(GREETING)?;
        Ok(Self::parse(status.detail().unwrap_or("")))
    }

    /// Decode banner text (the part after `220 `)
    pub fn parse(detail: &str) -> Self {
        let text_end = detail.find('<').unwrap_or(detail.len());
        let mut greeting = Self {
            text: detail[..text_end].trim().to_string(),
            ..Self::default()
        };

        let mut rest = &detail[text_end..];
        while let Some(open) = rest.find('<') {
            let Some(len) = rest[open + 1..].find('>') else {
                break;
            };
            let group = &rest[open + 1..open + 1 + len];
            if group.contains('@') {
                greeting.message_id = Some(format!("<{}>", group));
            } else {
                greeting
                    .capabilities
                    .extend(group.split('.').filter(|c| !c.is_empty()).map(str::to_string));
            }
            rest = &rest[open + 1 + len + 1..];
        }
        greeting
    }

    /// Banner text without the angle-bracket groups
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Advertised extensions, e.g. `auth`, `mime`
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Message id used by AUTH, brackets included
    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }
}
