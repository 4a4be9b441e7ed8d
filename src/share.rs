//! Share a landed destination on social platforms

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::WheelError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    Facebook,
    Twitter,
    Instagram,
}

/// What the front end should do to share
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ShareAction {
    /// Open a platform share intent in a new window
    OpenUrl(String),
    /// Copy text to the clipboard; the platform has no web share intent
    CopyToClipboard(String),
}

/// Link back to the wheel for a given address
#[must_use]
pub fn share_url(base_url: &str, address: &str) -> String {
    format!("{base_url}?location={}", urlencoding::encode(address))
}

#[must_use]
pub fn share_text(address: &str) -> String {
    format!("I landed on {address} on the Earth wheel! Try your luck!")
}

#[must_use]
pub fn share_action(target: ShareTarget, address: &str, base_url: &str) -> ShareAction {
    let url = share_url(base_url, address);
    let text = share_text(address);

    match target {
        ShareTarget::Facebook => {
            ShareAction::OpenUrl(format!("https://www.facebook.com/sharer/sharer.php?u={url}"))
        }
        ShareTarget::Twitter => ShareAction::OpenUrl(format!(
            "https://twitter.com/intent/tweet?text={}&url={url}",
            urlencoding::encode(&text)
        )),
        ShareTarget::Instagram => ShareAction::CopyToClipboard(format!("{text} {url}")),
    }
}

impl fmt::Display for ShareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareAction::OpenUrl(url) => write!(f, "open {url}"),
            ShareAction::CopyToClipboard(text) => write!(f, "copy \"{text}\""),
        }
    }
}

impl FromStr for ShareTarget {
    type Err = WheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "facebook" => Ok(ShareTarget::Facebook),
            "twitter" | "x" => Ok(ShareTarget::Twitter),
            "instagram" => Ok(ShareTarget::Instagram),
            other => Err(WheelError::validation(format!(
                "Unknown share target '{other}'. Must be one of: facebook, twitter, instagram"
            ))),
        }
    }
}
