use std::fmt;

use serde::{Deserialize, Serialize};

/// Terminal outcome of one record's pass through the harvester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    /// Adequate content on the first page load
    SuccessContentFound,
    /// Adequate content after following a discovered about link
    SuccessFollowedLink,
    FailedContentTooShortFollowed,
    FailedNoAboutLinkFound,
    FailedInvalidInitialUrl,
    FailedTimeoutInitial,
    FailedTimeoutFollowedLink,
    FailedWebdriverErrorInitial,
    FailedWebdriverFollowedLink,
    FailedExceptionFollowedLink,
    FailedGeneralException,
    /// The supervisor killed the attempt at its wall-clock deadline
    FailedProcessTimeout,
    /// The isolated context exited without handing back a result
    FailedNoResultFromProcess,
    SkippedNoUrl,
    /// Existing content already scored as adequate; never scraped
    SkippedPrefilter,
}

impl ScrapeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuccessContentFound => "success_content_found",
            Self::SuccessFollowedLink => "success_followed_link",
            Self::FailedContentTooShortFollowed => "failed_content_too_short_followed",
            Self::FailedNoAboutLinkFound => "failed_no_about_link_found",
            Self::FailedInvalidInitialUrl => "failed_invalid_initial_url",
            Self::FailedTimeoutInitial => "failed_timeout_initial",
            Self::FailedTimeoutFollowedLink => "failed_timeout_followed_link",
            Self::FailedWebdriverErrorInitial => "failed_webdriver_error_initial",
            Self::FailedWebdriverFollowedLink => "failed_webdriver_followed_link",
            Self::FailedExceptionFollowedLink => "failed_exception_followed_link",
            Self::FailedGeneralException => "failed_general_exception",
            Self::FailedProcessTimeout => "failed_process_timeout",
            Self::FailedNoResultFromProcess => "failed_no_result_from_process",
            Self::SkippedNoUrl => "skipped_no_url",
            Self::SkippedPrefilter => "skipped_prefilter",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::SuccessContentFound | Self::SuccessFollowedLink)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::SkippedNoUrl | Self::SkippedPrefilter)
    }
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
