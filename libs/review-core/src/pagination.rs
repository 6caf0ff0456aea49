//! Review queue pagination.
//!
//! The backend has no "due within N days" parameter. With the `all` filter
//! paging is delegated to the server; any other filter fetches a superset
//! (`showAll=true`) and pages locally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::types::DisplayReviewProblem;

/// Limit requested when paging locally.
pub const CLIENT_FETCH_LIMIT: u32 = 1000;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Client-only "due within N days" filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DaysAheadFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "3days")]
    ThreeDays,
    #[serde(rename = "7days")]
    SevenDays,
}

impl DaysAheadFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::OneDay => "1day",
            Self::ThreeDays => "3days",
            Self::SevenDays => "7days",
        }
    }

    /// Day horizon, or `None` for server-side paging.
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::OneDay => Some(1),
            Self::ThreeDays => Some(3),
            Self::SevenDays => Some(7),
        }
    }

    pub fn is_client_side(&self) -> bool {
        self.days().is_some()
    }
}

impl FromStr for DaysAheadFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Self::All),
            "1day" => Ok(Self::OneDay),
            "3days" => Ok(Self::ThreeDays),
            "7days" => Ok(Self::SevenDays),
            other => Err(CoreError::InvalidFilter(other.to_string())),
        }
    }
}

impl fmt::Display for DaysAheadFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query string for `GET /review/queue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_all: bool,
}

/// Paging metadata reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPaging {
    pub total_count: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// One rendered page of the review queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuePage {
    pub items: Vec<DisplayReviewProblem>,
    pub total_count: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub filter: DaysAheadFilter,
}

/// Filter and slice a merged list locally.
///
/// Cards with a malformed due date have no day count and never match.
pub fn paginate(
    merged: Vec<DisplayReviewProblem>,
    days: i64,
    page: u32,
    page_size: u32,
) -> Result<(Vec<DisplayReviewProblem>, u64, u32)> {
    if page_size == 0 {
        return Err(CoreError::InvalidPageSize);
    }

    let filtered: Vec<DisplayReviewProblem> = merged
        .into_iter()
        .filter(|p| p.days_until_due.is_some_and(|d| d <= days))
        .collect();

    let total_count = filtered.len() as u64;
    let total_pages = total_count.div_ceil(page_size as u64) as u32;

    let start = (page.max(1) as usize - 1).saturating_mul(page_size as usize);
    let items = filtered
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Ok((items, total_count, total_pages))
}

/// Filter and page state of the review queue screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQueueView {
    filter: DaysAheadFilter,
    current_page: u32,
    page_size: u32,
}

impl ReviewQueueView {
    pub fn new(page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(CoreError::InvalidPageSize);
        }
        Ok(Self {
            filter: DaysAheadFilter::All,
            current_page: 1,
            page_size,
        })
    }

    pub fn filter(&self) -> DaysAheadFilter {
        self.filter
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Change filter. Always resets to the first page.
    pub fn set_filter(&mut self, filter: DaysAheadFilter) {
        self.filter = filter;
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Query to send for the current state.
    pub fn query(&self) -> QueueQuery {
        if self.filter.is_client_side() {
            QueueQuery {
                limit: Some(CLIENT_FETCH_LIMIT),
                page: 1,
                page_size: CLIENT_FETCH_LIMIT,
                show_all: true,
            }
        } else {
            QueueQuery {
                limit: None,
                page: self.current_page,
                page_size: self.page_size,
                show_all: false,
            }
        }
    }

    /// Build the page to render from the merged list and the server's paging.
    pub fn apply(
        &self,
        merged: Vec<DisplayReviewProblem>,
        server: ServerPaging,
    ) -> Result<QueuePage> {
        match self.filter.days() {
            None => Ok(QueuePage {
                items: merged,
                total_count: server.total_count,
                current_page: server.current_page,
                page_size: self.page_size,
                total_pages: server.total_pages,
                filter: self.filter,
            }),
            Some(days) => {
                let (items, total_count, total_pages) =
                    paginate(merged, days, self.current_page, self.page_size)?;
                Ok(QueuePage {
                    items,
                    total_count,
                    current_page: self.current_page,
                    page_size: self.page_size,
                    total_pages,
                    filter: self.filter,
                })
            }
        }
    }
}
