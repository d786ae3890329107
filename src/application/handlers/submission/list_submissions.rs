//! ListSubmissionsHandler - Query handler for filtered, paged listings.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{CommandMetadata, Timestamp, UserId};
use crate::domain::submission::{Submission, SubmissionError, SubmissionStatus};
use crate::ports::{SubmissionFilter, SubmissionRepository, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw listing parameters as received from the caller.
///
/// Blank values are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct ListSubmissionsQuery {
    /// Owner to filter by; honoured for admins only.
    pub customer_id: Option<String>,
    pub status: Option<String>,
    /// Inclusive, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

pub struct ListSubmissionsHandler {
    submissions: Arc<dyn SubmissionRepository>,
}

impl ListSubmissionsHandler {
    pub fn new(submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { submissions }
    }

    pub async fn handle(
        &self,
        query: ListSubmissionsQuery,
        metadata: CommandMetadata,
    ) -> Result<Vec<Submission>, SubmissionError> {
        let filter = build_filter(query, &metadata)?;
        Ok(self.submissions.list(&filter).await?)
    }
}

/// Turns raw parameters into a filter scoped to what the actor may see.
pub fn build_filter(
    query: ListSubmissionsQuery,
    metadata: &CommandMetadata,
) -> Result<SubmissionFilter, SubmissionError> {
    let owner_id = if metadata.sees_all() {
        match present(query.customer_id) {
            Some(id) => Some(
                UserId::new(id)
                    .map_err(|e| SubmissionError::invalid_filter("customer_id", e.to_string()))?,
            ),
            None => None,
        }
    } else {
        Some(metadata.user_id.clone())
    };

    let status = present(query.status)
        .map(|s| {
            s.parse::<SubmissionStatus>()
                .map_err(|_| SubmissionError::invalid_filter("status", format!("unknown status {}", s)))
        })
        .transpose()?;

    let created_from = parse_date("start_date", query.start_date)?.map(Timestamp::start_of_day);
    let created_to = parse_date("end_date", query.end_date)?.map(Timestamp::end_of_day);
    if let (Some(from), Some(to)) = (&created_from, &created_to) {
        if to.is_before(from) {
            return Err(SubmissionError::invalid_filter(
                "end_date",
                "must not be before start_date",
            ));
        }
    }

    let limit = match parse_count("limit", query.limit)? {
        None | Some(0) => DEFAULT_PAGE_LIMIT,
        Some(n) => n.min(MAX_PAGE_LIMIT),
    };
    let offset = parse_count("offset", query.offset)?.unwrap_or(0);

    Ok(SubmissionFilter {
        owner_id,
        status,
        created_from,
        created_to,
        limit,
        offset,
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, SubmissionError> {
    present(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, DATE_FORMAT)
                .map_err(|_| SubmissionError::invalid_filter(field, "expected YYYY-MM-DD"))
        })
        .transpose()
}

fn parse_count(field: &str, value: Option<String>) -> Result<Option<u32>, SubmissionError> {
    present(value)
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| SubmissionError::invalid_filter(field, "expected a non-negative integer"))
        })
        .transpose()
}
