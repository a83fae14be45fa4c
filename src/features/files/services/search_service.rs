use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{
    FileCategory, FileListResponseDto, FileResponseDto, FileType, ListFilesQuery, SearchFilesQuery,
    SortBy, SortOrder,
};
use crate::features::files::models::FileRecord;
use crate::features::files::services::relevance;
use crate::shared::types::{PageInfo, PaginationQuery};

/// Execution path chosen for a list/search request.
///
/// A present, non-whitespace query term selects the scored path; everything
/// else is a plain store-side sorted listing. `sort_by=relevance` without a
/// query term falls back to `date desc`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPlan {
    Listing { sort_by: SortBy, sort_order: SortOrder },
    Scored { query_lower: String },
}

impl QueryPlan {
    pub fn build(q: Option<&str>, sort_by: SortBy, sort_order: SortOrder) -> Self {
        match q.map(str::trim).filter(|q| !q.is_empty()) {
            Some(term) => QueryPlan::Scored {
                query_lower: term.to_lowercase(),
            },
            None => match sort_by {
                SortBy::Relevance => QueryPlan::Listing {
                    sort_by: SortBy::Date,
                    sort_order: SortOrder::Desc,
                },
                other => QueryPlan::Listing {
                    sort_by: other,
                    sort_order,
                },
            },
        }
    }
}

/// Runs list and search queries over a caller's files.
///
/// The scored path loads the full candidate set (bounded by the configured
/// cap), ranks it in memory, and paginates afterwards; the listing path lets
/// the database sort and slice.
pub struct SearchService {
    pool: PgPool,
    max_candidates: i64,
}

impl SearchService {
    pub fn new(pool: PgPool, max_candidates: i64) -> Self {
        Self {
            pool,
            max_candidates,
        }
    }

    /// `GET /api/files` — owner-scoped listing with optional type/category
    /// filters and store-side sorting.
    pub async fn list(&self, owner_id: Uuid, query: &ListFilesQuery) -> Result<FileListResponseDto> {
        self.run_listing(
            owner_id,
            query.file_type,
            query.category,
            query.sort_by,
            query.sort_order,
            &query.pagination(),
        )
        .await
    }

    /// `GET /api/files/search` — same filters, plus an optional free-text
    /// term that switches execution to in-memory relevance ranking.
    pub async fn search(
        &self,
        owner_id: Uuid,
        query: &SearchFilesQuery,
    ) -> Result<FileListResponseDto> {
        let plan = QueryPlan::build(query.q.as_deref(), query.sort_by, query.sort_order);
        let pagination = query.pagination();

        match plan {
            QueryPlan::Listing { sort_by, sort_order } => {
                self.run_listing(
                    owner_id,
                    query.file_type,
                    query.category,
                    sort_by,
                    sort_order,
                    &pagination,
                )
                .await
            }
            QueryPlan::Scored { query_lower } => {
                self.run_scored(
                    owner_id,
                    query.file_type,
                    query.category,
                    &query_lower,
                    &pagination,
                )
                .await
            }
        }
    }

    async fn run_listing(
        &self,
        owner_id: Uuid,
        file_type: Option<FileType>,
        category: Option<FileCategory>,
        sort_by: SortBy,
        sort_order: SortOrder,
        pagination: &PaginationQuery,
    ) -> Result<FileListResponseDto> {
        let file_type = file_type.map(|t| t.as_str());
        let category = category.map(|c| c.as_str());

        let total_items: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM files
            WHERE owner_id = $1
              AND ($2::text IS NULL OR file_type = $2)
              AND ($3::text IS NULL OR category = $3)
            "#,
        )
        .bind(owner_id)
        .bind(file_type)
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count files for owner {}: {:?}", owner_id, e);
            AppError::Database(e)
        })?;

        let sql = format!(
            r#"
            SELECT *
            FROM files
            WHERE owner_id = $1
              AND ($2::text IS NULL OR file_type = $2)
              AND ($3::text IS NULL OR category = $3)
            ORDER BY {} {}
            LIMIT $4 OFFSET $5
            "#,
            order_column(sort_by),
            order_direction(sort_order),
        );

        let records = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(owner_id)
            .bind(file_type)
            .bind(category)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list files for owner {}: {:?}", owner_id, e);
                AppError::Database(e)
            })?;

        Ok(FileListResponseDto {
            files: records.into_iter().map(FileResponseDto::from).collect(),
            pagination: PageInfo::new(pagination.page(), pagination.limit(), total_items),
        })
    }

    async fn run_scored(
        &self,
        owner_id: Uuid,
        file_type: Option<FileType>,
        category: Option<FileCategory>,
        query_lower: &str,
        pagination: &PaginationQuery,
    ) -> Result<FileListResponseDto> {
        let file_type = file_type.map(|t| t.as_str());
        let category = category.map(|c| c.as_str());

        // Full candidate set in store order; `seq` is the stable tie-break.
        let candidates = sqlx::query_as::<_, FileRecord>(
            r#"
            SELECT *
            FROM files
            WHERE owner_id = $1
              AND ($2::text IS NULL OR file_type = $2)
              AND ($3::text IS NULL OR category = $3)
            ORDER BY seq ASC
            LIMIT $4
            "#,
        )
        .bind(owner_id)
        .bind(file_type)
        .bind(category)
        .bind(self.max_candidates)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch search candidates for owner {}: {:?}", owner_id, e);
            AppError::Database(e)
        })?;

        let now = Utc::now();
        let mut scored: Vec<(f64, FileRecord)> = candidates
            .into_iter()
            .map(|record| (relevance::score(&record, query_lower, now), record))
            .collect();
        // sort_by is stable, so equal scores keep store order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let total_items = scored.len() as i64;
        let skip = pagination.offset() as usize;
        let limit = pagination.limit() as usize;

        let files: Vec<FileResponseDto> = scored
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, record)| FileResponseDto::from(record))
            .collect();

        Ok(FileListResponseDto {
            files,
            pagination: PageInfo::new(pagination.page(), pagination.limit(), total_items),
        })
    }
}

fn order_column(sort_by: SortBy) -> &'static str {
    match sort_by {
        // relevance never reaches the listing path; planner rewrites it
        SortBy::Relevance | SortBy::Date => "created_at",
        SortBy::Name => "title",
        SortBy::Size => "size",
        SortBy::Views => "view_count",
    }
}

fn order_direction(sort_order: SortOrder) -> &'static str {
    match sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_query_selects_listing_mode() {
        let plan = QueryPlan::build(Some("   "), SortBy::Date, SortOrder::Asc);
        assert_eq!(
            plan,
            QueryPlan::Listing {
                sort_by: SortBy::Date,
                sort_order: SortOrder::Asc
            }
        );

        let plan = QueryPlan::build(None, SortBy::Views, SortOrder::Desc);
        assert_eq!(
            plan,
            QueryPlan::Listing {
                sort_by: SortBy::Views,
                sort_order: SortOrder::Desc
            }
        );
    }

    #[test]
    fn relevance_without_query_falls_back_to_date() {
        let plan = QueryPlan::build(None, SortBy::Relevance, SortOrder::Desc);
        assert_eq!(
            plan,
            QueryPlan::Listing {
                sort_by: SortBy::Date,
                sort_order: SortOrder::Desc
            }
        );
    }

    #[test]
    fn non_empty_query_selects_scored_mode_lowercased() {
        let plan = QueryPlan::build(Some("  Vacation "), SortBy::Relevance, SortOrder::Desc);
        assert_eq!(
            plan,
            QueryPlan::Scored {
                query_lower: "vacation".to_string()
            }
        );
    }

    #[test]
    fn listing_order_columns_are_known_identifiers() {
        for sort_by in [SortBy::Date, SortBy::Name, SortBy::Size, SortBy::Views] {
            let column = order_column(sort_by);
            assert!(column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }
}
