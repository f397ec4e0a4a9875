use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_create_employee_table::Employee;

static IDX_PERFORMANCE_REVIEW_EMPLOYEE_ID_REVIEW_PERIOD: &str = "idx-performance_review-employee_id_review_period";
static FK_PERFORMANCE_REVIEW_EMPLOYEE_ID: &str = "fk-performance_review-employee_id";
static FK_PERFORMANCE_REVIEW_REVIEWER_ID: &str = "fk-performance_review-reviewer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PerformanceReview::Table)
                    .if_not_exists()
                    .col(pk_auto(PerformanceReview::Id))
                    .col(integer(PerformanceReview::EmployeeId))
                    .col(integer(PerformanceReview::ReviewerId))
                    .col(string(PerformanceReview::ReviewPeriod))
                    .col(double_null(PerformanceReview::OverallRating))
                    .col(text_null(PerformanceReview::Goals))
                    .col(text_null(PerformanceReview::Achievements))
                    .col(text_null(PerformanceReview::AreasForImprovement))
                    .col(text_null(PerformanceReview::Feedback))
                    .col(text_null(PerformanceReview::EmployeeComments))
                    .col(string(PerformanceReview::Status))
                    .col(timestamp(PerformanceReview::ReviewDate))
                    .col(timestamp(PerformanceReview::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(PerformanceReview::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PERFORMANCE_REVIEW_EMPLOYEE_ID_REVIEW_PERIOD)
                    .table(PerformanceReview::Table)
                    .col(PerformanceReview::EmployeeId)
                    .col(PerformanceReview::ReviewPeriod)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PERFORMANCE_REVIEW_EMPLOYEE_ID)
                    .from_tbl(PerformanceReview::Table)
                    .from_col(PerformanceReview::EmployeeId)
                    .to_tbl(Employee::Table)
                    .to_col(Employee::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PERFORMANCE_REVIEW_REVIEWER_ID)
                    .from_tbl(PerformanceReview::Table)
                    .from_col(PerformanceReview::ReviewerId)
                    .to_tbl(Employee::Table)
                    .to_col(Employee::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PERFORMANCE_REVIEW_REVIEWER_ID)
                    .table(PerformanceReview::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PERFORMANCE_REVIEW_EMPLOYEE_ID)
                    .table(PerformanceReview::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PERFORMANCE_REVIEW_EMPLOYEE_ID_REVIEW_PERIOD)
                    .table(PerformanceReview::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PerformanceReview::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PerformanceReview {
    Table,
    Id,
    EmployeeId,
    ReviewerId,
    ReviewPeriod,
    OverallRating,
    Goals,
    Achievements,
    AreasForImprovement,
    Feedback,
    EmployeeComments,
    Status,
    ReviewDate,
    CreatedAt,
    UpdatedAt,
}
