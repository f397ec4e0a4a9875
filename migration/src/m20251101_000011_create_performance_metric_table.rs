use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000010_create_performance_review_table::PerformanceReview;

static IDX_PERFORMANCE_METRIC_REVIEW_ID: &str = "idx-performance_metric-review_id";
static FK_PERFORMANCE_METRIC_REVIEW_ID: &str = "fk-performance_metric-review_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PerformanceMetric::Table)
                    .if_not_exists()
                    .col(pk_auto(PerformanceMetric::Id))
                    .col(integer(PerformanceMetric::ReviewId))
                    .col(string(PerformanceMetric::MetricName))
                    .col(double(PerformanceMetric::Rating))
                    .col(text_null(PerformanceMetric::Comments))
                    .col(double(PerformanceMetric::Weight).default(1.0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PERFORMANCE_METRIC_REVIEW_ID)
                    .table(PerformanceMetric::Table)
                    .col(PerformanceMetric::ReviewId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PERFORMANCE_METRIC_REVIEW_ID)
                    .from_tbl(PerformanceMetric::Table)
                    .from_col(PerformanceMetric::ReviewId)
                    .to_tbl(PerformanceReview::Table)
                    .to_col(PerformanceReview::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PERFORMANCE_METRIC_REVIEW_ID)
                    .table(PerformanceMetric::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PERFORMANCE_METRIC_REVIEW_ID)
                    .table(PerformanceMetric::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PerformanceMetric::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PerformanceMetric {
    Table,
    Id,
    ReviewId,
    MetricName,
    Rating,
    Comments,
    Weight,
}
