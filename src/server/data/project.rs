use std::collections::HashMap;

use entity::sea_orm_active_enums::ProjectStatus;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct ProjectRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProjectRepository<'a, C> {
    /// Creates a new instance of [`ProjectRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::project::Model>, DbErr> {
        entity::prelude::Project::find_by_id(id).one(self.db).await
    }

    /// Projects that work can currently be logged against, ordered by name
    pub async fn list_active(&self) -> Result<Vec<entity::project::Model>, DbErr> {
        entity::prelude::Project::find()
            .filter(entity::project::Column::Status.eq(ProjectStatus::Active))
            .order_by_asc(entity::project::Column::Name)
            .all(self.db)
            .await
    }

    /// Returns a map of project ID to name for the provided IDs
    pub async fn names_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let projects = entity::prelude::Project::find()
            .filter(entity::project::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(projects.into_iter().map(|p| (p.id, p.name)).collect())
    }
}

#[cfg(test)]
mod tests {
    mod list_active {
        use entity::sea_orm_active_enums::ProjectStatus;
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::project::ProjectRepository;

        /// Expect completed and on-hold projects to be excluded
        #[tokio::test]
        async fn excludes_inactive_projects() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            test.work().insert_project("Payroll", ProjectStatus::Active).await?;
            test.work().insert_project("Legacy", ProjectStatus::Completed).await?;
            test.work().insert_project("Parked", ProjectStatus::OnHold).await?;

            let repo = ProjectRepository::new(&test.db);
            let projects = repo.list_active().await?;

            assert_eq!(projects.len(), 1);
            assert_eq!(projects[0].name, "Payroll");

            Ok(())
        }
    }
}
