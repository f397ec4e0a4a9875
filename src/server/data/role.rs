use std::collections::HashMap;

use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

pub struct RoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoleRepository<'a, C> {
    /// Creates a new instance of [`RoleRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a role and grants it the provided permissions
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        permissions: &[&str],
    ) -> Result<entity::role::Model, DbErr> {
        let role = entity::prelude::Role::insert(entity::role::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(description.map(str::to_string)),
            created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await?;

        if !permissions.is_empty() {
            let grants = permissions
                .iter()
                .map(|permission| entity::role_permission::ActiveModel {
                    role_id: ActiveValue::Set(role.id),
                    permission: ActiveValue::Set(permission.to_string()),
                    ..Default::default()
                });

            entity::prelude::RolePermission::insert_many(grants)
                .exec(self.db)
                .await?;
        }

        Ok(role)
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::role::Model>, DbErr> {
        entity::prelude::Role::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::role::Model>, DbErr> {
        entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Lists all roles ordered by name
    pub async fn list(&self) -> Result<Vec<entity::role::Model>, DbErr> {
        entity::prelude::Role::find()
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Role::find().count(self.db).await
    }

    /// Permission strings granted to a role, ordered alphabetically
    pub async fn permissions(&self, role_id: i32) -> Result<Vec<String>, DbErr> {
        let grants = entity::prelude::RolePermission::find()
            .filter(entity::role_permission::Column::RoleId.eq(role_id))
            .order_by_asc(entity::role_permission::Column::Permission)
            .all(self.db)
            .await?;

        Ok(grants.into_iter().map(|g| g.permission).collect())
    }

    /// Permissions for every role, keyed by role ID
    pub async fn all_permissions(&self) -> Result<HashMap<i32, Vec<String>>, DbErr> {
        let grants = entity::prelude::RolePermission::find()
            .order_by_asc(entity::role_permission::Column::Permission)
            .all(self.db)
            .await?;

        let mut by_role: HashMap<i32, Vec<String>> = HashMap::new();
        for grant in grants {
            by_role.entry(grant.role_id).or_default().push(grant.permission);
        }

        Ok(by_role)
    }

    /// Returns a map of role ID to name for the provided IDs
    pub async fn names_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let roles = entity::prelude::Role::find()
            .filter(entity::role::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(roles.into_iter().map(|r| (r.id, r.name)).collect())
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::role::RoleRepository;

        /// Expect the role to be created together with its permission grants
        #[tokio::test]
        async fn creates_role_with_permissions() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;

            let repo = RoleRepository::new(&test.db);
            let role = repo
                .create("Manager", None, &["manage_team", "approve_leave"])
                .await?;
            let permissions = repo.permissions(role.id).await?;

            assert_eq!(permissions, vec!["approve_leave", "manage_team"]);

            Ok(())
        }

        /// Expect an error when a role with the same name exists
        #[tokio::test]
        async fn fails_for_duplicate_name() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;

            let repo = RoleRepository::new(&test.db);
            repo.create("Manager", None, &[]).await?;
            let result = repo.create("Manager", None, &[]).await;

            assert!(result.is_err());

            Ok(())
        }
    }
}
