use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn org(&self) -> OrgFixtures<'_> {
        OrgFixtures { setup: self }
    }
}

pub struct OrgFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> OrgFixtures<'a> {
    /// Insert a department, or return the existing one with the same name.
    pub async fn insert_department(
        &self,
        name: &str,
    ) -> Result<entity::department::Model, TestError> {
        if let Some(existing) = entity::prelude::Department::find()
            .filter(entity::department::Column::Name.eq(name))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        Ok(
            entity::prelude::Department::insert(entity::department::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                description: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a role granting `permissions`, or return the existing one with the same name.
    ///
    /// Permissions are only written when the role is created.
    pub async fn insert_role(
        &self,
        name: &str,
        permissions: &[&str],
    ) -> Result<entity::role::Model, TestError> {
        if let Some(existing) = entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let role = entity::prelude::Role::insert(entity::role::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        for permission in permissions {
            entity::prelude::RolePermission::insert(entity::role_permission::ActiveModel {
                role_id: ActiveValue::Set(role.id),
                permission: ActiveValue::Set(permission.to_string()),
                ..Default::default()
            })
            .exec(&self.setup.db)
            .await?;
        }

        Ok(role)
    }
}
