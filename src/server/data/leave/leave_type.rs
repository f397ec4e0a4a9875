use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// A leave type as seeded into an empty database
pub struct NewLeaveType<'s> {
    pub name: &'s str,
    pub description: &'s str,
    pub max_days_per_year: i32,
    pub carry_forward: bool,
    pub requires_approval: bool,
}

pub struct LeaveTypeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LeaveTypeRepository<'a, C> {
    /// Creates a new instance of [`LeaveTypeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, leave_type: &NewLeaveType<'_>) -> Result<entity::leave_type::Model, DbErr> {
        entity::prelude::LeaveType::insert(entity::leave_type::ActiveModel {
            name: ActiveValue::Set(leave_type.name.to_string()),
            description: ActiveValue::Set(Some(leave_type.description.to_string())),
            max_days_per_year: ActiveValue::Set(leave_type.max_days_per_year),
            carry_forward: ActiveValue::Set(leave_type.carry_forward),
            requires_approval: ActiveValue::Set(leave_type.requires_approval),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::leave_type::Model>, DbErr> {
        entity::prelude::LeaveType::find_by_id(id).one(self.db).await
    }

    /// Lists the leave type catalog ordered by name
    pub async fn list(&self) -> Result<Vec<entity::leave_type::Model>, DbErr> {
        entity::prelude::LeaveType::find()
            .order_by_asc(entity::leave_type::Column::Name)
            .all(self.db)
            .await
    }

    /// Leave types that grant a yearly allowance
    pub async fn list_with_allowance(&self) -> Result<Vec<entity::leave_type::Model>, DbErr> {
        entity::prelude::LeaveType::find()
            .filter(entity::leave_type::Column::MaxDaysPerYear.gt(0))
            .order_by_asc(entity::leave_type::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::LeaveType::find().count(self.db).await
    }
}
