use chrono::{NaiveDate, NaiveDateTime};
use entity::{sea_orm_active_enums::EmployeeStatus, types::EmergencyContact};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::api::PaginationDto;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: i32,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: NaiveDate,
    pub department_id: i32,
    pub department_name: Option<String>,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub manager_id: Option<i32>,
    pub manager_name: Option<String>,
    pub salary: Option<f64>,
    pub address: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub emergency_contact: Option<EmergencyContact>,
    #[schema(value_type = String)]
    pub status: EmployeeStatus,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct EmployeeListDto {
    pub employees: Vec<EmployeeDto>,
    pub pagination: PaginationDto,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponseDto {
    pub message: String,
    pub employee: EmployeeDto,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeDto {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub employee_code: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub last_name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: NaiveDate,
    pub department_id: i32,
    pub role_id: i32,
    pub manager_id: Option<i32>,
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub salary: Option<f64>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub address: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub emergency_contact: Option<EmergencyContact>,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

/// Fields that may be changed on an existing employee. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeDto {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub department_id: Option<i32>,
    pub role_id: Option<i32>,
    pub manager_id: Option<i32>,
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub salary: Option<f64>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub address: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub emergency_contact: Option<EmergencyContact>,
    #[schema(value_type = Option<String>)]
    pub status: Option<EmployeeStatus>,
}

/// Columns the employee list may be ordered by
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeSortField {
    #[default]
    FirstName,
    LastName,
    Email,
    EmployeeCode,
    HireDate,
    CreatedAt,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Substring matched against name, email and employee code
    pub search: Option<String>,
    /// Department name
    pub department: Option<String>,
    #[param(value_type = Option<String>)]
    pub status: Option<EmployeeStatus>,
    #[param(value_type = Option<String>)]
    pub sort_by: Option<EmployeeSortField>,
    #[param(value_type = Option<String>)]
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
}
