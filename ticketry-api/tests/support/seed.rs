#![allow(dead_code)]

use ticketry_api::services::{metric_service, project_service, user_service};
use ticketry_api::{ApiResult, DbClient};
use ticketry_core::{Metric, ProjectWithMembership, UserAccount};
use ticketry_test_utils::fixtures;

pub async fn seed_user(db: &DbClient, tag: &str) -> ApiResult<UserAccount> {
    user_service::create_user(db, fixtures::new_user(tag)).await
}

pub async fn seed_project(db: &DbClient, owner: &UserAccount) -> ApiResult<ProjectWithMembership> {
    let name = fixtures::unique_name("project");
    project_service::create_project(db, fixtures::new_project(owner.id, name)).await
}

pub async fn seed_metric(db: &DbClient, project_id: i32) -> ApiResult<Metric> {
    let title = fixtures::unique_name("metric");
    metric_service::create_metric(db, fixtures::new_metric(project_id, title)).await
}
