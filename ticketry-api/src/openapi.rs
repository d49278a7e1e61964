//! OpenAPI Specification for the Ticketry API
//!
//! Built with utoipa from the entity schemas and the route annotations.
//! Every entity response is wrapped in the `{isSuccessful, result|error}`
//! envelope; the documented bodies are the `result` payloads.

use utoipa::OpenApi;

use crate::routes::{health, metric_options, metrics, projects, relations, tickets, users};
use ticketry_core::{
    Metric, MetricOption, NewMetric, NewMetricOption, NewProject, NewTicket, NewUserAccount,
    Project, ProjectWithMembership, Ticket, TicketAssignee, UserAccount, UserProject,
};

/// OpenAPI document for the Ticketry API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ticketry API",
        version = "0.1.0",
        description = "Ticket tracker: users, projects, ordered tickets, metrics and options",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Users", description = "User accounts"),
        (name = "Projects", description = "Projects and their owners"),
        (name = "Tickets", description = "Tickets with dense per-project indices"),
        (name = "Metrics", description = "Per-project metrics"),
        (name = "Metric Options", description = "Ordered options of a metric"),
        (name = "Relations", description = "Project membership and ticket assignment pairs"),
        (name = "Health", description = "Liveness and readiness checks")
    ),
    paths(
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        projects::create_project,
        projects::list_projects,
        projects::get_project,
        projects::update_project,
        projects::delete_project,
        tickets::create_ticket,
        tickets::list_tickets,
        tickets::get_ticket,
        tickets::update_ticket,
        tickets::delete_ticket,
        metrics::create_metric,
        metrics::list_metrics,
        metrics::get_metric,
        metrics::update_metric,
        metrics::delete_metric,
        metric_options::create_metric_option,
        metric_options::list_metric_options,
        metric_options::get_metric_option,
        metric_options::update_metric_option,
        metric_options::delete_metric_option,
        relations::create_user_project,
        relations::list_user_projects,
        relations::create_ticket_assignee,
        relations::list_ticket_assignees,
        health::ping,
        health::live,
        health::ready,
    ),
    components(schemas(
        UserAccount,
        NewUserAccount,
        Project,
        NewProject,
        ProjectWithMembership,
        Ticket,
        NewTicket,
        Metric,
        NewMetric,
        MetricOption,
        NewMetricOption,
        UserProject,
        TicketAssignee,
        health::CheckState,
        health::Liveness,
        health::Readiness,
    ))
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate OpenAPI spec as JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}
