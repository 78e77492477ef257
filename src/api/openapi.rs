//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::{
    auth_handler, chatbot_handler, complaint_handler, eda_handler, health_handler,
    revalidate_handler, user_handler,
};

/// OpenAPI specification for the gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SCOPE Dashboard Gateway",
        description = "Proxy and cache layer between the SCOPE dashboard and its backend service",
        version = "0.1.0"
    ),
    paths(
        auth_handler::login,
        auth_handler::logout,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        complaint_handler::list_complaints,
        complaint_handler::create_complaint,
        complaint_handler::get_complaint,
        complaint_handler::update_complaint,
        complaint_handler::delete_complaint,
        complaint_handler::classify_complaint,
        complaint_handler::classify_complaint_with_files,
        complaint_handler::predict_complaint,
        eda_handler::basic_stats,
        eda_handler::time_trends,
        eda_handler::category_relationships,
        eda_handler::word_frequency,
        eda_handler::cluster,
        eda_handler::topics,
        chatbot_handler::chat,
        revalidate_handler::revalidate,
        health_handler::health,
    ),
    components(schemas(
        auth_handler::LoginForm,
        revalidate_handler::RevalidateRequest,
    )),
    tags(
        (name = "Authentication", description = "Session login and logout"),
        (name = "Users", description = "User management proxy"),
        (name = "Complaints", description = "Complaint management proxy"),
        (name = "Analytics", description = "Precomputed analytics proxy"),
        (name = "Chatbot", description = "AI assistant proxy"),
        (name = "Cache", description = "Cache administration"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
