pub mod analyze_log_response;
pub mod analyze_log_route;
