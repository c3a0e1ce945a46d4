pub mod analyze_log;
pub mod health_route;
