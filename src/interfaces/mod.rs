pub mod http_agent;
pub mod joan;
pub mod slack;
