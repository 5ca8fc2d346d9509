// AI Buddy - anonymous youth mental-wellness check-ins
// Library exports

pub mod cli;
pub mod config;
pub mod crisis;
pub mod errors;
pub mod helplines;
pub mod mood;
pub mod providers; // Chat-completion gateway
pub mod sentiment;
pub mod session; // Conversation state and per-turn flow
pub mod streak;
