// Domain-driven module structure for the access-log extractor.

// Core parsing
pub mod parser;

// Collaborators
pub mod sink;
pub mod source;

// Orchestration
pub mod boot;
pub mod conf;
pub mod pipeline;
