// Issue providers backed by real services
pub mod github;

pub use github::GitHubProvider;
