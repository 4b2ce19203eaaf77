//! Provenance resolvers
//!
//! One resolver per source family. The package-registry and search resolvers
//! delegate to [`GitHubResolver`] whenever they can point at a repository.

pub mod github;
pub mod npm;
pub mod search;

pub use github::GitHubResolver;
pub use npm::RegistryResolver;
pub use search::SearchResolver;

const VCS_MARKER: &str = "github.com/";

/// Extract `owner/repo` from anything containing `github.com/owner/repo`.
///
/// Returns `None` unless both segments are present and non-empty.
pub fn vcs_repo_path(url: &str) -> Option<String> {
    let (_, tail) = url.split_once(VCS_MARKER)?;
    let mut segments = tail.split(['/', '?', '#']);
    let owner = segments.next().filter(|s| !s.is_empty())?;
    let repo = segments.next().filter(|s| !s.is_empty())?;
    Some(format!("{}/{}", owner, repo))
}
