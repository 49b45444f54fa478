use serde::{Deserialize, Serialize};
use url::Url;

/// [`Collaborator`] is one element of the `/repos/{owner}/{repo}/collaborators`
/// response. Fields the API sends beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub login: String,
    pub id: u64,
    pub avatar_url: Url,
    /// API URL of the user
    pub url: Url,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub pull: bool,
    pub push: bool,
    pub admin: bool,
}
