//! Wire types for the snippet API. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Response from `GET /editor/snippets`: the personal library plus every
/// team the user belongs to, each with its own library.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryResponse {
    pub personal_library: Library,
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// A collection of snippets owned by a person or a team.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub guid: String,
    #[serde(default)]
    pub snippets: Vec<Snippet>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub guid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub files: Vec<SnippetFile>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetFile {
    pub guid: String,
    pub filename: String,
    pub content: String,
    #[serde(default)]
    pub filetype: String,
    #[serde(default)]
    pub is_shared: bool,
}

/// A label groups snippets within one library. The API returns the snippet
/// membership as a list of guid references.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub guid: String,
    pub title: String,
    #[serde(default)]
    pub snippets: Vec<LabelRef>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRef {
    pub guid: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub guid: String,
    pub name: String,
    pub user_role: TeamRole,
    pub library: Library,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Owner,
    Manager,
    Member,
    Viewer,
    #[serde(other)]
    Unknown,
}

impl TeamRole {
    /// Roles allowed to create snippets in the team's library.
    pub fn can_edit(self) -> bool {
        matches!(self, TeamRole::Owner | TeamRole::Manager | TeamRole::Member)
    }
}

/// Attributes for creating a snippet, gathered from the create window.
#[derive(Clone, Debug, PartialEq)]
pub struct NewSnippet {
    pub title: String,
    pub description: String,
    pub is_private: bool,
    pub filename: String,
    pub content: String,
    pub filetype: String,
    pub library_guid: String,
    pub label_guids: Vec<String>,
}

/// Body of `POST /editor/snippets`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnippetRequest {
    pub snippet: CreateSnippetPayload,
    pub labels: Vec<String>,
    pub library_guid: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnippetPayload {
    pub title: String,
    pub description: String,
    pub is_private: bool,
    pub files: Vec<CreateSnippetFile>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnippetFile {
    pub filename: String,
    pub content: String,
    pub filetype: String,
    pub is_shared: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnippetResponse {
    pub snippet: Snippet,
}

impl From<NewSnippet> for CreateSnippetRequest {
    fn from(attrs: NewSnippet) -> Self {
        Self {
            snippet: CreateSnippetPayload {
                title: attrs.title,
                description: attrs.description,
                is_private: attrs.is_private,
                files: vec![CreateSnippetFile {
                    filename: attrs.filename,
                    content: attrs.content,
                    filetype: attrs.filetype,
                    is_shared: false,
                }],
            },
            labels: attrs.label_guids,
            library_guid: attrs.library_guid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_library_response() {
        let body = json!({
            "personalLibrary": {
                "guid": "lib-1",
                "snippets": [{
                    "guid": "s-1",
                    "title": "Rebase onto main",
                    "description": "",
                    "isPrivate": true,
                    "createdAt": "2026-05-02T10:00:00Z",
                    "files": [{
                        "guid": "f-1",
                        "filename": "rebase.sh",
                        "content": "git rebase main",
                        "filetype": "shell",
                        "isShared": false
                    }]
                }],
                "labels": [{
                    "guid": "l-1",
                    "title": "git",
                    "snippets": [{"guid": "s-1"}]
                }]
            },
            "teams": [{
                "guid": "t-1",
                "name": "Backend",
                "userRole": "member",
                "library": {"guid": "lib-2", "snippets": [], "labels": []}
            }]
        });

        let response: LibraryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.personal_library.guid, "lib-1");
        assert_eq!(response.personal_library.snippets[0].files[0].filename, "rebase.sh");
        assert_eq!(response.personal_library.labels[0].snippets[0].guid, "s-1");
        assert_eq!(response.teams[0].user_role, TeamRole::Member);
    }

    #[test]
    fn unknown_role_does_not_fail_deserialization() {
        let team: Team = serde_json::from_value(json!({
            "guid": "t-1",
            "name": "Docs",
            "userRole": "auditor",
            "library": {"guid": "lib-3"}
        }))
        .unwrap();
        assert_eq!(team.user_role, TeamRole::Unknown);
        assert!(!team.user_role.can_edit());
    }

    #[test]
    fn create_request_wraps_single_file() {
        let attrs = NewSnippet {
            title: "Ping".into(),
            description: "health check".into(),
            is_private: true,
            filename: "ping.rs".into(),
            content: "fn main() {}".into(),
            filetype: "rust".into(),
            library_guid: "lib-1".into(),
            label_guids: vec!["l-1".into()],
        };

        let body = serde_json::to_value(CreateSnippetRequest::from(attrs)).unwrap();
        assert_eq!(
            body,
            json!({
                "snippet": {
                    "title": "Ping",
                    "description": "health check",
                    "isPrivate": true,
                    "files": [{
                        "filename": "ping.rs",
                        "content": "fn main() {}",
                        "filetype": "rust",
                        "isShared": false
                    }]
                },
                "labels": ["l-1"],
                "libraryGuid": "lib-1"
            })
        );
    }
}
