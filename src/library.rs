//! Flattening of the nested API response into the snapshot the finder
//! reads: one list of snippets across the personal library and every team
//! library, each entry tagged with its owner and resolved label titles.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::api::types::{Label, LibraryResponse, Snippet};

/// Owning team of a flattened entry. Personal snippets carry no team.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TeamRef {
    pub guid: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub snippet: Snippet,
    pub team: Option<TeamRef>,
    /// Titles of the labels referencing this snippet, drawn only from the
    /// entry's own library.
    pub labels: Vec<String>,
}

/// A library the user may create snippets in: their own, or a team library
/// where their role allows editing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LibraryTarget {
    pub name: String,
    pub library_guid: String,
    pub team_guid: Option<String>,
}

/// Flattened, in-memory view of the user's whole snippet collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    pub entries: Vec<LibraryEntry>,
    pub personal_library_guid: String,
    pub teams: Vec<TeamRef>,
    pub editable_libraries: Vec<LibraryTarget>,
    pub fetched_at: SystemTime,
}

impl LibrarySnapshot {
    pub fn from_response(response: LibraryResponse) -> Self {
        let personal_library_guid = response.personal_library.guid.clone();
        let mut entries = Vec::new();

        let personal_labels = response.personal_library.labels;
        for snippet in response.personal_library.snippets {
            let labels = snippet_labels(&personal_labels, &snippet);
            entries.push(LibraryEntry {
                snippet,
                team: None,
                labels,
            });
        }

        let mut teams = Vec::new();
        let mut editable_libraries = vec![LibraryTarget {
            name: "Personal".to_string(),
            library_guid: personal_library_guid.clone(),
            team_guid: None,
        }];

        for team in response.teams {
            let team_ref = TeamRef {
                guid: team.guid.clone(),
                name: team.name.clone(),
            };
            if team.user_role.can_edit() {
                editable_libraries.push(LibraryTarget {
                    name: team.name.clone(),
                    library_guid: team.library.guid.clone(),
                    team_guid: Some(team.guid.clone()),
                });
            }
            teams.push(team_ref.clone());

            let team_labels = team.library.labels;
            for snippet in team.library.snippets {
                let labels = snippet_labels(&team_labels, &snippet);
                entries.push(LibraryEntry {
                    snippet,
                    team: Some(team_ref.clone()),
                    labels,
                });
            }
        }

        Self {
            entries,
            personal_library_guid,
            teams,
            editable_libraries,
            fetched_at: SystemTime::now(),
        }
    }
}

/// Titles of the labels whose membership lists reference `snippet`.
fn snippet_labels(labels: &[Label], snippet: &Snippet) -> Vec<String> {
    labels
        .iter()
        .filter(|label| label.snippets.iter().any(|r| r.guid == snippet.guid))
        .map(|label| label.title.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Label, LabelRef, Library, SnippetFile, Team, TeamRole};

    fn snippet(guid: &str, title: &str) -> Snippet {
        Snippet {
            guid: guid.to_string(),
            title: title.to_string(),
            description: String::new(),
            is_private: false,
            created_at: None,
            files: vec![SnippetFile {
                guid: format!("{guid}-f"),
                filename: format!("{title}.txt"),
                content: String::new(),
                filetype: "text".to_string(),
                is_shared: false,
            }],
        }
    }

    fn label(title: &str, member_guids: &[&str]) -> Label {
        Label {
            guid: format!("label-{title}"),
            title: title.to_string(),
            snippets: member_guids
                .iter()
                .map(|guid| LabelRef {
                    guid: guid.to_string(),
                })
                .collect(),
        }
    }

    fn team(guid: &str, name: &str, role: TeamRole, library: Library) -> Team {
        Team {
            guid: guid.to_string(),
            name: name.to_string(),
            user_role: role,
            library,
        }
    }

    fn response() -> LibraryResponse {
        LibraryResponse {
            personal_library: Library {
                guid: "lib-personal".to_string(),
                snippets: vec![snippet("s-1", "alpha"), snippet("s-2", "beta")],
                labels: vec![label("git", &["s-1"]), label("sql", &["s-9"])],
            },
            teams: vec![
                team(
                    "t-1",
                    "Backend",
                    TeamRole::Member,
                    Library {
                        guid: "lib-backend".to_string(),
                        snippets: vec![snippet("s-3", "gamma")],
                        labels: vec![label("deploy", &["s-3"])],
                    },
                ),
                team(
                    "t-2",
                    "Audit",
                    TeamRole::Viewer,
                    Library {
                        guid: "lib-audit".to_string(),
                        snippets: vec![snippet("s-4", "delta")],
                        labels: vec![],
                    },
                ),
            ],
        }
    }

    #[test]
    fn flattens_personal_then_team_snippets() {
        let snapshot = LibrarySnapshot::from_response(response());

        assert_eq!(snapshot.entries.len(), 4);
        assert_eq!(snapshot.entries[0].snippet.guid, "s-1");
        assert!(snapshot.entries[0].team.is_none());
        assert!(snapshot.entries[1].team.is_none());
        assert_eq!(
            snapshot.entries[2].team.as_ref().map(|t| t.name.as_str()),
            Some("Backend")
        );
        assert_eq!(
            snapshot.entries[3].team.as_ref().map(|t| t.guid.as_str()),
            Some("t-2")
        );
    }

    #[test]
    fn labels_attach_only_to_referenced_snippets() {
        let snapshot = LibrarySnapshot::from_response(response());

        assert_eq!(snapshot.entries[0].labels, vec!["git".to_string()]);
        // "sql" references a guid not present in the library; "s-2" gets nothing.
        assert!(snapshot.entries[1].labels.is_empty());
        // Team snippets resolve against their own team's labels.
        assert_eq!(snapshot.entries[2].labels, vec!["deploy".to_string()]);
    }

    #[test]
    fn editable_libraries_include_personal_and_editing_roles_only() {
        let snapshot = LibrarySnapshot::from_response(response());

        let names: Vec<&str> = snapshot
            .editable_libraries
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        // Viewer role on "Audit" is excluded.
        assert_eq!(names, vec!["Personal", "Backend"]);
        assert_eq!(snapshot.editable_libraries[0].library_guid, "lib-personal");
        assert_eq!(
            snapshot.editable_libraries[1].team_guid.as_deref(),
            Some("t-1")
        );
    }

    #[test]
    fn all_teams_are_listed_regardless_of_role() {
        let snapshot = LibrarySnapshot::from_response(response());
        let guids: Vec<&str> = snapshot.teams.iter().map(|t| t.guid.as_str()).collect();
        assert_eq!(guids, vec!["t-1", "t-2"]);
    }

    #[test]
    fn empty_response_yields_empty_snapshot() {
        let snapshot = LibrarySnapshot::from_response(LibraryResponse {
            personal_library: Library {
                guid: "lib-personal".to_string(),
                snippets: vec![],
                labels: vec![],
            },
            teams: vec![],
        });
        assert!(snapshot.entries.is_empty());
        assert_eq!(snapshot.editable_libraries.len(), 1);
    }
}
