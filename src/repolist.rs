use serde::Deserialize;

/// One entry of the `/repositories` listing.
#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct RepoSummary {
    pub full_name: String,
    pub fork: bool,
    pub url: String,
    pub owner: Owner,
}
#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Owner {
    pub url: String,
}
#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct RepoDetail {
    #[serde(default)]
    pub language: Option<String>,
    pub created_at: String,
    pub has_wiki: bool,
    pub watchers_count: u64,
    pub forks_count: u64,
}
#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct UserProfile {
    pub following: u64,
    pub followers: u64,
}
#[derive(Deserialize, PartialEq, Eq, Debug)]
pub struct GitHubError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing() {
        let json = serde_json::from_str::<Vec<RepoSummary>>(
            r#"
[
  {
    "id": 1300192,
    "name": "hello-world",
    "full_name": "octocat/hello-world",
    "private": false,
    "owner": {
      "login": "octocat",
      "id": 583231,
      "url": "https://api.github.com/users/octocat"
    },
    "fork": false,
    "url": "https://api.github.com/repos/octocat/hello-world"
  },
  {
    "full_name": "someone/hello-world",
    "owner": { "url": "https://api.github.com/users/someone" },
    "fork": true,
    "url": "https://api.github.com/repos/someone/hello-world"
  }
]
"#,
        )
        .unwrap();
        assert_eq!(
            json,
            vec![
                RepoSummary {
                    full_name: "octocat/hello-world".to_string(),
                    fork: false,
                    url: "https://api.github.com/repos/octocat/hello-world".to_string(),
                    owner: Owner {
                        url: "https://api.github.com/users/octocat".to_string()
                    }
                },
                RepoSummary {
                    full_name: "someone/hello-world".to_string(),
                    fork: true,
                    url: "https://api.github.com/repos/someone/hello-world".to_string(),
                    owner: Owner {
                        url: "https://api.github.com/users/someone".to_string()
                    }
                }
            ]
        )
    }

    #[test]
    fn test_detail_with_null_language() {
        let detail = serde_json::from_str::<RepoDetail>(
            r#"{
  "full_name": "octocat/hello-world",
  "language": null,
  "created_at": "2011-01-26T19:01:12Z",
  "has_wiki": true,
  "watchers_count": 80,
  "forks_count": 9
}"#,
        )
        .unwrap();
        assert_eq!(detail.language, None);
        assert_eq!(detail.created_at, "2011-01-26T19:01:12Z");
        assert!(detail.has_wiki);
        assert_eq!(detail.watchers_count, 80);
        assert_eq!(detail.forks_count, 9);
    }

    #[test]
    fn test_detail_without_language_field() {
        let detail = serde_json::from_str::<RepoDetail>(
            r#"{"created_at": "2008-02-01T00:00:00Z", "has_wiki": false, "watchers_count": 0, "forks_count": 0}"#,
        )
        .unwrap();
        assert_eq!(detail.language, None);
    }

    #[test]
    fn test_user_profile() {
        let user = serde_json::from_str::<UserProfile>(
            r#"{"login": "octocat", "followers": 20, "following": 10, "public_repos": 2}"#,
        )
        .unwrap();
        assert_eq!(
            user,
            UserProfile {
                following: 10,
                followers: 20
            }
        );
    }

    #[test]
    fn test_error_body() {
        let err = serde_json::from_str::<GitHubError>(
            r#"{"message": "Not Found", "documentation_url": "https://docs.github.com/rest"}"#,
        )
        .unwrap();
        assert_eq!(err.message, "Not Found");
    }
}
