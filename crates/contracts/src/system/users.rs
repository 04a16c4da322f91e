use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl User {
    /// "First Middle Last", skipping missing parts.
    pub fn display_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub user_name: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_skips_missing_parts() {
        let user = User {
            id: "1".into(),
            user_name: "jdoe".into(),
            first_name: Some("John".into()),
            middle_name: None,
            last_name: Some("Doe".into()),
            email: None,
            job_title: None,
            is_active: true,
            created_at: "2024-03-15T14:02:26Z".into(),
        };
        assert_eq!(user.display_name(), "John Doe");
    }
}
