//! Users repository

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::User,
};

/// Registered readers keyed by student id, iterated in registration order
#[derive(Debug, Default, Clone)]
pub struct UsersRepository {
    users: IndexMap<String, User>,
}

impl UsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, student_id: &str) -> Option<&User> {
        self.users.get(student_id)
    }

    /// Get user by student id
    pub fn get_by_student_id(&self, student_id: &str) -> AppResult<&User> {
        self.users.get(student_id).ok_or_else(|| {
            AppError::NotFound(format!("User with student id {} not found", student_id))
        })
    }

    /// Register a new user; the student id must be unused
    pub fn create(&mut self, user: User) -> AppResult<&User> {
        if self.users.contains_key(&user.student_id) {
            return Err(AppError::DuplicateKey(format!(
                "Student id {} is already registered",
                user.student_id
            )));
        }
        let (index, _) = self.users.insert_full(user.student_id.clone(), user);
        Ok(&self.users[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> + Clone {
        self.users.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup() {
        let mut repo = UsersRepository::new();
        repo.create(User::new("Ada", "S1")).unwrap();
        repo.create(User::new("Brian", "S2")).unwrap();

        assert_eq!(repo.get_by_student_id("S2").unwrap().name, "Brian");
        assert!(matches!(repo.get_by_student_id("S3"), Err(AppError::NotFound(_))));
        let names: Vec<_> = repo.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Brian"]);
    }

    #[test]
    fn test_duplicate_student_id() {
        let mut repo = UsersRepository::new();
        repo.create(User::new("Ada", "S1")).unwrap();
        let err = repo.create(User::new("Impostor", "S1")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        assert_eq!(repo.get("S1").unwrap().name, "Ada");
        assert_eq!(repo.len(), 1);
    }
}
