use crate::model::{UserProfile, UserRole, UserStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub query: String,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.role.is_none() && self.status.is_none()
    }

    pub fn matches(&self, user: &UserProfile) -> bool {
        if self.role.is_some_and(|role| role != user.role) {
            return false;
        }
        if self.status.is_some_and(|status| status != user.status) {
            return false;
        }
        matches_query(user, &self.query)
    }
}

/// Case-insensitive substring match over the searchable columns.
pub fn matches_query(user: &UserProfile, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [&user.id, &user.full_name, &user.email]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTableState {
    records: Vec<UserProfile>,
    filter: UserFilter,
    selected_id: Option<String>,
}

impl UserTableState {
    pub fn new(records: Vec<UserProfile>) -> Self {
        Self {
            records,
            filter: UserFilter::default(),
            selected_id: None,
        }
    }

    pub fn records(&self) -> &[UserProfile] {
        &self.records
    }

    pub fn filter(&self) -> &UserFilter {
        &self.filter
    }

    pub fn query(&self) -> &str {
        &self.filter.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.query.clear();
        self.filter.query.push_str(query);
    }

    pub fn set_role_filter(&mut self, role: Option<UserRole>) {
        self.filter.role = role;
    }

    pub fn set_status_filter(&mut self, status: Option<UserStatus>) {
        self.filter.status = status;
    }

    pub fn clear_filters(&mut self) {
        self.filter = UserFilter::default();
    }

    /// Replaces the fetched list wholesale. The selection survives only if
    /// the selected user is still present.
    pub fn set_records(&mut self, records: Vec<UserProfile>) {
        self.records = records;
        if let Some(selected) = self.selected_id.as_deref() {
            if !self.records.iter().any(|user| user.id == selected) {
                self.selected_id = None;
            }
        }
    }

    pub fn filtered_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, user)| self.filter.matches(user))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn filtered(&self) -> Vec<UserProfile> {
        if self.filter.is_empty() {
            return self.records.clone();
        }
        self.records
            .iter()
            .filter(|user| self.filter.matches(user))
            .cloned()
            .collect()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn select(&mut self, id: &str) -> bool {
        if self.records.iter().any(|user| user.id == id) {
            self.selected_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&UserProfile> {
        let id = self.selected_id.as_deref()?;
        self.records.iter().find(|user| user.id == id)
    }
}
