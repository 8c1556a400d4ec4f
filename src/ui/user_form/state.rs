use crate::api::types::{NewPerson, PersonName, Role, UserDraft};
use crate::ui::mvi::UiState;

/// Checkbox columns per role row.
pub const ROLE_ROW_WIDTH: usize = 4;

/// The text fields of the dialog, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    FamilyName,
    Gender,
    Age,
    DateOfBirth,
    Password,
    ConfirmPassword,
    Username,
}

impl UserField {
    pub const ALL: [UserField; 8] = [
        UserField::FirstName,
        UserField::FamilyName,
        UserField::Gender,
        UserField::Age,
        UserField::DateOfBirth,
        UserField::Password,
        UserField::ConfirmPassword,
        UserField::Username,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UserField::FirstName => "First name",
            UserField::FamilyName => "Family name",
            UserField::Gender => "Gender",
            UserField::Age => "Age",
            UserField::DateOfBirth => "Date of birth",
            UserField::Password => "Password",
            UserField::ConfirmPassword => "Confirm password",
            UserField::Username => "Username",
        }
    }

    /// Masked when rendered.
    pub fn is_secret(self) -> bool {
        matches!(self, UserField::Password | UserField::ConfirmPassword)
    }
}

/// Where the dialog cursor sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(UserField),
    /// A checkbox inside the role grid.
    Role { row: usize, col: usize },
}

/// One selectable role checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleItem {
    pub uuid: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UserFormState {
    #[default]
    Hidden,
    Visible(UserFormData),
}

impl UiState for UserFormState {}

impl UserFormState {
    pub fn is_visible(&self) -> bool {
        matches!(self, UserFormState::Visible(_))
    }

    pub fn data(&self) -> Option<&UserFormData> {
        match self {
            UserFormState::Visible(data) => Some(data),
            UserFormState::Hidden => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserFormData {
    pub first_name: String,
    pub family_name: String,
    pub gender: String,
    pub age: String,
    pub date_of_birth: String,
    pub password: String,
    pub confirm_password: String,
    pub username: String,
    /// Role checkboxes, laid out in rows for rendering and navigation.
    pub role_rows: Vec<Vec<RoleItem>>,
    pub focus: FormFocus,
    pub dirty: bool,
    /// When true, the next Escape discards the draft. Set on the first
    /// Escape while dirty.
    pub confirm_discard: bool,
    /// Validation or create failure shown under the fields.
    pub error: Option<String>,
}

impl UserFormData {
    pub fn new(roles: &[Role]) -> Self {
        Self {
            first_name: String::new(),
            family_name: String::new(),
            gender: String::new(),
            age: String::new(),
            date_of_birth: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            username: String::new(),
            role_rows: group_role_rows(roles, ROLE_ROW_WIDTH),
            focus: FormFocus::Field(UserField::FirstName),
            dirty: false,
            confirm_discard: false,
            error: None,
        }
    }

    pub fn focus_on_roles(&self) -> bool {
        matches!(self.focus, FormFocus::Role { .. })
    }

    pub fn field(&self, field: UserField) -> &str {
        match field {
            UserField::FirstName => &self.first_name,
            UserField::FamilyName => &self.family_name,
            UserField::Gender => &self.gender,
            UserField::Age => &self.age,
            UserField::DateOfBirth => &self.date_of_birth,
            UserField::Password => &self.password,
            UserField::ConfirmPassword => &self.confirm_password,
            UserField::Username => &self.username,
        }
    }

    pub(super) fn field_mut(&mut self, field: UserField) -> &mut String {
        match field {
            UserField::FirstName => &mut self.first_name,
            UserField::FamilyName => &mut self.family_name,
            UserField::Gender => &mut self.gender,
            UserField::Age => &mut self.age,
            UserField::DateOfBirth => &mut self.date_of_birth,
            UserField::Password => &mut self.password,
            UserField::ConfirmPassword => &mut self.confirm_password,
            UserField::Username => &mut self.username,
        }
    }

    /// Full tab order: text fields first, then the role grid row-major.
    pub(super) fn focus_order(&self) -> Vec<FormFocus> {
        let mut order: Vec<FormFocus> = UserField::ALL.iter().copied().map(FormFocus::Field).collect();
        for (row, cells) in self.role_rows.iter().enumerate() {
            for col in 0..cells.len() {
                order.push(FormFocus::Role { row, col });
            }
        }
        order
    }

    /// Validate and map into the payloads the create effect needs.
    pub fn to_draft(&self) -> Result<UserDraft, String> {
        let first_name = self.first_name.trim();
        let family_name = self.family_name.trim();
        let gender = self.gender.trim();

        if first_name.is_empty() {
            return Err("first name is required".to_string());
        }
        if family_name.is_empty() {
            return Err("family name is required".to_string());
        }
        if gender.is_empty() {
            return Err("gender is required".to_string());
        }
        if self.password.is_empty() {
            return Err("password is required".to_string());
        }
        if self.password != self.confirm_password {
            return Err("passwords do not match".to_string());
        }

        let age = match self.age.trim() {
            "" => None,
            text => Some(
                text.parse::<u32>()
                    .map_err(|_| "age must be a whole number".to_string())?,
            ),
        };
        let birthdate = match self.date_of_birth.trim() {
            "" => None,
            text => Some(text.to_string()),
        };

        let roles = self
            .role_rows
            .iter()
            .flatten()
            .filter(|item| item.selected)
            .map(|item| item.uuid.clone())
            .collect();

        Ok(UserDraft {
            person: NewPerson {
                names: vec![PersonName {
                    given_name: first_name.to_string(),
                    family_name: family_name.to_string(),
                }],
                gender: gender.to_string(),
                age,
                birthdate,
            },
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            roles,
        })
    }
}

/// Arrange roles into checkbox rows.
///
/// The first two roles are pinned to a trailing row of their own; the rest
/// are chunked `width` per row, including a final partial row.
pub fn group_role_rows(roles: &[Role], width: usize) -> Vec<Vec<RoleItem>> {
    let width = width.max(1);
    let item = |role: &Role| RoleItem {
        uuid: role.uuid.clone(),
        name: role.name.clone(),
        selected: false,
    };

    let mut rows: Vec<Vec<RoleItem>> = Vec::new();
    let body: Vec<RoleItem> = roles.iter().skip(2).map(item).collect();
    for chunk in body.chunks(width) {
        rows.push(chunk.to_vec());
    }

    let trailing: Vec<RoleItem> = roles.iter().take(2).map(item).collect();
    if !trailing.is_empty() {
        rows.push(trailing);
    }
    rows
}
