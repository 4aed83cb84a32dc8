//! Page state and markup for the users table.
//!
//! [`UsersView`] is a cheap, cloneable handle: the controller keeps one and
//! hands a clone to the store listener, and both see the same inputs,
//! button label and table body.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::{User, UserFields, UserId};

/// Form target of the add/edit button
pub const SUBMIT_PATH: &str = "/users/submit";

/// Label of the add button, which doubles as the mode indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddButtonLabel {
    #[default]
    Add,
    Edit,
}

impl fmt::Display for AddButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddButtonLabel::Add => write!(f, "Add"),
            AddButtonLabel::Edit => write!(f, "Edit"),
        }
    }
}

#[derive(Debug, Default)]
struct ViewState {
    form: UserFields,
    add_label: AddButtonLabel,
    table_body: String,
}

#[derive(Debug, Clone, Default)]
pub struct UsersView {
    state: Arc<Mutex<ViewState>>,
}

impl UsersView {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebuild the table body from `users`, replacing it wholesale.
    pub fn render_table(&self, users: &[User]) {
        let body: String = users.iter().map(render_row).collect();
        tracing::debug!(rows = users.len(), "Rendered users table");
        self.state().table_body = body;
    }

    pub fn table_body(&self) -> String {
        self.state().table_body.clone()
    }

    pub fn read_form(&self) -> UserFields {
        self.state().form.clone()
    }

    /// Store the values typed into the inputs
    pub fn fill_form(&self, fields: UserFields) {
        self.state().form = fields;
    }

    /// Load `user` into the inputs for editing
    pub fn write_form(&self, user: &User) {
        self.fill_form(user.fields());
    }

    pub fn clear_form(&self) {
        self.state().form = UserFields::default();
    }

    pub fn add_button_label(&self) -> AddButtonLabel {
        self.state().add_label
    }

    pub fn set_add_button_label(&self, label: AddButtonLabel) {
        self.state().add_label = label;
    }

    /// Full HTML document: form, add button, table and an optional notice.
    pub fn render_page(&self, notice: Option<&str>) -> String {
        let state = self.state();
        let form = &state.form;

        let notice_html = notice
            .map(|n| format!(r#"<p class="user__notice" role="alert">{}</p>"#, escape_html(n)))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Users</title>
</head>
<body>
    <form class="user__form" method="post" action="{submit}">
        <input class="input-fName" name="firstName" placeholder="First name" value="{first}">
        <input class="input-lName" name="lastName" placeholder="Last name" value="{last}">
        <input class="input-email" name="email" placeholder="Email" value="{email}">
        <input class="input-phone" name="phone" placeholder="Phone" value="{phone}">
        <button type="submit" class="user__add-btn">{label}</button>
    </form>
    {notice}
    <table>
        <thead>
            <tr><th>First Name</th><th>Last Name</th><th>Email</th><th>Phone</th><th>Actions</th></tr>
        </thead>
        <tbody class="user__table">{rows}</tbody>
    </table>
</body>
</html>"#,
            submit = SUBMIT_PATH,
            first = escape_html(&form.first_name),
            last = escape_html(&form.last_name),
            email = escape_html(&form.email),
            phone = escape_html(&form.phone),
            label = state.add_label,
            notice = notice_html,
            rows = state.table_body,
        )
    }
}

/// Path of a row action (`edit` or `delete`) for `id`
pub fn row_action_path(id: &UserId, action: &str) -> String {
    format!("/users/{}/{}", urlencoding::encode(id.as_str()), action)
}

fn render_row(user: &User) -> String {
    format!(
        r#"<tr id="{id}">
    <td>{first}</td>
    <td>{last}</td>
    <td>{email}</td>
    <td>{phone}</td>
    <td>
        <form method="post" action="{edit}"><button class="user__edit-btn">Edit</button></form>
        <form method="post" action="{delete}"><button class="user__delete-btn">Delete</button></form>
    </td>
</tr>"#,
        id = escape_html(user.id.as_str()),
        first = escape_html(&user.first_name),
        last = escape_html(&user.last_name),
        email = escape_html(&user.email),
        phone = escape_html(&user.phone),
        edit = escape_html(&row_action_path(&user.id, "edit")),
        delete = escape_html(&row_action_path(&user.id, "delete")),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
