use tracing::{info, instrument};
use validator::Validate;

use crate::client::UsersApi;
use crate::error::{UserError, UserResult};
use crate::models::{User, UserId};
use crate::store::UserStore;
use crate::view::{AddButtonLabel, UsersView};

/// Wires view events to the users API and mirrors every successful
/// response into the store.
///
/// The editing cursor decides what a submit does: with no cursor it
/// creates a record, with a cursor it updates that record. Failed
/// requests leave the list, the form and the cursor untouched.
pub struct UsersController<A: UsersApi> {
    api: A,
    store: UserStore,
    view: UsersView,
    current_user_id: Option<UserId>,
}

impl<A: UsersApi> UsersController<A> {
    pub fn new(api: A, view: UsersView) -> Self {
        Self {
            api,
            store: UserStore::default(),
            view,
            current_user_id: None,
        }
    }

    pub fn users(&self) -> &[User] {
        self.store.get()
    }

    /// Id of the record loaded for editing, if any
    pub fn cursor(&self) -> Option<&UserId> {
        self.current_user_id.as_ref()
    }

    pub fn view(&self) -> &UsersView {
        &self.view
    }

    /// Subscribe the table render to the store and load the initial list.
    #[instrument(skip(self))]
    pub async fn init(&mut self) -> UserResult<()> {
        let view = self.view.clone();
        self.store.subscribe(move |users: &Vec<User>| view.render_table(users));

        let users = self.api.list_users().await?;
        info!(count = users.len(), "Loaded users");
        self.store.replace(users)?;
        Ok(())
    }

    /// Create or update from the current form values, depending on the cursor.
    #[instrument(skip(self), fields(cursor = ?self.current_user_id))]
    pub async fn submit(&mut self) -> UserResult<User> {
        let fields = self.view.read_form();
        fields.validate()?;

        match self.current_user_id.clone() {
            Some(id) => {
                let updated = self.api.update_user(id.clone(), fields).await?;
                let users = self
                    .users()
                    .iter()
                    .map(|u| if u.id == id { updated.clone() } else { u.clone() })
                    .collect();
                self.store.replace(users)?;

                self.view.clear_form();
                self.view.set_add_button_label(AddButtonLabel::Add);
                self.current_user_id = None;

                info!(user_id = %id, "User updated");
                Ok(updated)
            }
            None => {
                let created = self.api.create_user(fields).await?;
                let mut users = self.users().to_vec();
                users.push(created.clone());
                self.store.replace(users)?;

                self.view.clear_form();

                info!(user_id = %created.id, "User created");
                Ok(created)
            }
        }
    }

    /// Load the record `id` into the form and switch to edit mode.
    #[instrument(skip(self))]
    pub fn edit(&mut self, id: &UserId) -> UserResult<()> {
        let user = self
            .users()
            .iter()
            .find(|u| &u.id == id)
            .ok_or_else(|| UserError::NotFound(id.clone()))?;

        self.view.write_form(user);
        self.view.set_add_button_label(AddButtonLabel::Edit);
        self.current_user_id = Some(id.clone());

        info!(user_id = %id, "Editing user");
        Ok(())
    }

    /// Delete `id` on the server, then drop it from the list.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &UserId) -> UserResult<()> {
        self.api.delete_user(id.clone()).await?;

        let users = self
            .users()
            .iter()
            .filter(|u| &u.id != id)
            .cloned()
            .collect();
        self.store.replace(users)?;

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
