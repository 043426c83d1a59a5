use crate::{
    EngineError, ResultEngine,
    store::{Collection, CollectionStore, ID_FIELD, id_string},
    users::{User, UserInput},
    validation::validate_user,
};

use super::{Engine, required_id};

impl<S: CollectionStore> Engine<S> {
    /// All decodable users, in storage order.
    pub fn users(&self) -> Vec<User> {
        self.load(Collection::Users)
    }

    /// Names of every stored user record, decodable or not.
    pub fn user_names(&self) -> Vec<String> {
        self.store
            .read_collection(Collection::Users)
            .iter()
            .filter_map(|raw| raw.get("name").and_then(|v| v.as_str()).map(str::to_string))
            .collect()
    }

    /// Whether a stored record other than `except_id` is called `name`.
    fn name_taken(&self, name: &str, except_id: Option<&str>) -> bool {
        self.store
            .read_collection(Collection::Users)
            .iter()
            .filter(|raw| raw.get("name").and_then(|v| v.as_str()) == Some(name))
            .any(|raw| {
                let id = raw.get(ID_FIELD).and_then(id_string);
                except_id.is_none_or(|except| id.as_deref().map(str::trim) != Some(except))
            })
    }

    /// Insert a new user. The name must not be taken; any caller id is ignored.
    pub fn insert_user(&self, input: &UserInput) -> ResultEngine<User> {
        if self.name_taken(&input.name, None) {
            return Err(EngineError::ExistingKey(format!(
                "El usuario '{}' ya existe",
                input.name
            )));
        }
        validate_user(input)?;

        let id = self.store.next_id(Collection::Users, ID_FIELD);
        let user = input.to_user(id)?;
        self.append(Collection::Users, &user)?;
        tracing::info!("registered user {}", user.name);
        Ok(user)
    }

    /// Register a regular user after checking the password confirmation.
    pub fn register_user(
        &self,
        name: &str,
        password: &str,
        password_confirmation: &str,
        age: i64,
        genre: &str,
    ) -> ResultEngine<User> {
        if password != password_confirmation {
            return Err(EngineError::validation("Las contraseñas no coinciden"));
        }
        self.insert_user(&UserInput {
            id: None,
            name: name.to_string(),
            password: password.to_string(),
            age: age.to_string(),
            genre: genre.to_string(),
            role: "user".to_string(),
        })
    }

    /// Replace the user with `input.id`. Renaming onto another user's name
    /// is rejected.
    pub fn update_user(&self, input: &UserInput) -> ResultEngine<()> {
        let id = required_id(input.id.as_deref())?;
        let not_found = || EngineError::NotFound(format!("No existe usuario con id {id}"));
        let index = self.locate(Collection::Users, id).ok_or_else(not_found)?;
        validate_user(input)?;

        if self.name_taken(&input.name, Some(id)) {
            return Err(EngineError::ExistingKey(format!(
                "El usuario '{}' ya existe",
                input.name
            )));
        }

        let user = input.to_user(id.to_string())?;
        self.replace_at(Collection::Users, index, &user, not_found)
    }

    /// Delete the user with `id`. Records referencing it are left in place.
    pub fn delete_user(&self, id: &str) -> ResultEngine<String> {
        if self.remove_by_id(Collection::Users, id)? == 0 {
            return Err(EngineError::NotFound(
                "El usuario que intenta borrar no existe".to_string(),
            ));
        }
        Ok("El usuario fue borrado satisfactoriamente".to_string())
    }

    /// Position and record of the user called `name`.
    ///
    /// When several records share the name the last decodable one wins,
    /// unlike `find_index` which returns the first id match. Records that
    /// match but do not decode are reported to the store observer and
    /// skipped.
    pub fn find_user_by_name(&self, name: &str) -> Option<(usize, User)> {
        self.store
            .read_collection(Collection::Users)
            .into_iter()
            .enumerate()
            .filter(|(_, raw)| raw.get("name").and_then(|v| v.as_str()) == Some(name))
            .filter_map(|(index, raw)| {
                self.decode::<User>(Collection::Users, index, raw)
                    .map(|user| (index, user))
            })
            .last()
    }

    /// Clear text password comparison.
    pub fn login_check(&self, name: &str, password: &str) -> bool {
        self.find_user_by_name(name)
            .is_some_and(|(_, user)| user.password == password)
    }
}
