//! Users collection records.
//!
//! Incomes, expenses and goals reference their owner by `User::name`.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{EngineError, ResultEngine, util};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    M,
    F,
    X,
}

impl Genre {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
            Self::X => "X",
        }
    }
}

impl TryFrom<&str> for Genre {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "M" => Ok(Self::M),
            "F" => Ok(Self::F),
            "X" => Ok(Self::X),
            _ => Err(EngineError::validation("El campo genero debe ser M, F o X")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(EngineError::validation("Rol inválido")),
        }
    }
}

/// A stored user. The password is kept in clear text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub password: String,
    pub age: u32,
    pub genre: Genre,
    pub role: Role,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({} años, {}, {})",
            self.id,
            self.name,
            self.age,
            self.genre.as_str(),
            self.role.as_str()
        )
    }
}

/// User payload before validation.
///
/// `age` is kept as entered; `validate_user` decides whether it is numeric.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub id: Option<String>,
    pub name: String,
    pub password: String,
    pub age: String,
    pub genre: String,
    pub role: String,
}

impl UserInput {
    pub fn from_value(value: &Value) -> ResultEngine<Self> {
        let map = util::object(value)?;
        Ok(Self {
            id: util::optional_id(map),
            name: util::text_field(map, "name"),
            password: util::text_field(map, "password"),
            age: util::text_field(map, "age"),
            genre: util::text_field(map, "genre"),
            role: util::text_field(map, "role"),
        })
    }

    /// Build the stored record. Call after `validate_user`.
    pub(crate) fn to_user(&self, id: String) -> ResultEngine<User> {
        let age = util::parse_int(&self.age)
            .and_then(|age| u32::try_from(age).ok())
            .filter(|age| *age > 0)
            .ok_or_else(|| EngineError::validation("Edad debe ser mayor a 0"))?;
        Ok(User {
            id,
            name: self.name.clone(),
            password: self.password.clone(),
            age,
            genre: Genre::try_from(self.genre.as_str())?,
            role: Role::try_from(self.role.as_str())?,
        })
    }
}

impl From<&User> for UserInput {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id.clone()),
            name: user.name.clone(),
            password: user.password.clone(),
            age: user.age.to_string(),
            genre: user.genre.as_str().to_string(),
            role: user.role.as_str().to_string(),
        }
    }
}
