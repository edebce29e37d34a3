use std::str::FromStr;

use sqlx::query_as;
use uuid::Uuid;

use crate::{AmpaModelError, Client};

#[derive(sqlx::FromRow, Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: String,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProfileRole {
    Parent,
    Admin,
}

impl ToString for ProfileRole {
    fn to_string(&self) -> String {
        match self {
            ProfileRole::Parent => "parent",
            ProfileRole::Admin => "admin",
        }
        .to_string()
    }
}

impl FromStr for ProfileRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "parent" => Self::Parent,
            "admin" => Self::Admin,
            v => anyhow::bail!("Invalid profile role: {:?}", v),
        })
    }
}

impl Profile {
    pub async fn get_by_role(
        client: &Client,
        role: ProfileRole,
    ) -> Result<Vec<Profile>, AmpaModelError> {
        trace!("loading profiles with role {:?}", role);
        Ok(query_as::<_, Profile>(
            "SELECT id, email, full_name, role FROM profiles WHERE role = $1",
        )
        .bind(role.to_string())
        .fetch_all(client.pool())
        .await?)
    }

    pub fn is_parent(&self) -> bool {
        ProfileRole::from_str(&self.role)
            .map(|r| r == ProfileRole::Parent)
            .unwrap_or(false)
    }
}
