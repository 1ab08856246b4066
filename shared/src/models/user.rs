//! User Model

use serde::{Deserialize, Serialize};

/// Marketplace role, fixed at signup
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum UserRole {
    /// Buys fuel
    #[default]
    Customer,
    /// Operates stations
    Seller,
}

impl UserRole {
    /// Parse from wire/database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "seller" => Some(Self::Seller),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Seller => "seller",
        }
    }

    pub fn is_seller(&self) -> bool {
        matches!(self, Self::Seller)
    }
}

/// User row, including the password hash. Never serialized to clients.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub role: UserRole,
    pub phone: String,
    pub profile_picture: String,
    pub created_at: i64,
}

/// Public projection of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub phone: String,
    pub profile_picture: String,
    pub created_at: i64,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
        }
    }
}

/// Profile update payload; omitted fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
}

/// Signup payload. Fields are optional so a missing one reports which field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdate {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_db_roundtrip() {
        for role in [UserRole::Customer, UserRole::Seller] {
            assert_eq!(UserRole::from_db(role.as_db()), Some(role));
        }
        assert_eq!(UserRole::from_db("admin"), None);
        assert_eq!(UserRole::default(), UserRole::Customer);
    }

    #[test]
    fn test_profile_hides_password_hash() {
        let user = User {
            id: 1,
            name: "Asha".into(),
            email: "asha@example.com".into(),
            hashed_password: "$argon2id$secret".into(),
            role: UserRole::Seller,
            phone: String::new(),
            profile_picture: String::new(),
            created_at: 0,
        };
        let json = serde_json::to_value(UserProfile::from(user)).unwrap();
        assert_eq!(json["role"], "seller");
        assert_eq!(json["profilePicture"], "");
        assert!(json.get("hashedPassword").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
