//! Identity store: signup, login, profile and password changes

use shared::error::{AppError, ErrorCode};
use shared::models::{
    LoginRequest, LoginResponse, PasswordUpdate, ProfileUpdate, SignupRequest, User, UserProfile,
    UserRole,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use crate::auth::{CurrentUser, create_token};
use crate::db::users;
use crate::error::ServiceResult;
use crate::util::{hash_password, non_blank, verify_password};

pub const MIN_PASSWORD_LEN: usize = 6;

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(AppError::validation("Invalid email address").with_detail("field", "email"));
    }
    Ok(email)
}

fn check_password(password: &str, field: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Register a new user. Role defaults to customer.
pub async fn signup(pool: &SqlitePool, req: SignupRequest) -> ServiceResult<UserProfile> {
    let name = non_blank(req.name.as_deref()).ok_or_else(|| AppError::required("name"))?;
    let email = non_blank(req.email.as_deref()).ok_or_else(|| AppError::required("email"))?;
    let password = req
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::required("password"))?;

    let email = normalize_email(email)?;
    check_password(password, "password")?;

    let role = match non_blank(req.role.as_deref()) {
        None => UserRole::default(),
        Some(r) => UserRole::from_db(&r.to_lowercase()).ok_or_else(|| {
            AppError::validation("Role must be customer or seller")
                .with_detail("field", "role")
                .with_detail("allowed", serde_json::json!(["customer", "seller"]))
        })?,
    };

    if users::find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
    }

    let user = User {
        id: snowflake_id(),
        name: name.to_string(),
        email,
        hashed_password: hash(password)?,
        role,
        phone: req.phone.map(|p| p.trim().to_string()).unwrap_or_default(),
        profile_picture: String::new(),
        created_at: now_millis(),
    };

    if let Err(e) = users::insert(pool, &user).await {
        if is_unique_violation(&e) {
            return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
        }
        return Err(e.into());
    }

    tracing::info!(user_id = user.id, role = user.role.as_db(), "User registered");
    Ok(user.into())
}

/// Check credentials and issue a token
pub async fn login(
    pool: &SqlitePool,
    req: LoginRequest,
    jwt_secret: &str,
    expiry_hours: i64,
) -> ServiceResult<LoginResponse> {
    let email = non_blank(req.email.as_deref()).ok_or_else(|| AppError::required("email"))?;
    let password = req
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::required("password"))?;

    let user = users::find_by_email(pool, &email.to_lowercase())
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(password, &user.hashed_password) {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::invalid_credentials().into());
    }

    let token = create_token(user.id, &user.email, user.role, jwt_secret, expiry_hours)
        .map_err(|e| {
            tracing::error!("JWT encode failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(LoginResponse {
        token,
        user: user.into(),
    })
}

async fn load_user(pool: &SqlitePool, user_id: i64) -> ServiceResult<User> {
    Ok(users::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?)
}

pub async fn get_profile(pool: &SqlitePool, caller: &CurrentUser) -> ServiceResult<UserProfile> {
    Ok(load_user(pool, caller.user_id).await?.into())
}

/// Update name, phone and picture. Omitted fields keep their value.
pub async fn update_profile(
    pool: &SqlitePool,
    caller: &CurrentUser,
    update: ProfileUpdate,
) -> ServiceResult<UserProfile> {
    let mut user = load_user(pool, caller.user_id).await?;

    if let Some(name) = update.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty")
                .with_detail("field", "name")
                .into());
        }
        user.name = name.to_string();
    }
    if let Some(phone) = update.phone {
        user.phone = phone.trim().to_string();
    }
    if let Some(picture) = update.profile_picture {
        user.profile_picture = picture;
    }

    users::update_profile(pool, user.id, &user.name, &user.phone, &user.profile_picture).await?;
    Ok(user.into())
}

/// Change password after checking the current one
pub async fn update_password(
    pool: &SqlitePool,
    caller: &CurrentUser,
    update: PasswordUpdate,
) -> ServiceResult<()> {
    let current = update
        .current_password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::required("currentPassword"))?;
    let new = update
        .new_password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::required("newPassword"))?;

    let user = load_user(pool, caller.user_id).await?;
    if !verify_password(current, &user.hashed_password) {
        return Err(AppError::with_message(
            ErrorCode::InvalidCredentials,
            "Current password is incorrect",
        )
        .into());
    }
    check_password(new, "newPassword")?;

    users::update_password(pool, user.id, &hash(new)?).await?;
    tracing::info!(user_id = user.id, "Password updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user_auth::verify_token;
    use crate::db::test_pool;
    use crate::error::ServiceError;

    fn signup_req(email: &str, password: &str, role: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: Some("Ravi".into()),
            email: Some(email.into()),
            password: Some(password.into()),
            role: role.map(String::from),
            phone: None,
        }
    }

    fn code(err: ServiceError) -> ErrorCode {
        AppError::from(err).code
    }

    fn caller(profile: &UserProfile) -> CurrentUser {
        CurrentUser {
            user_id: profile.id,
            email: profile.email.clone(),
            role: profile.role,
        }
    }

    #[tokio::test]
    async fn test_signup_and_login() {
        let pool = test_pool().await;
        let profile = signup(&pool, signup_req("Ravi@Example.com", "secret1", Some("seller")))
            .await
            .unwrap();
        assert_eq!(profile.email, "ravi@example.com");
        assert_eq!(profile.role, UserRole::Seller);
        assert_eq!(profile.phone, "");

        let stored = users::find_by_id(&pool, profile.id).await.unwrap().unwrap();
        assert_ne!(stored.hashed_password, "secret1");

        let resp = login(
            &pool,
            LoginRequest {
                email: Some("RAVI@example.com".into()),
                password: Some("secret1".into()),
            },
            "k",
            24,
        )
        .await
        .unwrap();
        assert_eq!(resp.user.id, profile.id);
        let claims = verify_token(&resp.token, "k").unwrap();
        assert_eq!(claims.user_id, profile.id);
        assert!(claims.is_seller());
    }

    #[tokio::test]
    async fn test_signup_defaults_to_customer() {
        let pool = test_pool().await;
        let profile = signup(&pool, signup_req("c@x.io", "secret1", None))
            .await
            .unwrap();
        assert_eq!(profile.role, UserRole::Customer);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let pool = test_pool().await;
        let err = signup(&pool, signup_req("c@x.io", "12345", None))
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::PasswordTooShort);

        let err = signup(&pool, signup_req("not-an-email", "secret1", None))
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ValidationFailed);

        let err = signup(&pool, signup_req("c@x.io", "secret1", Some("admin")))
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ValidationFailed);

        let mut req = signup_req("c@x.io", "secret1", None);
        req.name = Some("   ".into());
        let err = signup(&pool, req).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let pool = test_pool().await;
        signup(&pool, signup_req("dup@x.io", "secret1", None))
            .await
            .unwrap();
        let err = signup(&pool, signup_req("DUP@x.io", "secret2", None))
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::EmailAlreadyRegistered);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = test_pool().await;
        signup(&pool, signup_req("a@x.io", "secret1", None))
            .await
            .unwrap();

        for (email, password) in [("a@x.io", "wrong-pw"), ("nobody@x.io", "secret1")] {
            let err = login(
                &pool,
                LoginRequest {
                    email: Some(email.into()),
                    password: Some(password.into()),
                },
                "k",
                24,
            )
            .await
            .unwrap_err();
            assert_eq!(code(err), ErrorCode::InvalidCredentials);
        }
    }

    #[tokio::test]
    async fn test_update_profile_keeps_omitted_fields() {
        let pool = test_pool().await;
        let mut req = signup_req("p@x.io", "secret1", None);
        req.phone = Some("555-0100".into());
        let profile = signup(&pool, req).await.unwrap();
        let me = caller(&profile);

        let updated = update_profile(
            &pool,
            &me,
            ProfileUpdate {
                name: Some("Ravi K".into()),
                phone: None,
                profile_picture: Some("https://img/x.png".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Ravi K");
        assert_eq!(updated.phone, "555-0100");
        assert_eq!(updated.profile_picture, "https://img/x.png");
        assert_eq!(get_profile(&pool, &me).await.unwrap(), updated);

        let err = update_profile(
            &pool,
            &me,
            ProfileUpdate {
                name: Some(" ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(code(err), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_update_password() {
        let pool = test_pool().await;
        let profile = signup(&pool, signup_req("pw@x.io", "secret1", None))
            .await
            .unwrap();
        let me = caller(&profile);

        let err = update_password(
            &pool,
            &me,
            PasswordUpdate {
                current_password: Some("nope".into()),
                new_password: Some("secret2".into()),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(code(err), ErrorCode::InvalidCredentials);

        let err = update_password(
            &pool,
            &me,
            PasswordUpdate {
                current_password: Some("secret1".into()),
                new_password: Some("123".into()),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(code(err), ErrorCode::PasswordTooShort);

        update_password(
            &pool,
            &me,
            PasswordUpdate {
                current_password: Some("secret1".into()),
                new_password: Some("secret2".into()),
            },
        )
        .await
        .unwrap();

        let stored = users::find_by_id(&pool, me.user_id).await.unwrap().unwrap();
        assert!(verify_password("secret2", &stored.hashed_password));
        assert!(!verify_password("secret1", &stored.hashed_password));
    }
}
