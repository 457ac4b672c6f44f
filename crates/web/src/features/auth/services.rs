use sqlx::PgPool;
use storage::dto::user::{LoginRequest, NewUser, RegisterRequest};
use storage::models::User;
use storage::repository::UserRepository;
use uuid::Uuid;

use crate::error::{WebError, WebResult};
use crate::password;

/// Register a new account. The username mirrors the email, and the
/// display name is split into given and family parts; with no name, the
/// local part of the email stands in for the given name.
pub async fn register(pool: &PgPool, req: &RegisterRequest) -> WebResult<User> {
    let repo = UserRepository::new(pool);

    if repo.find_by_email(&req.email).await?.is_some() {
        tracing::warn!(email = %req.email, "registration rejected, email already in use");
        return Err(WebError::BadRequest(
            "A user with this email already exists".to_string(),
        ));
    }

    let (given_name, family_name) = split_name(req.name.as_deref(), &req.email);

    let user = repo
        .create(&NewUser {
            user_id: Uuid::new_v4().to_string(),
            username: req.email.clone(),
            email: req.email.clone(),
            password_hash: password::hash_password(&req.password)?,
            given_name,
            family_name,
        })
        .await?;

    tracing::info!(user_id = %user.user_id, "user registered");
    Ok(user)
}

/// Verify credentials and return the account profile.
pub async fn login(pool: &PgPool, req: &LoginRequest) -> WebResult<User> {
    let repo = UserRepository::new(pool);

    let user = repo
        .find_by_email(&req.email)
        .await?
        .ok_or(WebError::Unauthorized)?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        return Err(WebError::Unauthorized);
    }

    Ok(user)
}

fn split_name(name: Option<&str>, email: &str) -> (String, String) {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let mut parts = name.split_whitespace();
            let given = parts.next().unwrap_or_default().to_string();
            let family = parts.collect::<Vec<_>>().join(" ");
            (given, family)
        }
        None => (
            email.split('@').next().unwrap_or(email).to_string(),
            String::new(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::split_name;

    #[test]
    fn full_name_splits_into_given_and_family() {
        assert_eq!(
            split_name(Some("Ada Lovelace"), "ada@example.com"),
            ("Ada".to_string(), "Lovelace".to_string())
        );
    }

    #[test]
    fn multi_part_family_name_is_preserved() {
        assert_eq!(
            split_name(Some("Jan van der Berg"), "jan@example.com"),
            ("Jan".to_string(), "van der Berg".to_string())
        );
    }

    #[test]
    fn missing_name_falls_back_to_email_local_part() {
        assert_eq!(
            split_name(None, "ada@example.com"),
            ("ada".to_string(), String::new())
        );
        assert_eq!(
            split_name(Some("   "), "ada@example.com"),
            ("ada".to_string(), String::new())
        );
    }
}
