//! Caller identity supplied by the upstream auth gateway.
//!
//! The gateway authenticates requests and forwards `{user_id, role}` as
//! headers. Authentication itself (tokens, password hashing) lives outside
//! this service; handlers only enforce role restrictions.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

const USER_ID_HEADER: &str = "x-user-id";
const ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Recruiter,
}

impl Role {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "job_seeker" | "jobseeker" => Some(Role::JobSeeker),
            "recruiter" => Some(Role::Recruiter),
            _ => None,
        }
    }
}

/// Authenticated caller identity attached to every request.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl Caller {
    /// Recruiter-only operations (search, match, save candidates).
    pub fn require_recruiter(&self) -> Result<(), AppError> {
        if self.role == Role::Recruiter {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// Job-seeker-only operations (own profile, CV upload).
    pub fn require_job_seeker(&self) -> Result<(), AppError> {
        if self.role == Role::JobSeeker {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(AppError::Unauthorized)?;

        let role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(Role::parse)
            .ok_or(AppError::Unauthorized)?;

        Ok(Caller { user_id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_known_values() {
        assert_eq!(Role::parse("job_seeker"), Some(Role::JobSeeker));
        assert_eq!(Role::parse("jobseeker"), Some(Role::JobSeeker));
        assert_eq!(Role::parse("recruiter"), Some(Role::Recruiter));
    }

    #[test]
    fn test_role_parse_unknown_is_none() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_recruiter_guard() {
        let caller = Caller {
            user_id: Uuid::new_v4(),
            role: Role::Recruiter,
        };
        assert!(caller.require_recruiter().is_ok());
        assert!(caller.require_job_seeker().is_err());
    }

    #[test]
    fn test_job_seeker_guard() {
        let caller = Caller {
            user_id: Uuid::new_v4(),
            role: Role::JobSeeker,
        };
        assert!(caller.require_job_seeker().is_ok());
        assert!(caller.require_recruiter().is_err());
    }
}
