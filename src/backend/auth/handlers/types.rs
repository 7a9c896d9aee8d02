/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across the register, login, and me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::UserProfile;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// User's email address (also the token subject)
    pub email: String,
    /// Plaintext password (hashed before storage)
    pub pass: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub pass: String,
}

/// Registration response
///
/// `statusCode` is a string echo of the HTTP status, kept for clients that
/// read it from the body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegisterResponse {
    pub description: String,
    pub token: String,
    #[serde(rename = "statusCode")]
    pub status_code: String,
}

/// Login response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub description: String,
}

/// Profile response for `GET /user/me`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MeResponse {
    pub me: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_response_field_names() {
        let response = RegisterResponse {
            description: "User successfully created and logged in!".to_string(),
            token: "abc".to_string(),
            status_code: "200".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "description": "User successfully created and logged in!",
                "token": "abc",
                "statusCode": "200",
            })
        );
    }

    #[test]
    fn test_me_response_shape() {
        let response = MeResponse {
            me: UserProfile {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"me": {"name": "Ada", "email": "ada@example.com"}})
        );
    }

    #[test]
    fn test_register_request_requires_all_fields() {
        let result = serde_json::from_value::<RegisterRequest>(json!({
            "email": "ada@example.com",
            "pass": "secret",
        }));
        assert!(result.is_err());
    }
}
