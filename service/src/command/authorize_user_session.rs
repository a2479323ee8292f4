//! [`Command`] for authorizing a user [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::user::{Session, Token},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a user [`Session`] issued by the booking
/// site.
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: Token,
}

impl<B, S> Command<AuthorizeUserSession> for Service<B, S> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        let AuthorizeUserSession { token } = cmd;

        Ok(jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> ExecutionError))?
        .claims)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use jsonwebtoken::{EncodingKey, Header};

    use crate::{domain::user, mock, Command as _};

    use super::AuthorizeUserSession;

    fn token(user_id: u32, exp: i64) -> user::Token {
        let claims = serde_json::json!({"user_id": user_id, "exp": exp});
        let jwt = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(mock::JWT_SECRET),
        )
        .unwrap();
        jwt.parse().unwrap()
    }

    #[tokio::test]
    async fn decodes_valid_token() {
        let service = mock::service();
        let exp = DateTime::now().unix_timestamp() + 3600;

        let session = service
            .execute(AuthorizeUserSession {
                token: token(5, exp),
            })
            .await
            .unwrap();

        assert_eq!(session.user_id, user::Id::from(5));
        assert_eq!(session.expires_at.unix_timestamp(), exp);
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let service = mock::service();
        let exp = DateTime::now().unix_timestamp() - 3600;

        let res = service
            .execute(AuthorizeUserSession {
                token: token(5, exp),
            })
            .await;

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let service = mock::service();

        let res = service
            .execute(AuthorizeUserSession {
                token: "not-a-jwt".parse().unwrap(),
            })
            .await;

        assert!(res.is_err());
    }
}
