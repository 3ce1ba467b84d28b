use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error,
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    iat: i64,
    exp: i64,
}

/// HS256 access-token signer and verifier.
#[derive(Clone)]
pub struct TokenKeys {
    enc: EncodingKey,
    dec: DecodingKey,
    ttl: Duration,
}

pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

impl TokenKeys {
    pub fn from_secret(secret: &str, ttl: Duration) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret.as_bytes()),
            dec: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<IssuedToken, Error> {
        self.issue_at(user_id, OffsetDateTime::now_utc())
    }

    fn issue_at(&self, user_id: Uuid, now: OffsetDateTime) -> Result<IssuedToken, Error> {
        let iat = now.unix_timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp: iat + self.ttl.whole_seconds(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.enc)?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl.whole_seconds(),
        })
    }

    /// Resolves a token to the user id it was issued for. Malformed, expired
    /// and badly signed tokens all come back as `None`.
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.dec, &validation).ok()?;
        Uuid::parse_str(&data.claims.sub).ok()
    }
}
