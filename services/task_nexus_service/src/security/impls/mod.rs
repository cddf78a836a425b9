use argon2::{
    Argon2, PasswordHasher as _, PasswordVerifier as _,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};
use derive_new::new;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::security::{
    CredentialHasher, Identity, SecurityServiceError, TokenService,
};

/// HS256-signed identity tokens. No expiry claim is issued; tokens are
/// time-unbounded, so validation must not demand one either.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenService for JwtTokenService {
    fn sign(
        &self,
        identity: &Identity,
    ) -> Result<String, SecurityServiceError> {
        jsonwebtoken::encode(&Header::default(), identity, &self.encoding_key)
            .map_err(SecurityServiceError::custom)
    }

    fn verify(&self, token: &str) -> Option<Identity> {
        jsonwebtoken::decode::<Identity>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map(|data| data.claims)
        .ok()
    }
}

/// Argon2id with a per-credential random salt. Verification goes through
/// the parsed hash, which compares in constant time.
#[derive(Default, new)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, SecurityServiceError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(SecurityServiceError::custom)
    }

    fn verify(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, SecurityServiceError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(SecurityServiceError::custom)?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::users::UserId;

    fn identity() -> Identity {
        Identity::new(
            UserId::new(7),
            "ada".to_string(),
            "ada@example.com".to_string(),
        )
    }

    #[test]
    fn token_round_trips() {
        let service = JwtTokenService::new("test-secret");

        let token = service.sign(&identity()).unwrap();
        let verified = service.verify(&token).unwrap();

        assert_eq!(verified, identity());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let service = JwtTokenService::new("test-secret");
        let other = JwtTokenService::new("other-secret");

        let token = other.sign(&identity()).unwrap();

        assert_eq!(service.verify(&token), None);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = JwtTokenService::new("test-secret");

        assert_eq!(service.verify("not-a-token"), None);
    }

    #[test]
    fn credential_round_trips() {
        let hasher = Argon2CredentialHasher::new();

        let stored = hasher.hash("hunter2").unwrap();

        assert_ne!(stored, "hunter2", "hash must not be the plain password");
        assert!(hasher.verify("hunter2", &stored).unwrap());
        assert!(!hasher.verify("hunter3", &stored).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let hasher = Argon2CredentialHasher::new();

        let first = hasher.hash("hunter2").unwrap();
        let second = hasher.hash("hunter2").unwrap();

        assert_ne!(first, second);
    }
}
