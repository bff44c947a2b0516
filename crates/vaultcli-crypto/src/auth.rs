//! Challenge signatures used to authenticate against the server.
//!
//! The server hands out its current time, the client signs `email + time` with its private key
//! and sends back the [AuthRequest].

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    util::{decode_b64, encode_b64},
    Result, WorkspaceCypher,
};

/// A login challenge: the account email and the server time it was issued at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthChallenge {
    email: String,
    date: String,
}

/// Body of an authentication request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Account email
    pub email: String,
    /// Server time the challenge was issued at
    pub date: String,
    /// Base64 PKCS#1 v1.5 signature of `email` followed by `date`
    pub signature: String,
}

impl AuthChallenge {
    /// Challenge for `email` at the server time `date`.
    pub fn new(email: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            date: date.into(),
        }
    }

    /// The signed message, the email directly followed by the date.
    pub fn message(&self) -> String {
        format!("{}{}", self.email, self.date)
    }

    /// Sign the challenge and return the base64 signature.
    #[instrument(skip(cypher), fields(email = %self.email), err)]
    pub fn sign(&self, cypher: &WorkspaceCypher) -> Result<String> {
        let signature = cypher.sign(self.message().as_bytes())?;
        Ok(encode_b64(&signature))
    }

    /// Sign the challenge and build the request body.
    pub fn into_request(self, cypher: &WorkspaceCypher) -> Result<AuthRequest> {
        let signature = self.sign(cypher)?;
        Ok(AuthRequest {
            email: self.email,
            date: self.date,
            signature,
        })
    }

    /// Check a base64 signature against the public key of `cypher`.
    pub fn verify(&self, cypher: &WorkspaceCypher, signature: &str) -> bool {
        decode_b64(signature)
            .map(|raw| cypher.verify(self.message().as_bytes(), &raw))
            .unwrap_or(false)
    }
}
