//! Bound compute operations
//!
//! An [`Operation`] is an [`Algorithm`] with any key material it needs already
//! generated. Binding happens once at startup; workers then share the bound
//! operation read-only and call [`Compute::compute`] in a tight loop.

use std::fmt;
use std::hint::black_box;

use ed25519_dalek::Signer;
use md5::Md5;
use p256::ecdsa::signature::RandomizedSigner;
use p256::ecdsa::Signature;
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use super::algorithm::Algorithm;
use crate::utils::{ComputeError, LoadError, Result};

/// An algorithm ready to run, with its ephemeral keypair if it signs
pub enum Operation {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Ecdsa(Box<p256::ecdsa::SigningKey>),
    Ed25519(Box<ed25519_dalek::SigningKey>),
}

impl Operation {
    /// Bind an algorithm, generating a keypair for signature schemes
    pub fn bind(algorithm: Algorithm) -> Result<Self> {
        let op = match algorithm {
            Algorithm::Md5 => Self::Md5,
            Algorithm::Sha1 => Self::Sha1,
            Algorithm::Sha224 => Self::Sha224,
            Algorithm::Sha256 => Self::Sha256,
            Algorithm::Sha384 => Self::Sha384,
            Algorithm::Sha512 => Self::Sha512,
            Algorithm::Sha512_224 => Self::Sha512_224,
            Algorithm::Sha512_256 => Self::Sha512_256,
            Algorithm::Ecdsa => {
                let seed = secret_seed()?;
                let key = p256::ecdsa::SigningKey::from_slice(&seed)
                    .map_err(|e| LoadError::KeyGeneration(format!("P-256: {}", e)))?;
                Self::Ecdsa(Box::new(key))
            }
            Algorithm::Ed25519 => {
                let seed = secret_seed()?;
                Self::Ed25519(Box::new(ed25519_dalek::SigningKey::from_bytes(&seed)))
            }
        };
        Ok(op)
    }

    /// The algorithm this operation runs
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Md5 => Algorithm::Md5,
            Self::Sha1 => Algorithm::Sha1,
            Self::Sha224 => Algorithm::Sha224,
            Self::Sha256 => Algorithm::Sha256,
            Self::Sha384 => Algorithm::Sha384,
            Self::Sha512 => Algorithm::Sha512,
            Self::Sha512_224 => Algorithm::Sha512_224,
            Self::Sha512_256 => Algorithm::Sha512_256,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
            Self::Ed25519(_) => Algorithm::Ed25519,
        }
    }

    /// Run exactly one hash or signature over `msg`, discarding the output
    #[inline]
    pub fn compute(&self, msg: &[u8]) -> std::result::Result<(), ComputeError> {
        match self {
            Self::Md5 => digest::<Md5>(msg),
            Self::Sha1 => digest::<Sha1>(msg),
            Self::Sha224 => digest::<Sha224>(msg),
            Self::Sha256 => digest::<Sha256>(msg),
            Self::Sha384 => digest::<Sha384>(msg),
            Self::Sha512 => digest::<Sha512>(msg),
            Self::Sha512_224 => digest::<Sha512_224>(msg),
            Self::Sha512_256 => digest::<Sha512_256>(msg),
            Self::Ecdsa(key) => {
                // SHA-256 of the message is taken inside the signer
                let signature: Signature = key
                    .try_sign_with_rng(&mut OsRng, msg)
                    .map_err(|e| ComputeError::Signing(e.to_string()))?;
                black_box(signature);
            }
            Self::Ed25519(key) => {
                black_box(key.sign(msg));
            }
        }
        Ok(())
    }
}

/// One unit of CPU work over a message
///
/// Workers only see this trait, so anything that can fail the way a bound
/// operation can is a valid workload.
pub trait Compute: Send + Sync {
    fn compute(&self, msg: &[u8]) -> std::result::Result<(), ComputeError>;
}

impl Compute for Operation {
    #[inline]
    fn compute(&self, msg: &[u8]) -> std::result::Result<(), ComputeError> {
        Operation::compute(self, msg)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Operation").field(&self.algorithm()).finish()
    }
}

#[inline]
fn digest<D: Digest>(msg: &[u8]) {
    black_box(D::digest(msg));
}

/// 32 bytes of key seed from the OS random source
fn secret_seed() -> Result<[u8; 32]> {
    let mut seed = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut seed)
        .map_err(|e| LoadError::KeyGeneration(e.to_string()))?;
    Ok(seed)
}
